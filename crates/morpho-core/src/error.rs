//! Error types for Morpho operations.
//!
//! The per-tick path is total and never returns these. They cover
//! configuration changes and explicit aggregate bookkeeping calls.

use crate::types::CellId;
use thiserror::Error;

/// Result type for Morpho operations.
pub type Result<T> = std::result::Result<T, MorphoError>;

/// Errors that can occur during Morpho operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MorphoError {
    /// Configuration errors.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// Aggregate bookkeeping errors.
    #[error("Aggregate error: {0}")]
    Aggregate(#[from] AggregateError),
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Value is negative where only non-negative values make physical sense.
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    /// Value is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    /// Two values contradict each other.
    #[error("Invalid value for {field}: {value} ({reason})")]
    Inconsistent {
        field: &'static str,
        value: f64,
        reason: String,
    },
}

/// Aggregate bookkeeping errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// No live cell with this identifier.
    #[error("Cell not found: {0}")]
    CellNotFound(CellId),
    /// The cell is already a member.
    #[error("Cell already present: {0}")]
    AlreadyPresent(CellId),
    /// The population cap has been reached.
    #[error("Population full: {limit} cells")]
    PopulationFull { limit: usize },
}

// Convenience constructors
impl MorphoError {
    pub fn cell_not_found(id: CellId) -> Self {
        MorphoError::Aggregate(AggregateError::CellNotFound(id))
    }

    pub fn negative(field: &'static str, value: f64) -> Self {
        MorphoError::Config(ConfigError::Negative { field, value })
    }
}
