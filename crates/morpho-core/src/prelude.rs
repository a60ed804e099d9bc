//! Morpho Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use morpho_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{
    AggregateId, CellId,
    Color, CycleState,
    Position, Vector2,
    Tick,
};

pub use crate::aggregate::{CellularAggregate, PendingChanges};
pub use crate::cell::{Cell, CellSnapshot};
pub use crate::config::CellConfig;
pub use crate::cycle::{Checkpoints, CycleController, PhaseCounts};
pub use crate::force::ForceAccumulator;
pub use crate::geometry::{Geometry, DEFAULT_OUTLINE_SIDES};
pub use crate::render::DiscOutline;
pub use crate::resources::ResourceEconomy;
pub use crate::variant::{BaseCell, CellVariant};

// Re-export error types
pub use crate::error::{AggregateError, ConfigError, MorphoError, Result};
