//! # Morpho Agents
//!
//! Reference cell variants. Each one answers the cell-cycle checkpoints
//! with its own gating rule while leaving the automaton untouched:
//!
//! - **ContactInhibitedCell** — stops dividing when crowded (accumulated force)
//! - **SenescentCell** — dies after a generation limit or a lifespan (damage)
//! - **SizeGatedCell** — divides only once grown to a target size (signaling)
//!
//! [`VariantKind`](kind::VariantKind) selects and builds any of them, plus
//! the plain [`BaseCell`](morpho_core::variant::BaseCell), from configuration.

pub mod contact;
pub mod kind;
pub mod senescent;
pub mod size_gated;
