//! # Morpho Core
//!
//! The cell-agent lifecycle automaton and the pieces it drives.
//!
//! A [`Cell`](cell::Cell) is composed of four parts, each in its own module:
//!
//! - **ResourceEconomy** — nutrient and energy reserves that gate growth
//! - **Geometry** — the cell radius and its bounded growth
//! - **ForceAccumulator** — per-tick force sum, cleared and read by the aggregate
//! - **CycleController** — the finite-state automaton sequencing the phases
//!   Mitosis → Gap1 → Synthesis → Gap2, plus quiescence and apoptosis
//!
//! Behavior specific to a kind of cell lives behind the
//! [`CellVariant`](variant::CellVariant) trait: three checkpoints and a factory.
//! The owning population is reached only through the
//! [`CellularAggregate`](aggregate::CellularAggregate) contract.
//!
//! ## Quick Start
//!
//! ```rust
//! use morpho_core::prelude::*;
//!
//! let config = CellConfig::default();
//! let mut cell = Cell::new(&config);
//! let mut owner = PendingChanges::new(AggregateId::new(1));
//!
//! cell.advance_time_step(&config, &mut owner);
//! assert_eq!(cell.cycle_state(), CycleState::Gap1);
//! ```

pub mod aggregate;
pub mod cell;
pub mod config;
pub mod cycle;
pub mod error;
pub mod force;
pub mod geometry;
pub mod prelude;
pub mod render;
pub mod resources;
pub mod types;
pub mod variant;
