//! # Morpho Runtime
//!
//! Population management and tick scheduling.
//!
//! The [`Aggregate`](aggregate::Aggregate) owns the cells, lends them the
//! shared configuration, drives one cell-cycle step per cell per tick,
//! moves cells by the forces they accumulated, and applies the removals
//! and births they requested once every cell has finished its tick.

pub mod aggregate;
pub mod export;
pub mod seed;
