//! Size-gated cell — growth and division wait for internal signals.
//!
//! The cell enters growth only with a reserve surplus on hand, and divides
//! only once its radius has reached a target.

use morpho_core::cell::Cell;
use morpho_core::variant::CellVariant;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeGatedCell {
    /// Radius the cell must reach before it may divide.
    pub division_radius: f64,
    /// Nutrient and energy reserve required to leave mitosis.
    pub min_reserve: f64,
}

impl SizeGatedCell {
    pub fn new(division_radius: f64) -> Self {
        Self {
            division_radius,
            min_reserve: 0.0,
        }
    }

    pub fn with_min_reserve(mut self, min_reserve: f64) -> Self {
        self.min_reserve = min_reserve;
        self
    }
}

impl CellVariant for SizeGatedCell {
    fn kind(&self) -> &str {
        "size-gated"
    }

    fn growth_checkpoint(&self, cell: &Cell) -> bool {
        cell.nutrients() >= self.min_reserve && cell.energy() >= self.min_reserve
    }

    fn division_checkpoint(&self, cell: &Cell) -> bool {
        cell.radius() >= self.division_radius
    }

    fn create_new(&self) -> Box<dyn CellVariant> {
        Box::new(*self)
    }
}
