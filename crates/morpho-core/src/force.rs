//! Force accumulator.
//!
//! The cell never integrates its own motion. Each tick the aggregate
//! clears the sum, adds zero or more contributions, and reads the total
//! to move the cell. All of that happens before the cell advances.

use crate::types::Vector2;
use serde::{Deserialize, Serialize};

/// Running sum of the forces applied to a cell during the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ForceAccumulator {
    sum: Vector2,
}

impl ForceAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, force: Vector2) {
        self.sum += force;
    }

    pub fn clear(&mut self) {
        self.sum = Vector2::ZERO;
    }

    pub fn get(&self) -> Vector2 {
        self.sum
    }
}
