//! Contact-inhibited cell — crowding stops proliferation.
//!
//! Neighbours pressing on a cell show up as force accumulated by the
//! aggregate during the tick. While that force exceeds the threshold the
//! cell holds in Gap1: it keeps feeding and growing but does not divide.

use morpho_core::cell::Cell;
use morpho_core::variant::CellVariant;

/// A cell whose division checkpoint is closed under pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactInhibitedCell {
    /// Force magnitude above which division is inhibited.
    pub pressure_threshold: f64,
}

impl ContactInhibitedCell {
    pub fn new(pressure_threshold: f64) -> Self {
        Self {
            pressure_threshold: pressure_threshold.max(0.0),
        }
    }

    /// Whether the pressure on `cell` currently inhibits division.
    pub fn is_inhibited(&self, cell: &Cell) -> bool {
        cell.force().magnitude() > self.pressure_threshold
    }
}

impl CellVariant for ContactInhibitedCell {
    fn kind(&self) -> &str {
        "contact-inhibited"
    }

    fn division_checkpoint(&self, cell: &Cell) -> bool {
        !self.is_inhibited(cell)
    }

    fn create_new(&self) -> Box<dyn CellVariant> {
        Box::new(*self)
    }
}
