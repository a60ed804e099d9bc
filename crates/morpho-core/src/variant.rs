//! Cell variants — the extension points of the automaton.
//!
//! The automaton itself never changes. A kind of cell is defined by how
//! it answers the three checkpoints and by the factory that builds the
//! variant of its offspring. The defaults (grow, divide, never die) make
//! a cell cycle forever unless something external gates it.

use crate::cell::Cell;
use std::fmt;

/// Checkpoints and factory of a kind of cell.
///
/// Checkpoints read the cell they belong to, including the force
/// accumulated by the aggregate for the current tick.
pub trait CellVariant: fmt::Debug + Send {
    /// Short name of this kind of cell (for display and logging).
    fn kind(&self) -> &str;

    /// Conditions required for growth after mitosis are satisfied.
    fn growth_checkpoint(&self, _cell: &Cell) -> bool {
        true
    }

    /// Conditions required for division after growth are satisfied.
    fn division_checkpoint(&self, _cell: &Cell) -> bool {
        true
    }

    /// The cell must die. Evaluated before the other two, every tick.
    fn apoptosis_checkpoint(&self, _cell: &Cell) -> bool {
        false
    }

    /// Build the variant carried by a daughter cell.
    fn create_new(&self) -> Box<dyn CellVariant>;
}

/// The plain cell: default checkpoints, offspring of the same kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseCell;

impl CellVariant for BaseCell {
    fn kind(&self) -> &str {
        "cell"
    }

    fn create_new(&self) -> Box<dyn CellVariant> {
        Box::new(BaseCell)
    }
}
