//! Senescent cell — programmed death after too many divisions or too long a life.
//!
//! Models accumulated damage: telomere shortening (a Hayflick limit on the
//! generation) and an optional lifespan in ticks.

use morpho_core::cell::Cell;
use morpho_core::types::Tick;
use morpho_core::variant::CellVariant;

/// A cell whose apoptosis checkpoint fires with age or lineage depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SenescentCell {
    /// Highest generation allowed to live.
    pub hayflick_limit: u32,
    /// Ticks after which the cell dies, if any.
    pub lifespan: Option<Tick>,
}

impl SenescentCell {
    pub fn new(hayflick_limit: u32) -> Self {
        Self {
            hayflick_limit,
            lifespan: None,
        }
    }

    pub fn with_lifespan(mut self, lifespan: Tick) -> Self {
        self.lifespan = Some(lifespan);
        self
    }
}

impl CellVariant for SenescentCell {
    fn kind(&self) -> &str {
        "senescent"
    }

    fn apoptosis_checkpoint(&self, cell: &Cell) -> bool {
        cell.generation() > self.hayflick_limit
            || self.lifespan.is_some_and(|lifespan| cell.age() >= lifespan)
    }

    fn create_new(&self) -> Box<dyn CellVariant> {
        Box::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morpho_core::prelude::*;

    #[test]
    fn lifespan_triggers_apoptosis_at_that_tick() {
        let config = CellConfig::default();
        let variant = SenescentCell::new(u32::MAX).with_lifespan(6);
        let mut cell = Cell::with_variant(Box::new(variant), &config);
        let mut owner = PendingChanges::new(AggregateId::new(1));

        for tick in 1..=5 {
            let state = cell.advance_time_step(&config, &mut owner);
            assert_ne!(state, CycleState::Apoptotic, "tick {tick}");
        }
        assert_eq!(cell.advance_time_step(&config, &mut owner), CycleState::Apoptotic);
        assert_eq!(owner.removals(), &[cell.id()]);
    }

    #[test]
    fn daughters_past_the_limit_die_on_first_tick() {
        let config = CellConfig::default();
        let root = Cell::with_variant(Box::new(SenescentCell::new(1)), &config);
        let first = root.create_new(&config);
        let mut second = first.create_new(&config);
        assert_eq!(second.generation(), 2);

        let mut owner = PendingChanges::new(AggregateId::new(1));
        assert_eq!(second.advance_time_step(&config, &mut owner), CycleState::Apoptotic);
    }

    #[test]
    fn within_limit_cells_cycle_normally() {
        let config = CellConfig::default();
        let mut cell = Cell::with_variant(Box::new(SenescentCell::new(3)), &config);
        let mut owner = PendingChanges::new(AggregateId::new(1));
        for _ in 0..8 {
            assert_ne!(cell.advance_time_step(&config, &mut owner), CycleState::Apoptotic);
        }
        assert_eq!(owner.births().len(), 2);
    }
}
