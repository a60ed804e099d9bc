//! The contract between a cell and the population that owns it.
//!
//! A cell never owns or mutates its aggregate directly. During its tick
//! it may ask for two things: to be removed (apoptosis) and for a newborn
//! to be registered (division). Both are requests; the aggregate decides
//! when they take effect, which lets it finish iterating its population
//! before touching it.

use crate::cell::Cell;
use crate::types::{AggregateId, CellId};

/// What a cell may ask of its owning aggregate.
pub trait CellularAggregate {
    /// Handle of this aggregate, as recorded by its member cells.
    fn aggregate_id(&self) -> AggregateId;

    /// Request removal of a cell.
    ///
    /// Must tolerate ids that are not members without aborting.
    fn remove(&mut self, id: CellId);

    /// Request registration of a newborn cell before the next tick.
    fn insert(&mut self, cell: Cell);
}

/// Requests collected during a tick, applied afterwards by the owner.
///
/// Removal requests are deduplicated so a cell is removed at most once
/// however many times it asks.
#[derive(Debug)]
pub struct PendingChanges {
    id: AggregateId,
    removals: Vec<CellId>,
    births: Vec<Cell>,
}

impl PendingChanges {
    pub fn new(id: AggregateId) -> Self {
        Self {
            id,
            removals: Vec::new(),
            births: Vec::new(),
        }
    }

    pub fn removals(&self) -> &[CellId] {
        &self.removals
    }

    pub fn births(&self) -> &[Cell] {
        &self.births
    }

    pub fn is_empty(&self) -> bool {
        self.removals.is_empty() && self.births.is_empty()
    }

    /// Drain both queues, leaving this buffer empty for the next tick.
    pub fn take(&mut self) -> (Vec<CellId>, Vec<Cell>) {
        (
            std::mem::take(&mut self.removals),
            std::mem::take(&mut self.births),
        )
    }
}

impl CellularAggregate for PendingChanges {
    fn aggregate_id(&self) -> AggregateId {
        self.id
    }

    fn remove(&mut self, id: CellId) {
        if !self.removals.contains(&id) {
            self.removals.push(id);
        }
    }

    fn insert(&mut self, cell: Cell) {
        self.births.push(cell);
    }
}
