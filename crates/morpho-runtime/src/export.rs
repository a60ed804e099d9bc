//! Population export — summaries and drawable outlines.
//!
//! Everything here is read-only over the aggregate and serializable, so a
//! renderer or a notebook can consume it as JSON.

use crate::aggregate::{Aggregate, AggregateEvent, AggregateSnapshot};
use morpho_core::cycle::PhaseCounts;
use morpho_core::render::DiscOutline;
use morpho_core::types::Tick;
use serde::Serialize;

/// Population-level statistics at one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationSummary {
    pub tick: Tick,
    pub alive: usize,
    pub mean_radius: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub max_generation: u32,
    /// Live cells per phase.
    pub phases: PhaseCounts,
}

/// Summarize the live population.
pub fn summarize(aggregate: &Aggregate) -> PopulationSummary {
    let mut phases = PhaseCounts::default();
    let mut max_generation = 0;
    let mut sum = 0.0;
    let mut min_radius = f64::MAX;
    let mut max_radius = 0.0f64;

    for cell in aggregate.cells() {
        phases.record(cell.cycle_state());
        max_generation = max_generation.max(cell.generation());
        let r = cell.radius();
        sum += r;
        min_radius = min_radius.min(r);
        max_radius = max_radius.max(r);
    }

    let alive = aggregate.len();
    PopulationSummary {
        tick: aggregate.current_tick(),
        alive,
        mean_radius: if alive == 0 { 0.0 } else { sum / alive as f64 },
        min_radius: if alive == 0 { 0.0 } else { min_radius },
        max_radius,
        max_generation,
        phases,
    }
}

/// Outline of every live cell at its position.
pub fn outlines(aggregate: &Aggregate) -> Vec<DiscOutline> {
    aggregate
        .members()
        .iter()
        .map(|m| m.cell.draw(m.position))
        .collect()
}

/// Full export of the aggregate as pretty-printed JSON.
pub fn export_json(aggregate: &Aggregate) -> serde_json::Result<String> {
    #[derive(Serialize)]
    struct Export<'a> {
        summary: PopulationSummary,
        snapshot: AggregateSnapshot,
        outlines: Vec<DiscOutline>,
        events: &'a [(Tick, AggregateEvent)],
    }

    serde_json::to_string_pretty(&Export {
        summary: summarize(aggregate),
        snapshot: aggregate.snapshot(),
        outlines: outlines(aggregate),
        events: aggregate.event_history(),
    })
}
