//! Seeding — place an initial population into an aggregate.

use crate::aggregate::Aggregate;
use morpho_agents::kind::VariantKind;
use morpho_core::cell::Cell;
use morpho_core::error::{ConfigError, Result};
use morpho_core::types::{CellId, CycleState, Position};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// How seeded cells are arranged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "kebab-case")]
pub enum Layout {
    /// All cells at the origin.
    Point,
    /// Evenly spaced on a circle around the origin.
    Ring {
        #[serde(default = "default_ring_radius")]
        radius: f64,
    },
    /// Row-major on a square grid centred on the origin.
    Grid {
        #[serde(default = "default_spacing")]
        spacing: f64,
    },
}

fn default_ring_radius() -> f64 { 50.0 }
fn default_spacing() -> f64 { 25.0 }

impl Default for Layout {
    fn default() -> Self {
        Layout::Ring {
            radius: default_ring_radius(),
        }
    }
}

impl Layout {
    pub fn validate(&self) -> Result<()> {
        let (field, value) = match self {
            Layout::Point => return Ok(()),
            Layout::Ring { radius } => ("radius", *radius),
            Layout::Grid { spacing } => ("spacing", *spacing),
        };
        if !value.is_finite() {
            return Err(ConfigError::NotFinite { field, value }.into());
        }
        if value < 0.0 {
            return Err(ConfigError::Negative { field, value }.into());
        }
        Ok(())
    }
}

/// Positions for `count` cells under `layout`.
pub fn layout_positions(count: usize, layout: &Layout) -> Vec<Position> {
    match layout {
        Layout::Point => vec![Position::ZERO; count],
        Layout::Ring { radius } => (0..count)
            .map(|i| {
                let angle = TAU * i as f64 / count as f64;
                Position::new(angle.cos() * radius, angle.sin() * radius)
            })
            .collect(),
        Layout::Grid { spacing } => {
            let side = (count as f64).sqrt().ceil().max(1.0) as usize;
            let half = (side - 1) as f64 * spacing / 2.0;
            (0..count)
                .map(|i| {
                    let (row, col) = (i / side, i % side);
                    Position::new(col as f64 * spacing - half, row as f64 * spacing - half)
                })
                .collect()
        }
    }
}

/// What to seed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeedPlan {
    pub count: usize,
    /// Phase the seeded cells start in. Mitosis unless set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_state: Option<CycleState>,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub variant: VariantKind,
}

impl SeedPlan {
    /// Check the layout and the variant parameters.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        self.variant.validate()
    }
}

/// Insert `plan.count` fresh cells of `plan.variant` into the aggregate.
///
/// Stops at the first refused insertion (for example when the population
/// cap is reached) and reports it; cells inserted before stay. An invalid
/// plan is refused before anything is inserted.
pub fn seed(aggregate: &mut Aggregate, plan: &SeedPlan) -> Result<Vec<CellId>> {
    plan.validate()?;
    let mut ids = Vec::with_capacity(plan.count);
    for position in layout_positions(plan.count, &plan.layout) {
        let mut cell = Cell::with_variant(plan.variant.build(), aggregate.cell_config());
        if let Some(state) = plan.start_state {
            cell = cell.with_cycle_state(state);
        }
        ids.push(aggregate.insert(cell, position)?);
    }
    tracing::info!(
        aggregate = %aggregate.id(),
        seeded = ids.len(),
        kind = ?plan.variant,
        "aggregate seeded"
    );
    Ok(ids)
}
