//! Geometry — cell radius and bounded growth.

use crate::config::CellConfig;
use crate::resources::ResourceEconomy;
use crate::types::Position;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Number of sides of the polygon approximating a cell outline.
pub const DEFAULT_OUTLINE_SIDES: usize = 12;

/// Radius state of one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    radius: f64,
}

impl Geometry {
    /// Geometry of a freshly created cell.
    pub fn new(config: &CellConfig) -> Self {
        Self::with_radius(config.default_radius(), config)
    }

    /// Geometry with an explicit radius, clamped to `[0, limit]`.
    pub fn with_radius(radius: f64, config: &CellConfig) -> Self {
        Self {
            radius: radius.clamp(0.0, config.growth_radius_limit()),
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Grow by one increment if the reserves allow it.
    ///
    /// Returns whether the growth step was taken. A step taken at the
    /// limit still returns `true` but leaves the radius unchanged.
    pub fn grow(&mut self, economy: &ResourceEconomy, config: &CellConfig) -> bool {
        if !economy.permits_growth(config) {
            return false;
        }
        self.radius += config.growth_radius_increment();
        if self.radius > config.growth_radius_limit() {
            self.radius = config.growth_radius_limit();
        }
        true
    }

    /// Vertices of a regular `sides`-gon inscribed in the cell's disc.
    pub fn outline(&self, center: Position, sides: usize) -> Vec<Position> {
        let sides = sides.max(3);
        let sector = 2.0 * PI / sides as f64;
        (0..sides)
            .map(|side| {
                let angle = side as f64 * sector;
                Position::new(
                    self.radius * angle.cos() + center.x,
                    self.radius * angle.sin() + center.y,
                )
            })
            .collect()
    }
}
