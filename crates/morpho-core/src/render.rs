//! Presentation data for a rendering collaborator.
//!
//! Nothing here affects the simulation.

use crate::types::{Color, Position};
use serde::{Deserialize, Serialize};

/// A polygon approximating a cell's disc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscOutline {
    pub center: Position,
    pub color: Color,
    pub vertices: Vec<Position>,
}

impl DiscOutline {
    /// Vertices as a closed line loop (first vertex repeated at the end).
    pub fn line_loop(&self) -> Vec<Position> {
        let mut path = self.vertices.clone();
        if let Some(first) = self.vertices.first() {
            path.push(*first);
        }
        path
    }

    /// Axis-aligned bounds `(min, max)` of the outline.
    pub fn bounds(&self) -> Option<(Position, Position)> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(lo, hi), v| {
            (
                Position::new(lo.x.min(v.x), lo.y.min(v.y)),
                Position::new(hi.x.max(v.x), hi.y.max(v.y)),
            )
        }))
    }
}
