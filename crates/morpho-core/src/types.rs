//! Shared types used across the Morpho crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use std::sync::atomic::{AtomicU64, Ordering};

/// Number of cell identifiers handed out so far in this process.
static CELL_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Number of aggregate handles handed out so far in this process.
static AGGREGATE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Unique identifier of a cell.
///
/// Identifiers come from a process-wide counter: the first cell is `1`,
/// and no two cells, alive or dead, ever share one. `0` is reserved for
/// "no cell" and is what a cell without a parent records as its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellId(pub u64);

impl CellId {
    /// The absent identifier (parent of a standalone cell).
    pub const NONE: CellId = CellId(0);

    /// Issue the next identifier from the process-wide counter.
    pub fn next() -> Self {
        Self(CELL_COUNTER.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// The highest identifier issued so far (`NONE` if none yet).
    pub fn last_issued() -> Self {
        Self(CELL_COUNTER.load(Ordering::Relaxed))
    }

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell-{}", self.0)
    }
}

/// Non-owning handle to the aggregate that owns a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AggregateId(pub u64);

impl AggregateId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Issue a fresh handle, distinct from every other issued one.
    pub fn fresh() -> Self {
        Self(AGGREGATE_COUNTER.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

impl fmt::Display for AggregateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "aggregate-{}", self.0)
    }
}

/// A 2-D vector, used both for forces and positions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

/// A point in the aggregate's plane.
pub type Position = Vector2;

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance_to(&self, other: &Vector2) -> f64 {
        (*self - *other).magnitude()
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

/// Presentation color, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Color {
    pub const WHITE: Color = Color { red: 1.0, green: 1.0, blue: 1.0 };

    pub fn new(red: f32, green: f32, blue: f32) -> Self {
        Self {
            red: red.clamp(0.0, 1.0),
            green: green.clamp(0.0, 1.0),
            blue: blue.clamp(0.0, 1.0),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Phase of the cell cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CycleState {
    /// Mitosis (M). Cells are born here.
    Mitosis,
    /// Gap 1: feeding and growing.
    Gap1,
    /// Synthesis (S): the cell divides.
    Synthesis,
    /// Gap 2: a resting step before the cycle restarts.
    Gap2,
    /// Quiescent Gap 0: feeding without growth, never leaves.
    QuiescentGap0,
    /// Programmed death. Terminal.
    Apoptotic,
}

impl CycleState {
    /// Whether the state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CycleState::Apoptotic)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CycleState::Mitosis => "M",
            CycleState::Gap1 => "G1",
            CycleState::Synthesis => "S",
            CycleState::Gap2 => "G2",
            CycleState::QuiescentGap0 => "G0",
            CycleState::Apoptotic => "Apop",
        }
    }
}

impl fmt::Display for CycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The current tick of the simulation.
pub type Tick = u64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_ids_are_strictly_increasing() {
        let a = CellId::next();
        let b = CellId::next();
        assert!(b > a);
        assert!(CellId::last_issued() >= b);
        assert!(!a.is_none());
        assert!(CellId::NONE.is_none());
    }

    #[test]
    fn vector_arithmetic() {
        let mut v = Vector2::new(1.0, 0.0);
        v += Vector2::new(0.0, 1.0);
        assert_eq!(v, Vector2::new(1.0, 1.0));
        assert_eq!(v * 2.0, Vector2::new(2.0, 2.0));
        assert_eq!(-v, Vector2::new(-1.0, -1.0));
        assert!((Vector2::new(3.0, 4.0).magnitude() - 5.0).abs() < 1e-12);
        assert!(Vector2::ZERO.is_zero());
    }

    #[test]
    fn color_components_are_clamped() {
        let c = Color::new(1.5, -0.2, 0.5);
        assert_eq!(c, Color { red: 1.0, green: 0.0, blue: 0.5 });
    }

    #[test]
    fn only_apoptosis_is_terminal() {
        assert!(CycleState::Apoptotic.is_terminal());
        assert!(!CycleState::QuiescentGap0.is_terminal());
        assert_eq!(CycleState::Gap1.to_string(), "G1");
    }
}
