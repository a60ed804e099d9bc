//! Cycle controller — the cell-cycle automaton.
//!
//! ```text
//!            growth            division
//!   Mitosis ────────▶ Gap1 ─────────────▶ Synthesis ──▶ Gap2 ──┐
//!      ▲                                                        │
//!      └────────────────────────────────────────────────────────┘
//!
//!   QuiescentGap0 ⟲        Apoptotic ⟲  (reached from any state)
//! ```
//!
//! Each tick the apoptosis checkpoint is evaluated first and, when it
//! fires, pre-empts the ordinary rule. Otherwise the growth checkpoint
//! gates Mitosis → Gap1, the division checkpoint gates Gap1 → Synthesis,
//! and every other edge is unconditional. A checkpoint is only consulted
//! in the state it gates.

use crate::types::CycleState;
use serde::{Deserialize, Serialize};

/// The three predicates the automaton consults.
pub trait Checkpoints {
    /// Entrance into growth after mitosis.
    fn growth(&self) -> bool;
    /// Entrance into division after growth.
    fn division(&self) -> bool;
    /// Emergency entrance into programmed death.
    fn apoptosis(&self) -> bool;
}

/// A tally per phase.
///
/// A controller counts the ticks that ended in each phase; a population
/// summary counts the live cells currently in each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhaseCounts {
    pub mitosis: u64,
    pub gap1: u64,
    pub synthesis: u64,
    pub gap2: u64,
    pub quiescent: u64,
    pub apoptotic: u64,
}

impl PhaseCounts {
    pub fn record(&mut self, state: CycleState) {
        let slot = match state {
            CycleState::Mitosis => &mut self.mitosis,
            CycleState::Gap1 => &mut self.gap1,
            CycleState::Synthesis => &mut self.synthesis,
            CycleState::Gap2 => &mut self.gap2,
            CycleState::QuiescentGap0 => &mut self.quiescent,
            CycleState::Apoptotic => &mut self.apoptotic,
        };
        *slot += 1;
    }

    pub fn get(&self, state: CycleState) -> u64 {
        match state {
            CycleState::Mitosis => self.mitosis,
            CycleState::Gap1 => self.gap1,
            CycleState::Synthesis => self.synthesis,
            CycleState::Gap2 => self.gap2,
            CycleState::QuiescentGap0 => self.quiescent,
            CycleState::Apoptotic => self.apoptotic,
        }
    }

    pub fn total(&self) -> u64 {
        self.mitosis + self.gap1 + self.synthesis + self.gap2 + self.quiescent + self.apoptotic
    }
}

/// Current phase plus bookkeeping of the phases visited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleController {
    state: CycleState,
    counts: PhaseCounts,
}

impl CycleController {
    /// A controller in Mitosis, where cells are born.
    pub fn new() -> Self {
        Self::starting_in(CycleState::Mitosis)
    }

    /// A controller seeded in an arbitrary phase.
    ///
    /// This is the only way into `QuiescentGap0`, which no edge leads to.
    pub fn starting_in(state: CycleState) -> Self {
        Self {
            state,
            counts: PhaseCounts::default(),
        }
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn counts(&self) -> &PhaseCounts {
        &self.counts
    }

    /// The phase the automaton moves to from the current one.
    pub fn transition<C: Checkpoints + ?Sized>(&self, checkpoints: &C) -> CycleState {
        // Emergency: evaluated before anything else.
        if checkpoints.apoptosis() {
            return CycleState::Apoptotic;
        }

        match self.state {
            CycleState::Mitosis if checkpoints.growth() => CycleState::Gap1,
            CycleState::Mitosis => CycleState::Mitosis,
            CycleState::Gap1 if checkpoints.division() => CycleState::Synthesis,
            CycleState::Gap1 => CycleState::Gap1,
            CycleState::Synthesis => CycleState::Gap2,
            CycleState::Gap2 => CycleState::Mitosis,
            CycleState::QuiescentGap0 => CycleState::QuiescentGap0,
            CycleState::Apoptotic => CycleState::Apoptotic,
        }
    }

    /// Take one transition and return the resulting phase.
    pub fn advance<C: Checkpoints + ?Sized>(&mut self, checkpoints: &C) -> CycleState {
        let next = self.transition(checkpoints);
        self.enter(next);
        next
    }

    /// Record a phase produced by [`transition`](Self::transition).
    pub(crate) fn enter(&mut self, next: CycleState) {
        self.state = next;
        self.counts.record(next);
    }
}

impl Default for CycleController {
    fn default() -> Self {
        Self::new()
    }
}
