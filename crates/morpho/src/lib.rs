//! # Morpho
//!
//! Agent-based simulation of cells moving through the cell cycle.
//!
//! Every cell runs its own automaton over the phases of the cycle
//! (mitosis, growth, synthesis, a resting gap, quiescence and programmed
//! death), keeps nutrient and energy reserves, grows a disc-shaped body
//! up to a configured limit and accumulates the forces applied to it.
//! An aggregate owns the population, advances every cell once per tick
//! and applies the divisions and deaths they request.
//!
//! ## Quick Start
//!
//! ```rust
//! use morpho::prelude::*;
//!
//! let mut aggregate = Aggregate::new();
//! seed(&mut aggregate, &SeedPlan {
//!     count: 4,
//!     variant: VariantKind::Senescent { hayflick_limit: 3, lifespan: None },
//!     ..SeedPlan::default()
//! }).unwrap();
//!
//! aggregate.run(20);
//!
//! let summary = summarize(&aggregate);
//! println!("{} cells, mean radius {:.2}", summary.alive, summary.mean_radius);
//! ```
//!
//! ## Architecture
//!
//! - [`morpho_core`] - The cell, its automaton and the aggregate contract
//! - [`morpho_agents`] - Cell variants with domain checkpoints
//! - [`morpho_runtime`] - The reference aggregate, seeding and export
//!
//! ## Checkpoints
//!
//! | Checkpoint | Gates | Default |
//! |------------|-------|---------|
//! | growth | Mitosis → Gap1 | open |
//! | division | Gap1 → Synthesis | open |
//! | apoptosis | any → Apoptotic, evaluated first | closed |
//!
//! A cell with default checkpoints cycles Mitosis → Gap1 → Synthesis →
//! Gap2 → Mitosis forever, dividing once per round.

// Re-export all subcrates
pub use morpho_core as core;
pub use morpho_runtime as runtime;
pub use morpho_agents as agents;

/// Prelude module for convenient imports.
///
/// ```rust
/// use morpho::prelude::*;
/// ```
pub mod prelude {
    pub use morpho_core::prelude::*;

    // Agents
    pub use morpho_agents::contact::ContactInhibitedCell;
    pub use morpho_agents::kind::VariantKind;
    pub use morpho_agents::senescent::SenescentCell;
    pub use morpho_agents::size_gated::SizeGatedCell;

    // Runtime
    pub use morpho_runtime::aggregate::{
        Aggregate, AggregateConfig, AggregateEvent, AggregateSnapshot, AggregateStats, Member,
        MemberSnapshot,
    };
    pub use morpho_runtime::export::{export_json, outlines, summarize, PopulationSummary};
    pub use morpho_runtime::seed::{layout_positions, seed, Layout, SeedPlan};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
