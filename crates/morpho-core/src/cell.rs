//! Cell — the agent driven through the cell cycle.
//!
//! A cell composes a resource economy, a geometry, a force accumulator
//! and a cycle controller, and binds an action to every phase:
//!
//! | Phase          | Action                                   |
//! |----------------|------------------------------------------|
//! | Mitosis        | none                                     |
//! | Gap1           | nutrient intake, energy intake, growth   |
//! | QuiescentGap0  | nutrient intake, energy intake           |
//! | Synthesis      | division: one daughter, parent survives  |
//! | Gap2           | none                                     |
//! | Apoptotic      | removal requested from the aggregate     |

use crate::aggregate::CellularAggregate;
use crate::config::CellConfig;
use crate::cycle::{Checkpoints, CycleController, PhaseCounts};
use crate::force::ForceAccumulator;
use crate::geometry::{Geometry, DEFAULT_OUTLINE_SIDES};
use crate::render::DiscOutline;
use crate::resources::ResourceEconomy;
use crate::types::*;
use crate::variant::{BaseCell, CellVariant};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A simulated cell.
#[derive(Debug)]
pub struct Cell {
    id: CellId,
    parent_id: CellId,
    generation: u32,
    age: Tick,
    color: Color,
    cycle: CycleController,
    economy: ResourceEconomy,
    geometry: Geometry,
    force: ForceAccumulator,
    aggregate: Option<AggregateId>,
    removal_requested: bool,
    variant: Box<dyn CellVariant>,
}

/// Adapter answering the automaton's checkpoints from the cell's variant.
struct VariantCheckpoints<'a> {
    cell: &'a Cell,
}

impl Checkpoints for VariantCheckpoints<'_> {
    fn growth(&self) -> bool {
        self.cell.variant.growth_checkpoint(self.cell)
    }

    fn division(&self) -> bool {
        self.cell.variant.division_checkpoint(self.cell)
    }

    fn apoptosis(&self) -> bool {
        self.cell.variant.apoptosis_checkpoint(self.cell)
    }
}

impl Cell {
    /// A lonely cell of the base kind, with fresh defaults.
    pub fn new(config: &CellConfig) -> Self {
        Self::with_variant(Box::new(BaseCell), config)
    }

    /// A lonely cell of the given kind, with fresh defaults.
    pub fn with_variant(variant: Box<dyn CellVariant>, config: &CellConfig) -> Self {
        Self {
            id: CellId::next(),
            parent_id: CellId::NONE,
            generation: 0,
            age: 0,
            color: config.default_color(),
            cycle: CycleController::new(),
            economy: ResourceEconomy::new(config),
            geometry: Geometry::new(config),
            force: ForceAccumulator::new(),
            aggregate: None,
            removal_requested: false,
            variant,
        }
    }

    /// Override the initial radius (clamped to the growth limit).
    pub fn with_radius(mut self, radius: f64, config: &CellConfig) -> Self {
        self.geometry = Geometry::with_radius(radius, config);
        self
    }

    /// Seed the cell in a given phase, e.g. `QuiescentGap0`.
    pub fn with_cycle_state(mut self, state: CycleState) -> Self {
        self.cycle = CycleController::starting_in(state);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    // --- Identity and lineage ---

    pub fn id(&self) -> CellId {
        self.id
    }

    /// Identifier of the parent, `CellId::NONE` for a lonely cell.
    pub fn parent_id(&self) -> CellId {
        self.parent_id
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Number of ticks this cell has lived through.
    pub fn age(&self) -> Tick {
        self.age
    }

    pub fn kind(&self) -> &str {
        self.variant.kind()
    }

    pub fn variant(&self) -> &dyn CellVariant {
        self.variant.as_ref()
    }

    // --- Aggregate relation ---

    pub fn aggregate(&self) -> Option<AggregateId> {
        self.aggregate
    }

    pub fn set_aggregate(&mut self, aggregate: AggregateId) {
        self.aggregate = Some(aggregate);
    }

    // --- State ---

    pub fn cycle_state(&self) -> CycleState {
        self.cycle.state()
    }

    pub fn phase_counts(&self) -> &PhaseCounts {
        self.cycle.counts()
    }

    pub fn radius(&self) -> f64 {
        self.geometry.radius()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn nutrients(&self) -> f64 {
        self.economy.nutrients()
    }

    pub fn energy(&self) -> f64 {
        self.economy.energy()
    }

    pub fn economy(&self) -> &ResourceEconomy {
        &self.economy
    }

    /// Whether this cell has asked its aggregate to remove it.
    pub fn removal_requested(&self) -> bool {
        self.removal_requested
    }

    // --- Forces (driven by the aggregate) ---

    pub fn add_force(&mut self, force: Vector2) {
        self.force.add(force);
    }

    pub fn clear_force(&mut self) {
        self.force.clear();
    }

    pub fn force(&self) -> Vector2 {
        self.force.get()
    }

    // --- Factory ---

    /// Create a daughter of the same kind.
    ///
    /// The daughter gets a fresh identifier, records this cell as its
    /// parent and shares its aggregate handle. It is not inserted
    /// anywhere: registration is the aggregate's job.
    pub fn create_new(&self, config: &CellConfig) -> Cell {
        let mut child = Cell::with_variant(self.variant.create_new(), config);
        child.parent_id = self.id;
        child.generation = self.generation.saturating_add(1);
        child.aggregate = self.aggregate;
        child
    }

    // --- Life cycle ---

    /// Execute one tick of the cell cycle.
    ///
    /// The apoptosis checkpoint is evaluated first, then the ordinary
    /// transition, then the action bound to the resulting phase.
    /// Returns the phase the cell ends the tick in.
    pub fn advance_time_step(
        &mut self,
        config: &CellConfig,
        aggregate: &mut dyn CellularAggregate,
    ) -> CycleState {
        self.age += 1;

        let next = {
            let checkpoints = VariantCheckpoints { cell: &*self };
            self.cycle.transition(&checkpoints)
        };
        self.cycle.enter(next);

        match next {
            CycleState::Mitosis => {}
            CycleState::Gap1 => {
                // Eat and grow
                self.nutrients_intake(config);
                self.energy_intake(config);
                self.grow(config);
            }
            CycleState::QuiescentGap0 => {
                self.nutrients_intake(config);
                self.energy_intake(config);
            }
            CycleState::Synthesis => self.divide(config, aggregate),
            CycleState::Gap2 => {}
            CycleState::Apoptotic => self.apoptosis(aggregate),
        }

        next
    }

    pub fn nutrients_intake(&mut self, config: &CellConfig) {
        self.economy.nutrients_intake(config);
    }

    pub fn energy_intake(&mut self, config: &CellConfig) {
        self.economy.energy_intake(config);
    }

    /// Grow if nutrients and energy are above the self-repair levels.
    pub fn grow(&mut self, config: &CellConfig) -> bool {
        self.geometry.grow(&self.economy, config)
    }

    /// Produce exactly one daughter and hand it to the aggregate.
    fn divide(&mut self, config: &CellConfig, aggregate: &mut dyn CellularAggregate) {
        let child = self.create_new(config);
        debug!(parent = %self.id, child = %child.id, kind = self.kind(), "cell divided");
        aggregate.insert(child);
    }

    /// Programmed cell death: ask the aggregate to remove this cell.
    ///
    /// The request is made once; later ticks in `Apoptotic` do not repeat it.
    fn apoptosis(&mut self, aggregate: &mut dyn CellularAggregate) {
        if self.removal_requested {
            return;
        }
        self.removal_requested = true;
        debug!(cell = %self.id, age = self.age, "apoptosis requested");
        aggregate.remove(self.id);
    }

    // --- Presentation ---

    /// Outline of the cell at `position`, as a 12-sided polygon.
    pub fn draw(&self, position: Position) -> DiscOutline {
        self.draw_with_sides(position, DEFAULT_OUTLINE_SIDES)
    }

    pub fn draw_with_sides(&self, position: Position, sides: usize) -> DiscOutline {
        DiscOutline {
            center: position,
            color: self.color,
            vertices: self.geometry.outline(position, sides),
        }
    }

    pub fn snapshot(&self) -> CellSnapshot {
        CellSnapshot {
            id: self.id,
            parent_id: self.parent_id,
            generation: self.generation,
            kind: self.kind().to_string(),
            state: self.cycle_state(),
            age: self.age,
            radius: self.radius(),
            color: self.color,
            nutrients: self.nutrients(),
            energy: self.energy(),
            force: self.force(),
        }
    }
}

/// A serializable snapshot of a cell's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub id: CellId,
    pub parent_id: CellId,
    pub generation: u32,
    pub kind: String,
    pub state: CycleState,
    pub age: Tick,
    pub radius: f64,
    pub color: Color,
    pub nutrients: f64,
    pub energy: f64,
    pub force: Vector2,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::PendingChanges;

    #[derive(Debug, Clone, Copy)]
    struct Gated {
        growth: bool,
        division: bool,
        die_at_age: Option<Tick>,
    }

    impl CellVariant for Gated {
        fn kind(&self) -> &str {
            "gated"
        }
        fn growth_checkpoint(&self, _cell: &Cell) -> bool {
            self.growth
        }
        fn division_checkpoint(&self, _cell: &Cell) -> bool {
            self.division
        }
        fn apoptosis_checkpoint(&self, cell: &Cell) -> bool {
            self.die_at_age.is_some_and(|age| cell.age() >= age)
        }
        fn create_new(&self) -> Box<dyn CellVariant> {
            Box::new(*self)
        }
    }

    fn owner() -> PendingChanges {
        PendingChanges::new(AggregateId::new(1))
    }

    #[test]
    fn lonely_cell_defaults() {
        let config = CellConfig::default();
        let cell = Cell::new(&config);
        assert_eq!(cell.cycle_state(), CycleState::Mitosis);
        assert_eq!(cell.parent_id(), CellId::NONE);
        assert_eq!(cell.generation(), 0);
        assert_eq!(cell.radius(), 10.0);
        assert_eq!(cell.nutrients(), 1.0);
        assert_eq!(cell.energy(), 1.0);
        assert_eq!(cell.force(), Vector2::ZERO);
        assert_eq!(cell.aggregate(), None);
        assert_eq!(cell.color(), Color::WHITE);
    }

    #[test]
    fn default_cell_cycles_with_period_four() {
        let config = CellConfig::default();
        let mut cell = Cell::new(&config);
        let mut owner = owner();
        let period = [
            CycleState::Gap1,
            CycleState::Synthesis,
            CycleState::Gap2,
            CycleState::Mitosis,
        ];
        for _ in 0..3 {
            for expected in period {
                assert_eq!(cell.advance_time_step(&config, &mut owner), expected);
            }
        }
        assert_eq!(owner.births().len(), 3, "one daughter per Synthesis");
        assert!(owner.removals().is_empty());
    }

    #[test]
    fn gap1_feeds_and_grows() {
        let config = CellConfig::default();
        let mut cell = Cell::new(&config);
        cell.advance_time_step(&config, &mut owner());
        assert_eq!(cell.cycle_state(), CycleState::Gap1);
        assert_eq!(cell.nutrients(), 2.0);
        assert_eq!(cell.energy(), 2.0);
        assert!((cell.radius() - 10.01).abs() < 1e-12);
    }

    #[test]
    fn quiescent_cell_feeds_without_growing() {
        let config = CellConfig::default();
        let mut cell = Cell::new(&config).with_cycle_state(CycleState::QuiescentGap0);
        let mut owner = owner();
        for _ in 0..5 {
            assert_eq!(cell.advance_time_step(&config, &mut owner), CycleState::QuiescentGap0);
        }
        assert_eq!(cell.nutrients(), 6.0);
        assert_eq!(cell.energy(), 6.0);
        assert_eq!(cell.radius(), 10.0);
        assert!(owner.is_empty());
    }

    #[test]
    fn apoptosis_requests_removal_once_and_stays_apoptotic() {
        let config = CellConfig::default();
        let variant = Gated {
            growth: true,
            division: true,
            die_at_age: Some(3),
        };
        let mut cell = Cell::with_variant(Box::new(variant), &config);
        let mut owner = owner();

        cell.advance_time_step(&config, &mut owner);
        cell.advance_time_step(&config, &mut owner);
        assert_ne!(cell.cycle_state(), CycleState::Apoptotic);

        for _ in 0..4 {
            assert_eq!(cell.advance_time_step(&config, &mut owner), CycleState::Apoptotic);
        }
        assert_eq!(owner.removals(), &[cell.id()]);
        assert!(cell.removal_requested());
    }

    #[test]
    fn create_new_records_lineage() {
        let config = CellConfig::default();
        let mut parent = Cell::new(&config);
        parent.set_aggregate(AggregateId::new(77));
        let issued_before = CellId::last_issued();

        let child = parent.create_new(&config);
        assert_eq!(child.parent_id(), parent.id());
        assert!(child.id() > issued_before);
        assert!(child.id() > parent.id());
        assert_eq!(child.generation(), 1);
        assert_eq!(child.aggregate(), Some(AggregateId::new(77)));
        assert_eq!(child.cycle_state(), CycleState::Mitosis);
        assert_eq!(child.radius(), config.default_radius());
    }

    #[test]
    fn daughter_keeps_parent_kind() {
        let config = CellConfig::default();
        let variant = Gated {
            growth: false,
            division: false,
            die_at_age: None,
        };
        let parent = Cell::with_variant(Box::new(variant), &config);
        assert_eq!(parent.create_new(&config).kind(), "gated");
    }

    #[test]
    fn radius_never_exceeds_limit() {
        let mut config = CellConfig::default();
        config.set_growth_radius_increment(0.7).unwrap();
        let variant = Gated {
            growth: true,
            division: false,
            die_at_age: None,
        };
        let mut cell = Cell::with_variant(Box::new(variant), &config);
        let mut owner = owner();
        let mut previous = cell.radius();
        for _ in 0..100 {
            cell.advance_time_step(&config, &mut owner);
            assert!(cell.radius() <= config.growth_radius_limit());
            assert!(cell.radius() >= previous);
            previous = cell.radius();
        }
        assert_eq!(cell.radius(), 20.0);
    }

    #[test]
    fn force_accumulates_between_clears() {
        let config = CellConfig::default();
        let mut cell = Cell::new(&config);
        cell.clear_force();
        assert_eq!(cell.force(), Vector2::ZERO);
        cell.add_force(Vector2::new(1.0, 0.0));
        cell.add_force(Vector2::new(0.0, 1.0));
        assert_eq!(cell.force(), Vector2::new(1.0, 1.0));
    }

    #[test]
    fn draw_produces_twelve_sided_outline() {
        let config = CellConfig::default();
        let cell = Cell::new(&config).with_color(Color::new(1.0, 0.0, 0.0));
        let outline = cell.draw(Position::new(0.0, 0.0));
        assert_eq!(outline.vertices.len(), 12);
        assert_eq!(outline.color, Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn snapshot_serializes() {
        let config = CellConfig::default();
        let cell = Cell::new(&config);
        let json = serde_json::to_string(&cell.snapshot()).unwrap();
        assert!(json.contains("\"state\":\"Mitosis\""));
        assert!(json.contains("\"kind\":\"cell\""));
    }
}
