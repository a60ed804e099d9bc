//! Aggregate — population management for cells.
//!
//! The aggregate is the tissue. It owns the cells and their positions,
//! runs the tick-based simulation loop, and is the only place cells are
//! inserted or removed.
//!
//! Each tick:
//! 1. Every cell's force is cleared, then queued forces are applied
//! 2. Every cell advances one cell-cycle step
//! 3. Cells move by their accumulated force
//! 4. Removals requested during the tick are swept
//! 5. Daughters born during the tick are registered near their parent
//! 6. The tick counter and simulated time advance

use morpho_core::aggregate::{CellularAggregate, PendingChanges};
use morpho_core::cell::{Cell, CellSnapshot};
use morpho_core::config::CellConfig;
use morpho_core::error::{AggregateError, ConfigError, Result};
use morpho_core::types::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Angle between successive daughters, so siblings spread around a parent.
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Event emitted by the aggregate during simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AggregateEvent {
    /// A cell was inserted from outside the simulation.
    Inserted { id: CellId, position: Position },
    /// A cell divided and its daughter was registered.
    Divided { parent: CellId, child: CellId },
    /// A daughter was dropped because the population is full.
    BirthSuppressed { parent: CellId, child: CellId },
    /// A cell was removed after apoptosis.
    Died { id: CellId, age: Tick, generation: u32 },
    /// Removal was requested for a cell that is not a member.
    RemovalMissed { id: CellId },
    /// A tick completed.
    TickComplete { tick: Tick, alive: usize, born: usize, died: usize },
}

/// Statistics about the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateStats {
    pub tick: Tick,
    pub time: f64,
    pub alive: usize,
    pub total_inserted: usize,
    pub total_born: usize,
    pub total_died: usize,
    pub mean_radius: f64,
}

/// A serializable snapshot of one member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberSnapshot {
    pub position: Position,
    #[serde(flatten)]
    pub cell: CellSnapshot,
}

/// A complete serializable snapshot of the aggregate at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateSnapshot {
    pub tick: Tick,
    pub time: f64,
    pub cells: Vec<MemberSnapshot>,
    pub stats: AggregateStats,
}

/// Configuration for aggregate simulation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateConfig {
    /// Simulated time per tick (default: 1.0).
    #[serde(default = "default_time_step")]
    pub time_step: f64,
    /// Displacement per unit force per unit time (default: 0.1).
    #[serde(default = "default_mobility")]
    pub mobility: f64,
    /// Distance from the parent at which daughters are placed (default: 10.0).
    #[serde(default = "default_division_offset")]
    pub division_offset: f64,
    /// Births beyond this population are dropped (default: 10000).
    #[serde(default = "default_max_population")]
    pub max_population: usize,
    /// Parameters shared by every cell.
    #[serde(default)]
    pub cell: CellConfig,
}

fn default_time_step() -> f64 { 1.0 }
fn default_mobility() -> f64 { 0.1 }
fn default_division_offset() -> f64 { 10.0 }
fn default_max_population() -> usize { 10_000 }

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            time_step: default_time_step(),
            mobility: default_mobility(),
            division_offset: default_division_offset(),
            max_population: default_max_population(),
            cell: CellConfig::default(),
        }
    }
}

impl AggregateConfig {
    pub fn validate(&self) -> Result<()> {
        self.cell.validate()?;
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(ConfigError::Inconsistent {
                field: "time_step",
                value: self.time_step,
                reason: "must be positive".to_string(),
            }
            .into());
        }
        for (field, value) in [
            ("mobility", self.mobility),
            ("division_offset", self.division_offset),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value }.into());
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value }.into());
            }
        }
        Ok(())
    }
}

/// A cell and where it sits.
#[derive(Debug)]
pub struct Member {
    pub cell: Cell,
    pub position: Position,
}

/// The aggregate — owns the population and drives the simulation.
pub struct Aggregate {
    id: AggregateId,
    config: AggregateConfig,
    members: Vec<Member>,
    pending: PendingChanges,
    queued_forces: Vec<(CellId, Vector2)>,
    event_history: Vec<(Tick, AggregateEvent)>,
    tick: Tick,
    time: f64,
    total_inserted: usize,
    total_born: usize,
    total_died: usize,
}

impl Aggregate {
    /// Create a new aggregate with default configuration.
    pub fn new() -> Self {
        Self::with_valid_config(AggregateConfig::default())
    }

    /// Create a new aggregate with the specified configuration.
    ///
    /// Fails if the configuration does not validate.
    pub fn from_config(config: AggregateConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: AggregateConfig) -> Self {
        let id = AggregateId::fresh();
        Self {
            id,
            config,
            members: Vec::new(),
            pending: PendingChanges::new(id),
            queued_forces: Vec::new(),
            event_history: Vec::new(),
            tick: 0,
            time: 0.0,
            total_inserted: 0,
            total_born: 0,
            total_died: 0,
        }
    }

    pub fn id(&self) -> AggregateId {
        self.id
    }

    pub fn config(&self) -> &AggregateConfig {
        &self.config
    }

    pub fn cell_config(&self) -> &CellConfig {
        &self.config.cell
    }

    /// Mutable access to the cell parameters, written through their
    /// validating setters.
    ///
    /// Changes are seen by every cell from its next tick on.
    pub fn cell_config_mut(&mut self) -> &mut CellConfig {
        &mut self.config.cell
    }

    /// Insert a cell at a position, making this aggregate its owner.
    pub fn insert(&mut self, mut cell: Cell, position: Position) -> Result<CellId> {
        let id = cell.id();
        if self.contains(id) {
            return Err(AggregateError::AlreadyPresent(id).into());
        }
        if self.members.len() >= self.config.max_population {
            return Err(AggregateError::PopulationFull {
                limit: self.config.max_population,
            }
            .into());
        }
        cell.set_aggregate(self.id);
        self.members.push(Member { cell, position });
        self.total_inserted += 1;
        self.record(AggregateEvent::Inserted { id, position });
        Ok(id)
    }

    /// Create a fresh cell of the base kind at `position` and insert it.
    pub fn spawn(&mut self, position: Position) -> Result<CellId> {
        let cell = Cell::new(&self.config.cell);
        self.insert(cell, position)
    }

    /// Remove a cell immediately, outside the tick loop.
    pub fn remove_now(&mut self, id: CellId) -> Result<Cell> {
        let idx = self
            .index_of(id)
            .ok_or(AggregateError::CellNotFound(id))?;
        Ok(self.members.remove(idx).cell)
    }

    /// Queue a force to be applied to a cell during the next tick.
    pub fn push_force(&mut self, id: CellId, force: Vector2) {
        self.queued_forces.push((id, force));
    }

    /// Run a single simulation tick.
    pub fn tick(&mut self) -> Vec<AggregateEvent> {
        let mut events = Vec::new();

        // Phase 1: forces for this tick, before any cell advances
        for member in &mut self.members {
            member.cell.clear_force();
        }
        for (id, force) in std::mem::take(&mut self.queued_forces) {
            match self.members.iter_mut().find(|m| m.cell.id() == id) {
                Some(member) => member.cell.add_force(force),
                None => warn!(cell = %id, "force queued for a cell that is not a member"),
            }
        }

        // Phase 2: every cell advances; requests are only collected
        let cell_config = &self.config.cell;
        let pending = &mut self.pending;
        for member in self.members.iter_mut() {
            member.cell.advance_time_step(cell_config, &mut *pending);
        }

        // Phase 3: motion
        let step = self.config.mobility * self.config.time_step;
        for member in &mut self.members {
            member.position += member.cell.force() * step;
        }

        // Phase 4: sweep the dead
        let (removals, births) = self.pending.take();
        let mut died = 0;
        for id in removals {
            let event = self.remove_member(id);
            if matches!(event, AggregateEvent::Died { .. }) {
                died += 1;
            }
            events.push(event);
        }

        // Phase 5: register daughters
        let mut born = 0;
        for child in births {
            let event = self.register_birth(child);
            if matches!(event, AggregateEvent::Divided { .. }) {
                born += 1;
            }
            events.push(event);
        }

        self.tick += 1;
        self.time += self.config.time_step;

        events.push(AggregateEvent::TickComplete {
            tick: self.tick,
            alive: self.members.len(),
            born,
            died,
        });

        for event in &events {
            self.event_history.push((self.tick, event.clone()));
        }

        events
    }

    /// Run multiple ticks.
    pub fn run(&mut self, ticks: u64) -> Vec<Vec<AggregateEvent>> {
        (0..ticks).map(|_| self.tick()).collect()
    }

    /// Drop the whole population and rewind the clock, keeping the configuration.
    pub fn restart(&mut self) {
        self.members.clear();
        self.pending = PendingChanges::new(self.id);
        self.queued_forces.clear();
        self.event_history.clear();
        self.tick = 0;
        self.time = 0.0;
        self.total_inserted = 0;
        self.total_born = 0;
        self.total_died = 0;
    }

    pub fn get(&self, id: CellId) -> Option<&Cell> {
        self.members.iter().find(|m| m.cell.id() == id).map(|m| &m.cell)
    }

    pub fn position(&self, id: CellId) -> Option<Position> {
        self.members.iter().find(|m| m.cell.id() == id).map(|m| m.position)
    }

    pub fn contains(&self, id: CellId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.members.iter().map(|m| &m.cell)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    /// Simulated time elapsed since the start (or last restart).
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn event_history(&self) -> &[(Tick, AggregateEvent)] {
        &self.event_history
    }

    pub fn stats(&self) -> AggregateStats {
        let mean_radius = if self.members.is_empty() {
            0.0
        } else {
            self.cells().map(Cell::radius).sum::<f64>() / self.members.len() as f64
        };
        AggregateStats {
            tick: self.tick,
            time: self.time,
            alive: self.members.len(),
            total_inserted: self.total_inserted,
            total_born: self.total_born,
            total_died: self.total_died,
            mean_radius,
        }
    }

    pub fn snapshot(&self) -> AggregateSnapshot {
        AggregateSnapshot {
            tick: self.tick,
            time: self.time,
            cells: self
                .members
                .iter()
                .map(|m| MemberSnapshot {
                    position: m.position,
                    cell: m.cell.snapshot(),
                })
                .collect(),
            stats: self.stats(),
        }
    }

    fn index_of(&self, id: CellId) -> Option<usize> {
        self.members.iter().position(|m| m.cell.id() == id)
    }

    /// Take a dead cell out of the population.
    fn remove_member(&mut self, id: CellId) -> AggregateEvent {
        match self.index_of(id) {
            Some(idx) => {
                let cell = self.members.remove(idx).cell;
                debug!(cell = %id, age = cell.age(), "cell removed");
                self.total_died += 1;
                AggregateEvent::Died {
                    id,
                    age: cell.age(),
                    generation: cell.generation(),
                }
            }
            None => {
                warn!(cell = %id, aggregate = %self.id, "removal requested for a cell that is not a member");
                AggregateEvent::RemovalMissed { id }
            }
        }
    }

    /// Place a daughter next to its parent, unless the population is full.
    fn register_birth(&mut self, mut child: Cell) -> AggregateEvent {
        let parent = child.parent_id();
        let child_id = child.id();
        if self.members.len() >= self.config.max_population {
            debug!(parent = %parent, child = %child_id, "population full, daughter dropped");
            return AggregateEvent::BirthSuppressed { parent, child: child_id };
        }
        let origin = self.position(parent).unwrap_or(Position::ZERO);
        let position = origin + self.division_offset();
        child.set_aggregate(self.id);
        self.members.push(Member { cell: child, position });
        self.total_born += 1;
        AggregateEvent::Divided { parent, child: child_id }
    }

    fn division_offset(&self) -> Vector2 {
        let angle = self.total_born as f64 * GOLDEN_ANGLE;
        Vector2::new(angle.cos(), angle.sin()) * self.config.division_offset
    }

    fn record(&mut self, event: AggregateEvent) {
        self.event_history.push((self.tick, event));
    }
}

impl Default for Aggregate {
    fn default() -> Self {
        Self::new()
    }
}

/// Requests made directly against the aggregate (outside its own tick)
/// take effect immediately.
impl CellularAggregate for Aggregate {
    fn aggregate_id(&self) -> AggregateId {
        self.id
    }

    fn remove(&mut self, id: CellId) {
        let event = self.remove_member(id);
        self.record(event);
    }

    fn insert(&mut self, cell: Cell) {
        if self.contains(cell.id()) {
            warn!(cell = %cell.id(), aggregate = %self.id, "insertion refused, already a member");
            return;
        }
        let event = self.register_birth(cell);
        self.record(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morpho_core::variant::CellVariant;

    #[derive(Debug, Clone, Copy)]
    struct NeverDivides;

    impl CellVariant for NeverDivides {
        fn kind(&self) -> &str {
            "never-divides"
        }
        fn division_checkpoint(&self, _cell: &Cell) -> bool {
            false
        }
        fn create_new(&self) -> Box<dyn CellVariant> {
            Box::new(*self)
        }
    }

    fn resting_cell(aggregate: &Aggregate) -> Cell {
        Cell::with_variant(Box::new(NeverDivides), aggregate.cell_config())
    }

    #[test]
    fn insert_and_count_cells() {
        let mut aggregate = Aggregate::new();
        let a = aggregate.spawn(Position::new(0.0, 0.0)).unwrap();
        aggregate.spawn(Position::new(5.0, 5.0)).unwrap();
        assert_eq!(aggregate.len(), 2);
        assert_eq!(aggregate.stats().total_inserted, 2);
        assert_eq!(aggregate.get(a).unwrap().aggregate(), Some(aggregate.id()));
    }

    #[test]
    fn remove_now_only_touches_members() {
        let mut aggregate = Aggregate::new();
        let cell = resting_cell(&aggregate);
        let id = aggregate.insert(cell, Position::ZERO).unwrap();

        let mut other = Aggregate::new();
        assert!(other.remove_now(id).is_err());

        let removed = aggregate.remove_now(id).unwrap();
        assert_eq!(removed.id(), id);
        assert!(aggregate.is_empty());
        assert!(aggregate.remove_now(id).is_err());
    }

    #[test]
    fn tick_advances_clock() {
        let mut aggregate = Aggregate::from_config(AggregateConfig {
            time_step: 0.5,
            ..AggregateConfig::default()
        })
        .unwrap();
        aggregate.spawn(Position::ZERO).unwrap();
        aggregate.run(4);
        assert_eq!(aggregate.current_tick(), 4);
        assert!((aggregate.time() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn division_registers_one_daughter_and_parent_survives() {
        let mut aggregate = Aggregate::new();
        let parent = aggregate.spawn(Position::new(1.0, 1.0)).unwrap();

        aggregate.tick(); // M -> G1
        let events = aggregate.tick(); // G1 -> S: division

        assert_eq!(aggregate.len(), 2);
        assert!(aggregate.contains(parent));
        let child = aggregate
            .cells()
            .find(|c| c.id() != parent)
            .unwrap();
        assert_eq!(child.parent_id(), parent);
        assert_eq!(child.aggregate(), Some(aggregate.id()));
        assert!(events.contains(&AggregateEvent::Divided { parent, child: child.id() }));

        let offset = aggregate
            .position(child.id())
            .unwrap()
            .distance_to(&Position::new(1.0, 1.0));
        assert!((offset - 10.0).abs() < 1e-9);
    }

    #[test]
    fn queued_forces_move_cells_and_are_cleared_next_tick() {
        let mut aggregate = Aggregate::from_config(AggregateConfig {
            mobility: 1.0,
            ..AggregateConfig::default()
        })
        .unwrap();
        let cell = resting_cell(&aggregate);
        let id = aggregate.insert(cell, Position::ZERO).unwrap();

        aggregate.push_force(id, Vector2::new(1.0, 0.0));
        aggregate.push_force(id, Vector2::new(0.0, 1.0));
        aggregate.tick();
        assert_eq!(aggregate.get(id).unwrap().force(), Vector2::new(1.0, 1.0));
        assert_eq!(aggregate.position(id), Some(Position::new(1.0, 1.0)));

        aggregate.tick();
        assert_eq!(aggregate.get(id).unwrap().force(), Vector2::ZERO);
        assert_eq!(aggregate.position(id), Some(Position::new(1.0, 1.0)));
    }

    #[test]
    fn population_cap_drops_daughters() {
        let mut aggregate = Aggregate::from_config(AggregateConfig {
            max_population: 1,
            ..AggregateConfig::default()
        })
        .unwrap();
        let parent = aggregate.spawn(Position::ZERO).unwrap();
        aggregate.tick();
        let events = aggregate.tick();
        assert_eq!(aggregate.len(), 1);
        assert!(events
            .iter()
            .any(|e| matches!(e, AggregateEvent::BirthSuppressed { parent: p, .. } if *p == parent)));
        assert!(aggregate.spawn(Position::ZERO).is_err());
    }

    #[test]
    fn direct_removal_of_unknown_cell_is_tolerated() {
        let mut aggregate = Aggregate::new();
        aggregate.spawn(Position::ZERO).unwrap();
        CellularAggregate::remove(&mut aggregate, CellId(u64::MAX));
        assert_eq!(aggregate.len(), 1);
        assert!(aggregate
            .event_history()
            .iter()
            .any(|(_, e)| *e == AggregateEvent::RemovalMissed { id: CellId(u64::MAX) }));
    }

    #[test]
    fn direct_removal_records_the_death() {
        let mut aggregate = Aggregate::new();
        let id = aggregate.spawn(Position::ZERO).unwrap();
        let age = aggregate.get(id).unwrap().age();

        CellularAggregate::remove(&mut aggregate, id);

        assert!(aggregate.is_empty());
        assert_eq!(aggregate.stats().total_died, 1);
        assert!(aggregate
            .event_history()
            .iter()
            .any(|(_, e)| *e == AggregateEvent::Died { id, age, generation: 0 }));
    }

    #[test]
    fn direct_insert_places_daughter_beside_parent() {
        let mut aggregate = Aggregate::new();
        let origin = Position::new(-4.0, 7.0);
        let cell = resting_cell(&aggregate);
        let parent = aggregate.insert(cell, origin).unwrap();
        let daughter = aggregate.get(parent).unwrap().create_new(aggregate.cell_config());
        let child = daughter.id();

        CellularAggregate::insert(&mut aggregate, daughter);

        assert_eq!(aggregate.len(), 2);
        assert_eq!(aggregate.stats().total_born, 1);
        let offset = aggregate.position(child).unwrap().distance_to(&origin);
        assert!((offset - 10.0).abs() < 1e-9);
        assert!(aggregate
            .event_history()
            .iter()
            .any(|(_, e)| *e == AggregateEvent::Divided { parent, child }));
    }

    #[test]
    fn direct_insert_respects_population_cap() {
        let mut aggregate = Aggregate::from_config(AggregateConfig {
            max_population: 1,
            ..AggregateConfig::default()
        })
        .unwrap();
        let cell = resting_cell(&aggregate);
        let parent = aggregate.insert(cell, Position::ZERO).unwrap();
        let daughter = aggregate.get(parent).unwrap().create_new(aggregate.cell_config());

        CellularAggregate::insert(&mut aggregate, daughter);

        assert_eq!(aggregate.len(), 1);
        assert!(aggregate
            .event_history()
            .iter()
            .any(|(_, e)| matches!(e, AggregateEvent::BirthSuppressed { .. })));
    }

    #[test]
    fn restart_clears_population_but_keeps_config() {
        let mut aggregate = Aggregate::new();
        aggregate.cell_config_mut().set_growth_radius_limit(15.0).unwrap();
        aggregate.spawn(Position::ZERO).unwrap();
        aggregate.run(6);
        aggregate.restart();

        assert!(aggregate.is_empty());
        assert_eq!(aggregate.current_tick(), 0);
        assert_eq!(aggregate.time(), 0.0);
        assert!(aggregate.event_history().is_empty());
        assert_eq!(aggregate.cell_config().growth_radius_limit(), 15.0);
    }

    #[test]
    fn invalid_config_is_reported() {
        let config = AggregateConfig {
            time_step: 0.0,
            ..AggregateConfig::default()
        };
        assert!(config.validate().is_err());
        let config = AggregateConfig {
            mobility: -1.0,
            ..AggregateConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(AggregateConfig::default().validate().is_ok());
    }

    #[test]
    fn from_config_refuses_invalid_config() {
        assert!(Aggregate::from_config(AggregateConfig {
            time_step: -1.0,
            ..AggregateConfig::default()
        })
        .is_err());
        assert!(Aggregate::from_config(AggregateConfig {
            division_offset: f64::NAN,
            ..AggregateConfig::default()
        })
        .is_err());
        assert!(Aggregate::from_config(AggregateConfig::default()).is_ok());
    }

    #[test]
    fn deserialized_config_with_bad_cell_limit_is_refused() {
        for json in [
            r#"{ "cell": { "growth_radius_limit": -1.0 } }"#,
            r#"{ "cell": { "default_radius": 25.0 } }"#,
        ] {
            let parsed: std::result::Result<AggregateConfig, _> = serde_json::from_str(json);
            assert!(parsed.is_err(), "{json} was accepted");
        }
    }

    #[test]
    fn bad_cell_parameters_leave_spawning_intact() {
        let mut aggregate = Aggregate::new();
        assert!(aggregate.cell_config_mut().set_growth_radius_limit(f64::NAN).is_err());
        assert!(aggregate.cell_config_mut().set_growth_radius_limit(-1.0).is_err());
        assert!(aggregate.cell_config_mut().set_growth_radius_limit(2.0).is_err());

        let id = aggregate.spawn(Position::ZERO).unwrap();
        assert_eq!(aggregate.get(id).unwrap().radius(), 10.0);
    }

    #[test]
    fn snapshot_serializes_members() {
        let mut aggregate = Aggregate::new();
        aggregate.spawn(Position::new(2.0, 3.0)).unwrap();
        aggregate.tick();
        let json = serde_json::to_value(aggregate.snapshot()).unwrap();
        assert_eq!(json["tick"], 1);
        assert_eq!(json["cells"][0]["state"], "Gap1");
        assert_eq!(json["cells"][0]["position"]["x"], 2.0);
        assert_eq!(json["stats"]["alive"], 1);
    }
}
