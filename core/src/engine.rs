//! The simulation engine: one pursue + flee cycle per step.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Human-sourced distance field   (from start-of-step humans)
//!   2. Zombie-sourced distance field  (from start-of-step zombies)
//!   3. Zombie plan: pursue, 4-connected, against field 1
//!   4. Human plan:  flee,   8-connected, against field 2
//!   5. Swap in the zombie list, then the human list
//!
//! RULES:
//!   - Both fields are taken before anything moves; no entity sees another's
//!     move within the same step.
//!   - Lists are replaced whole, after the plans are complete.
//!   - All randomness flows through the RngBank.
//!   - Every step's events are recorded in the event log.
//!   - No terminal condition: the host decides when to stop.

use crate::{
    command::HostCommand,
    config::SimConfig,
    distance::{compute_distance_field, DistanceField},
    entity::EntityRegistry,
    error::{SimError, SimResult},
    event::{EventLogEntry, SimEvent},
    grid::Grid,
    movement::plan_moves,
    rng::{RngBank, RngSlot, SubsystemRng},
    snapshot::SimSnapshot,
    types::{EntityKind, Position, RunId, Tick},
};
use std::collections::BTreeMap;

/// A cell currently shared by at least one human and one zombie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactCell {
    pub position: Position,
    pub humans:   usize,
    pub zombies:  usize,
}

pub struct SimEngine {
    pub run_id:   RunId,
    seed:         u64,
    step:         Tick,
    grid:         Grid,
    entities:     EntityRegistry,
    pursuit_rng:  SubsystemRng,
    flight_rng:   SubsystemRng,
    human_field:  Option<DistanceField>,
    zombie_field: Option<DistanceField>,
    event_log:    Vec<EventLogEntry>,
}

impl SimEngine {
    /// Build an engine from a validated layout.
    pub fn new(run_id: RunId, config: &SimConfig) -> SimResult<Self> {
        config.validate()?;

        let mut grid = Grid::new(config.height, config.width);
        for &cell in &config.obstacles {
            grid.set_blocked(cell);
        }
        let entities =
            EntityRegistry::with_entities(config.humans.clone(), config.zombies.clone());

        let rng_bank = RngBank::new(config.seed);
        let mut engine = Self {
            run_id:       run_id.clone(),
            seed:         config.seed,
            step:         0,
            grid,
            entities,
            pursuit_rng:  rng_bank.for_slot(RngSlot::Pursuit),
            flight_rng:   rng_bank.for_slot(RngSlot::Flight),
            human_field:  None,
            zombie_field: None,
            event_log:    Vec::new(),
        };

        // Emit RunInitialized at tick 0 so seed differences are observable.
        engine.record(0, &[SimEvent::RunInitialized { run_id, seed: config.seed }])?;
        log::info!(
            "engine {} ready: {}x{} grid, {} obstacles, {} humans, {} zombies, seed {}",
            engine.run_id,
            config.height,
            config.width,
            config.obstacles.len(),
            config.humans.len(),
            config.zombies.len(),
            config.seed
        );
        Ok(engine)
    }

    /// Engine over `SimConfig::default_test()`.
    pub fn build_test(run_id: RunId) -> SimResult<Self> {
        Self::new(run_id, &SimConfig::default_test())
    }

    // ── Stepping ───────────────────────────────────────────────

    /// Advance one step. This is the core simulation cycle.
    pub fn advance(&mut self) -> SimResult<Vec<SimEvent>> {
        self.step += 1;
        let tick = self.step;
        let mut events = vec![SimEvent::StepStarted { tick }];

        let human_field = self.compute_field(EntityKind::Human);
        let zombie_field = self.compute_field(EntityKind::Zombie);

        let new_zombies = self.plan(EntityKind::Zombie, &human_field)?;
        let new_humans = self.plan(EntityKind::Human, &zombie_field)?;

        let zombies_moved = count_moved(self.entities.positions(EntityKind::Zombie), &new_zombies);
        let humans_moved = count_moved(self.entities.positions(EntityKind::Human), &new_humans);

        self.entities.replace(EntityKind::Zombie, new_zombies);
        self.entities.replace(EntityKind::Human, new_humans);
        self.human_field = Some(human_field);
        self.zombie_field = Some(zombie_field);

        events.push(SimEvent::ZombiesMoved {
            tick,
            moved: zombies_moved,
            total: self.entities.num_zombies(),
        });
        events.push(SimEvent::HumansMoved {
            tick,
            moved: humans_moved,
            total: self.entities.num_humans(),
        });

        let contacts = self.contacts();
        events.extend(contacts.iter().map(|c| SimEvent::Contact {
            tick,
            position: c.position,
            humans:   c.humans,
            zombies:  c.zombies,
        }));
        events.push(SimEvent::StepCompleted { tick });

        log::debug!(
            "tick={tick} zombies moved {zombies_moved}/{} humans moved {humans_moved}/{} contacts={}",
            self.entities.num_zombies(),
            self.entities.num_humans(),
            contacts.len()
        );

        self.record(tick, &events)?;
        Ok(events)
    }

    /// Run n steps in a loop. Used for testing and fast-forward.
    pub fn run_steps(&mut self, n: u64) -> SimResult<()> {
        for _ in 0..n {
            self.advance()?;
        }
        Ok(())
    }

    /// Distance field sourced at the current positions of `source`.
    /// Pure: does not touch the recorded fields.
    pub fn compute_field(&self, source: EntityKind) -> DistanceField {
        compute_distance_field(self.entities.positions(source), &self.grid)
    }

    /// Move one population against a caller-supplied field, using that
    /// population's movement rule. For hosts that animate the two halves
    /// of a step separately; `advance` does not go through here.
    pub fn move_entities(&mut self, kind: EntityKind, field: &DistanceField) -> SimResult<()> {
        let planned = self.plan(kind, field)?;
        self.entities.replace(kind, planned);
        Ok(())
    }

    fn plan(&mut self, kind: EntityKind, field: &DistanceField) -> SimResult<Vec<Position>> {
        let rng = match kind {
            EntityKind::Zombie => &mut self.pursuit_rng,
            EntityKind::Human  => &mut self.flight_rng,
        };
        plan_moves(
            self.entities.positions(kind),
            field,
            &self.grid,
            kind.connectivity(),
            kind.objective(),
            rng,
        )
    }

    // ── Editing ────────────────────────────────────────────────

    pub fn set_blocked(&mut self, pos: Position) -> SimResult<()> {
        self.check_bounds(pos)?;
        self.grid.set_blocked(pos);
        Ok(())
    }

    pub fn set_passable(&mut self, pos: Position) -> SimResult<()> {
        self.check_bounds(pos)?;
        self.grid.set_passable(pos);
        Ok(())
    }

    pub fn add_human(&mut self, pos: Position) -> SimResult<()> {
        self.check_bounds(pos)?;
        self.entities.add_human(pos);
        Ok(())
    }

    pub fn add_zombie(&mut self, pos: Position) -> SimResult<()> {
        self.check_bounds(pos)?;
        self.entities.add_zombie(pos);
        Ok(())
    }

    /// Empty the board: obstacles, both populations and the recorded fields.
    /// The step counter and RNG streams carry on.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.entities.clear();
        self.human_field = None;
        self.zombie_field = None;
        log::info!("engine {} cleared at tick {}", self.run_id, self.step);
    }

    pub fn apply(&mut self, command: &HostCommand) -> SimResult<()> {
        match *command {
            HostCommand::AddObstacle { row, col }    => self.set_blocked(Position::new(row, col)),
            HostCommand::RemoveObstacle { row, col } => self.set_passable(Position::new(row, col)),
            HostCommand::AddHuman { row, col }       => self.add_human(Position::new(row, col)),
            HostCommand::AddZombie { row, col }      => self.add_zombie(Position::new(row, col)),
            HostCommand::Clear => {
                self.clear();
                Ok(())
            }
        }
    }

    fn check_bounds(&self, pos: Position) -> SimResult<()> {
        if self.grid.in_bounds(pos) {
            Ok(())
        } else {
            Err(SimError::OutOfBounds {
                row:    pos.row,
                col:    pos.col,
                height: self.grid.height(),
                width:  self.grid.width(),
            })
        }
    }

    // ── Queries ────────────────────────────────────────────────

    pub fn seed(&self) -> u64 { self.seed }
    pub fn current_step(&self) -> Tick { self.step }
    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn entities(&self) -> &EntityRegistry { &self.entities }

    pub fn humans(&self) -> &[Position] {
        self.entities.positions(EntityKind::Human)
    }

    pub fn zombies(&self) -> &[Position] {
        self.entities.positions(EntityKind::Zombie)
    }

    /// Field sourced at `source` as recorded by the most recent `advance`.
    pub fn last_field(&self, source: EntityKind) -> Option<&DistanceField> {
        match source {
            EntityKind::Human  => self.human_field.as_ref(),
            EntityKind::Zombie => self.zombie_field.as_ref(),
        }
    }

    /// Cells holding both a human and a zombie, in row-major order.
    pub fn contacts(&self) -> Vec<ContactCell> {
        let mut humans: BTreeMap<Position, usize> = BTreeMap::new();
        for pos in self.entities.humans() {
            *humans.entry(pos).or_default() += 1;
        }
        let mut zombies: BTreeMap<Position, usize> = BTreeMap::new();
        for pos in self.entities.zombies() {
            *zombies.entry(pos).or_default() += 1;
        }
        humans
            .into_iter()
            .filter_map(|(position, h)| {
                zombies.get(&position).map(|&z| ContactCell {
                    position,
                    humans:  h,
                    zombies: z,
                })
            })
            .collect()
    }

    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            run_id:       self.run_id.clone(),
            tick:         self.step,
            height:       self.grid.height(),
            width:        self.grid.width(),
            obstacles:    self.grid.obstacles(),
            humans:       self.humans().to_vec(),
            zombies:      self.zombies().to_vec(),
            human_field:  self.human_field.as_ref().map(DistanceField::rows),
            zombie_field: self.zombie_field.as_ref().map(DistanceField::rows),
        }
    }

    // ── Event log ──────────────────────────────────────────────

    pub fn event_log(&self) -> &[EventLogEntry] {
        &self.event_log
    }

    /// Used by the determinism test and replay tooling.
    pub fn events_for_step(&self, tick: Tick) -> Vec<&EventLogEntry> {
        self.event_log.iter().filter(|e| e.tick == tick).collect()
    }

    fn record(&mut self, tick: Tick, events: &[SimEvent]) -> SimResult<()> {
        for event in events {
            self.event_log.push(EventLogEntry {
                run_id:     self.run_id.clone(),
                tick,
                event_type: event.type_name().to_string(),
                payload:    serde_json::to_string(event)?,
            });
        }
        Ok(())
    }
}

fn count_moved(before: &[Position], after: &[Position]) -> usize {
    before.iter().zip(after).filter(|(a, b)| a != b).count()
}
