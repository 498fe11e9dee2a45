//! Simulation engine: owns the hecs world, applies player commands at step
//! boundaries, runs every system in a fixed order and produces
//! `GameStateSnapshot`s. Headless and deterministic for a given seed.

use std::collections::VecDeque;

use hecs::{Entity, World};
use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use broadside_core::commands::PlayerCommand;
use broadside_core::components::PlayerControl;
use broadside_core::config::{ConfigError, SimConfig};
use broadside_core::enums::{Difficulty, GamePhase};
use broadside_core::events::SimEvent;
use broadside_core::state::GameStateSnapshot;
use broadside_core::types::{EntityHandle, SimTime};

use crate::arena::Arena;
use crate::score::ScoreState;
use crate::spawn::SpawnQueue;
use crate::systems::{self, StepContext};
use crate::world_setup;

/// Weak handle for an ECS entity.
pub fn handle_of(entity: Entity) -> EntityHandle {
    EntityHandle(entity.to_bits().get())
}

/// Resolve a handle back to a live entity. Despawned entities, including a
/// recycled slot with a newer generation, resolve to `None`.
pub fn resolve_handle(world: &World, handle: EntityHandle) -> Option<Entity> {
    let entity = Entity::from_bits(handle.0)?;
    world.contains(entity).then_some(entity)
}

/// The simulation engine. Owns the ECS world and all session state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    config: SimConfig,
    difficulty: Difficulty,
    arena: Arena,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    spawns: SpawnQueue,
    score: ScoreState,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create an engine in the `Setup` phase. Fails if the config is invalid.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            difficulty: config.difficulty,
            arena: Arena::new(config.arena_width, config.arena_height),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            spawns: SpawnQueue::default(),
            score: ScoreState::default(),
            events: Vec::new(),
            config,
        })
    }

    /// Queue a player command for processing at the next step boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance by the configured fixed step.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.step(self.config.dt)
    }

    /// Advance by `delta` seconds and return the resulting snapshot.
    /// A non-positive or non-finite `delta` only applies queued commands.
    pub fn step(&mut self, delta: f64) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            if delta.is_finite() && delta > 0.0 {
                self.begin_step();
                self.run_systems(delta);
                self.time.advance(delta);
            } else {
                warn!("ignoring step of {delta} s");
            }
        }

        if let Some(outcome) = self.score.outcome {
            if matches!(self.phase, GamePhase::Active | GamePhase::Paused) {
                info!("session over: {outcome:?} after {:.1} s", self.time.elapsed_secs);
                self.phase = outcome;
            }
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.difficulty,
            &self.score,
            events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Number of entities waiting for the next step boundary.
    pub fn pending_spawns(&self) -> usize {
        self.spawns.len()
    }

    /// Mutable world access for tests that stage scenarios.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartSession { difficulty } => {
                if self.phase == GamePhase::Setup {
                    if let Some(d) = difficulty {
                        self.difficulty = d;
                    }
                    self.score.colleges_total = world_setup::setup_session(
                        &mut self.world,
                        &self.arena,
                        &mut self.rng,
                        self.difficulty,
                    );
                    self.arena.refresh_obstacles(&self.world);
                    self.phase = GamePhase::Active;
                    self.time = SimTime::default();
                    info!(
                        "session started: {:?}, {} hostile colleges",
                        self.difficulty, self.score.colleges_total
                    );
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetThrottle { value } => {
                for (_entity, control) in self.world.query_mut::<&mut PlayerControl>() {
                    control.throttle = value.signum();
                }
            }
            PlayerCommand::SetRudder { value } => {
                for (_entity, control) in self.world.query_mut::<&mut PlayerControl>() {
                    control.rudder = value.signum();
                }
            }
            PlayerCommand::FireBroadside => {
                for (_entity, control) in self.world.query_mut::<&mut PlayerControl>() {
                    control.fire_broadside = true;
                }
            }
            PlayerCommand::FireRay => {
                for (_entity, control) in self.world.query_mut::<&mut PlayerControl>() {
                    control.fire_ray = true;
                }
            }
        }
    }

    /// Step boundary: drop entities flagged last step, then merge the ones
    /// requested last step.
    fn begin_step(&mut self) {
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        self.spawns.flush(&mut self.world, self.difficulty);
        self.arena.refresh_obstacles(&self.world);
    }

    /// Run all systems in order.
    fn run_systems(&mut self, delta: f64) {
        let mut ctx = StepContext {
            delta,
            difficulty: self.difficulty,
            arena: &self.arena,
            rng: &mut self.rng,
            spawns: &mut self.spawns,
            score: &mut self.score,
            events: &mut self.events,
        };
        let world = &mut self.world;

        // 1. Player helm and weapons
        systems::player::run(world, &mut ctx);
        // 2. Combat AI (enemy and friendly vessels)
        systems::combat::run(world, &mut ctx);
        // 3. Neutral wandering
        systems::navigation::run_neutral(world, &mut ctx);
        // 4. Kraken
        systems::creature::run(world, &mut ctx);
        // 5. College fire and vessel production
        systems::college::run(world, &mut ctx);
        // 6. Projectile flight
        systems::projectile::run(world, &mut ctx);
        // 7. Ray show windows
        systems::ray::run(world, &mut ctx);
        // 8. Contacts
        systems::collision::run(world, &mut ctx);
        // 9. Objectives
        systems::college::update_objectives(world, &mut ctx);
    }
}
