//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::{HashSet, VecDeque};

use glam::DVec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use laserwing_core::commands::PlayerCommand;
use laserwing_core::components::{Asteroid, Hitable, Projectile, Ship};
use laserwing_core::config::GameConfig;
use laserwing_core::constants::{MAX_TIME_SCALE, MIN_TIME_SCALE};
use laserwing_core::enums::{GamePhase, HitOutcome};
use laserwing_core::events::AudioEvent;
use laserwing_core::input::InputState;
use laserwing_core::state::GameStateSnapshot;
use laserwing_core::types::{Position, SimTime};

use crate::registry::TargetRegistry;
use crate::score::ScoreState;
use crate::systems;
use crate::systems::ship::VolleyRequest;
use crate::systems::spawner::AsteroidSpawner;
use crate::timers::{DeferredKind, TimerQueue};
use crate::world_setup;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal). Only the real-time driver uses it.
    pub time_scale: f64,
    /// Level tunables.
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            game: GameConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    config: GameConfig,
    input: InputState,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    audio_events: Vec<AudioEvent>,
    timers: TimerQueue,
    registry: TargetRegistry,
    spawner: AsteroidSpawner,
    active_overlaps: HashSet<(Entity, Entity)>,
    score: ScoreState,
    scene_generation: u32,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    /// An invalid game config is replaced by the defaults.
    pub fn new(config: SimConfig) -> Self {
        let game = match config.game.validate() {
            Ok(()) => config.game,
            Err(e) => {
                log::error!("Invalid game config ({e}); using defaults");
                GameConfig::default()
            }
        };

        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: clamp_time_scale(config.time_scale),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config: game,
            input: InputState::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            audio_events: Vec::new(),
            timers: TimerQueue::new(),
            registry: TargetRegistry::new(),
            spawner: AsteroidSpawner::default(),
            active_overlaps: HashSet::new(),
            score: ScoreState::default(),
            scene_generation: 0,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Set the input used by the next tick. The bomb edge is consumed by
    /// that tick; axis and held keys persist until replaced.
    pub fn set_input(&mut self, input: InputState) {
        self.input = input;
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
        }
        self.input.bomb_pressed = false;

        let audio_events = std::mem::take(&mut self.audio_events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.scene_generation,
            audio_events,
            &self.score,
        )
    }

    /// Deliver an overlap between two entities to both sides.
    /// Unknown or despawned entities are ignored.
    pub fn notify_overlap(&mut self, a: Entity, b: Entity) {
        self.deliver_overlap(a, b);
        self.deliver_overlap(b, a);
    }

    /// Place an asteroid by hand (scripted waves, tests).
    pub fn spawn_asteroid_at(&mut self, position: DVec2) -> Entity {
        world_setup::spawn_asteroid(
            &mut self.world,
            &mut self.registry,
            &self.config.asteroid,
            position,
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

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Number of level reloads so far.
    pub fn scene_generation(&self) -> u32 {
        self.scene_generation
    }

    /// The ship of the current level.
    pub fn ship_entity(&self) -> Option<Entity> {
        systems::ship::find_ship(&self.world)
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
            PlayerCommand::StartGame => {
                if self.phase == GamePhase::MainMenu {
                    self.load_level();
                    self.phase = GamePhase::Active;
                    log::info!("Game started");
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
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = clamp_time_scale(scale);
            }
            PlayerCommand::Restart => {
                if matches!(self.phase, GamePhase::Active | GamePhase::Paused) {
                    self.restart_scene();
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now = self.time.elapsed_secs;
        let dt = self.time.dt();
        log::trace!("tick {} at {now:.3}s", self.time.tick);

        // 1. Deferred actions. A reload takes the whole tick.
        for action in self.timers.drain_due(now) {
            match action.kind {
                DeferredKind::RestartScene => {
                    self.restart_scene();
                    return;
                }
            }
        }
        // 2. Asteroid spawning
        systems::spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.spawner,
            &mut self.registry,
            &self.config.asteroid,
            now,
        );
        // 3. Ship control (movement, volleys, bomb)
        let actions = systems::ship::run(&mut self.world, &self.input, dt, now);
        for action in actions {
            if let Some(volley) = action.volley {
                self.fire_volley(&volley);
            }
            if action.bomb {
                self.detonate_bomb();
            }
        }
        // 4. Laser flight and lifetime
        self.score.projectiles_expired += systems::projectile::run(&mut self.world, dt);
        // 5. Asteroid drift
        systems::movement::run(&mut self.world, dt);
        // 6. Trigger overlaps
        let entered = systems::triggers::run(&self.world, &mut self.active_overlaps);
        for (a, b) in entered {
            self.notify_overlap(a, b);
        }
        // 7. Effects
        systems::effects::run(&mut self.world, dt);
        // 8. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.registry, &mut self.despawn_buffer);
    }

    /// Reset all level state and spawn a fresh level from config.
    fn load_level(&mut self) {
        self.world.clear();
        self.registry.clear();
        self.timers.clear();
        self.active_overlaps.clear();
        self.despawn_buffer.clear();
        self.score = ScoreState::default();
        self.spawner = AsteroidSpawner::starting_at(
            self.time.elapsed_secs,
            self.config.asteroid.spawn_interval_secs,
        );
        world_setup::setup_level(&mut self.world, &self.config);
    }

    /// Reload the current level. Nothing from the old level is kept.
    fn restart_scene(&mut self) {
        self.load_level();
        self.scene_generation += 1;
        log::info!("Level reloaded (generation {})", self.scene_generation);
    }

    fn fire_volley(&mut self, volley: &VolleyRequest) {
        for direction in volley.directions {
            world_setup::spawn_projectile(
                &mut self.world,
                &self.config.projectile,
                volley.origin,
                direction,
            );
        }
        self.audio_events.push(AudioEvent::LaserFired {
            position: volley.ship_position,
        });
        self.score.volleys_fired += 1;
        log::debug!("Volley fired from {}", volley.ship_position);
    }

    fn detonate_bomb(&mut self) {
        let results = systems::ship::bomb_all(&self.world, &self.registry);
        self.score.bombs_used += 1;
        log::debug!("Bomb hit {} targets", results.len());
        for (entity, outcome) in results {
            if outcome == HitOutcome::Destroyed {
                self.on_asteroid_destroyed(entity);
            }
        }
    }

    fn on_asteroid_destroyed(&mut self, entity: Entity) {
        self.registry.unregister(entity);
        self.score.asteroids_destroyed += 1;
        if let Some(position) = systems::asteroid::position_of(&self.world, entity) {
            world_setup::spawn_explosion(&mut self.world, position, self.config.explosion_secs);
            self.audio_events
                .push(AudioEvent::AsteroidDestroyed { position });
        }
    }

    /// Route an overlap to the handler of `entity`, if it has one.
    fn deliver_overlap(&mut self, entity: Entity, other: Entity) {
        if entity == other {
            return;
        }
        if self.world.get::<&Projectile>(entity).is_ok() {
            self.projectile_overlap(entity, other);
        } else if self.world.get::<&Ship>(entity).is_ok() {
            self.ship_overlap(entity, other);
        }
    }

    fn projectile_overlap(&mut self, entity: Entity, other: Entity) {
        if !self.registry.contains(other) {
            return;
        }

        let outcome = match self.world.get::<&mut Projectile>(entity) {
            Ok(mut projectile) => {
                let mut asteroid = self.world.get::<&mut Asteroid>(other).ok();
                let target = asteroid.as_deref_mut().map(|a| a as &mut dyn Hitable);
                systems::projectile::on_overlap(&mut projectile, target)
            }
            Err(_) => return,
        };

        if let Some(outcome) = outcome {
            self.score.projectiles_spent += 1;
            if outcome == HitOutcome::Destroyed {
                self.on_asteroid_destroyed(other);
            }
        }
    }

    fn ship_overlap(&mut self, entity: Entity, other: Entity) {
        let is_target = self.registry.contains(other);
        let killed = match self.world.get::<&mut Ship>(entity) {
            Ok(mut ship) => systems::ship::on_overlap(&mut ship, is_target),
            Err(_) => false,
        };
        if !killed {
            return;
        }

        let position = self
            .world
            .get::<&Position>(entity)
            .map(|pos| pos.0)
            .unwrap_or_default();
        world_setup::spawn_explosion(&mut self.world, position, self.config.explosion_secs);
        self.audio_events.push(AudioEvent::ShipExploded { position });

        let due = self.time.elapsed_secs + self.config.restart_delay_secs;
        self.timers.schedule(DeferredKind::RestartScene, due);
        log::info!("Ship destroyed at {position}; restarting at {due:.2}s");
    }
}

/// Keep the real-time multiplier in range. NaN resets to normal speed.
fn clamp_time_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        1.0
    } else {
        scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE)
    }
}
