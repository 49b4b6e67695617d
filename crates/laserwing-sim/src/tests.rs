//! Tests for the simulation engine, ship and laser behavior, deferred
//! restart and the target registry.

use glam::DVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use laserwing_core::commands::PlayerCommand;
use laserwing_core::components::{Asteroid, Explosion, Hitable, Projectile, Ship};
use laserwing_core::config::{AsteroidTuning, GameConfig};
use laserwing_core::constants::*;
use laserwing_core::enums::*;
use laserwing_core::events::AudioEvent;
use laserwing_core::input::InputState;
use laserwing_core::types::Position;

use crate::engine::{SimConfig, SimulationEngine};
use crate::registry::TargetRegistry;
use crate::systems::spawner::{self, AsteroidSpawner};
use crate::systems::{projectile, ship};
use crate::timers::{DeferredKind, TimerQueue};

// ---- Helpers ----

/// Config with asteroid spawning disabled, so tests place targets by hand.
fn quiet_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.asteroid.spawn_interval_secs = 0.0;
    config
}

fn started_engine(game: GameConfig) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig {
        game,
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick();
    engine
}

fn test_ship(rate_of_fire: f64) -> Ship {
    Ship {
        speed: 1.0,
        rate_of_fire,
        muzzle_offset: 1.0,
        last_fire_secs: None,
        state: ShipState::Alive,
        visible: true,
    }
}

fn test_projectile(direction: DVec2, speed: f64, lifetime_secs: f64) -> Projectile {
    Projectile {
        direction: projectile::initialize_direction(direction),
        speed,
        lifetime_secs,
        state: ProjectileState::Flying,
    }
}

fn count<T: hecs::Component>(engine: &SimulationEngine) -> usize {
    engine.world().query::<&T>().iter().count()
}

fn ship_state(engine: &SimulationEngine) -> Ship {
    let entity = engine.ship_entity().expect("level has a ship");
    let ship = engine.world().get::<&Ship>(entity).unwrap();
    (*ship).clone()
}

fn ship_position(engine: &SimulationEngine) -> DVec2 {
    let entity = engine.ship_entity().expect("level has a ship");
    let pos = engine.world().get::<&Position>(entity).unwrap();
    pos.0
}

// ---- Projectile ----

#[test]
fn test_direction_normalized_to_unit_length() {
    let requests = [
        DVec2::new(0.0, 1.0),
        DVec2::new(-1.0, 1.0),
        DVec2::new(1.0, 1.0),
        DVec2::new(3.0, -4.0),
        DVec2::new(1e-3, 0.0),
        DVec2::new(-250.0, 90.0),
    ];
    for requested in requests {
        let direction = projectile::initialize_direction(requested);
        assert!(
            (direction.length() - 1.0).abs() < 1e-9,
            "{requested} normalized to {direction}"
        );
        let rescaled = direction * requested.length();
        assert!(
            rescaled.distance(requested) < 1e-9 * requested.length().max(1.0),
            "{requested} changed orientation"
        );
    }
}

#[test]
fn test_zero_direction_falls_back_to_straight_up() {
    assert_eq!(projectile::initialize_direction(DVec2::ZERO), DVec2::Y);
    assert_eq!(
        projectile::initialize_direction(DVec2::new(f64::NAN, 1.0)),
        DVec2::Y
    );
}

/// Lifetime 3, speed 2, straight up: three 1s ticks reach y = 6 and the
/// laser expires on the third.
#[test]
fn test_projectile_three_second_flight() {
    let mut laser = test_projectile(DVec2::new(0.0, 1.0), 2.0, 3.0);
    let mut pos = Position::new(0.0, 0.0);

    assert_eq!(projectile::advance(&mut laser, &mut pos, 1.0), ProjectileState::Flying);
    assert_eq!(projectile::advance(&mut laser, &mut pos, 1.0), ProjectileState::Flying);
    assert_eq!(projectile::advance(&mut laser, &mut pos, 1.0), ProjectileState::Expired);

    assert!((pos.0.y - 6.0).abs() < 1e-12, "y = {}", pos.0.y);
    assert!(pos.0.x.abs() < 1e-12);
    assert!(laser.lifetime_secs <= 0.0);
}

#[test]
fn test_projectile_lifetime_monotonic_and_terminal() {
    let mut laser = test_projectile(DVec2::new(1.0, 1.0), 2.0, 0.5);
    let mut pos = Position::default();
    let deltas = [0.0, 0.1, 0.0, 0.25, -1.0, 0.1, 0.3, 0.2, 0.2];

    let mut previous = laser.lifetime_secs;
    let mut expirations = 0;
    for dt in deltas {
        let was_flying = laser.state == ProjectileState::Flying;
        let state = projectile::advance(&mut laser, &mut pos, dt);
        assert!(laser.lifetime_secs <= previous, "lifetime increased");
        previous = laser.lifetime_secs;
        if was_flying && state == ProjectileState::Expired {
            expirations += 1;
        }
    }
    assert_eq!(expirations, 1);

    // Expired lasers no longer move.
    let frozen = pos;
    projectile::advance(&mut laser, &mut pos, 1.0);
    assert_eq!(pos, frozen);
}

#[test]
fn test_projectile_hit_once_then_spent() {
    let mut laser = test_projectile(DVec2::Y, 2.0, 3.0);
    let mut asteroid = Asteroid {
        hit_points: 2,
        destroyed: false,
    };

    let outcome = projectile::on_overlap(&mut laser, Some(&mut asteroid as &mut dyn Hitable));
    assert_eq!(outcome, Some(HitOutcome::Damaged));
    assert_eq!(laser.state, ProjectileState::Spent);

    let again = projectile::on_overlap(&mut laser, Some(&mut asteroid as &mut dyn Hitable));
    assert_eq!(again, None, "a spent laser cannot hit again");
    assert_eq!(asteroid.hit_points, 1);
}

#[test]
fn test_projectile_ignores_non_targets() {
    let mut laser = test_projectile(DVec2::Y, 2.0, 3.0);
    assert_eq!(projectile::on_overlap(&mut laser, None), None);
    assert_eq!(laser.state, ProjectileState::Flying);
}

#[test]
fn test_expired_projectile_cannot_hit() {
    let mut laser = test_projectile(DVec2::Y, 2.0, 0.1);
    let mut pos = Position::default();
    projectile::advance(&mut laser, &mut pos, 0.2);

    let mut asteroid = Asteroid {
        hit_points: 1,
        destroyed: false,
    };
    assert_eq!(
        projectile::on_overlap(&mut laser, Some(&mut asteroid as &mut dyn Hitable)),
        None
    );
    assert!(!asteroid.destroyed);
    assert_eq!(laser.state, ProjectileState::Expired);
}

#[test]
fn test_projectile_rotation_points_along_direction() {
    assert!(projectile::rotation(DVec2::Y).abs() < 1e-12);
    let left = projectile::rotation(DVec2::new(-1.0, 1.0).normalize());
    assert!((left - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
}

// ---- Ship firing ----

#[test]
fn test_fire_rate_two_gates_half_second() {
    let mut s = test_ship(2.0);
    assert!(ship::try_fire(&mut s, 0.0));
    assert!(!ship::try_fire(&mut s, 0.49), "0.49s after a shot is too soon");
    assert!(ship::try_fire(&mut s, 0.5), "0.5s after a shot is allowed");
    assert_eq!(s.last_fire_secs, Some(0.5));
}

#[test]
fn test_fire_rate_one_scenarios() {
    let mut s = test_ship(1.0);
    assert!(ship::try_fire(&mut s, 0.0));
    assert!(!ship::try_fire(&mut s, 0.5));
    assert_eq!(s.last_fire_secs, Some(0.0), "rejected shot leaves the cadence alone");

    let mut s = test_ship(1.0);
    assert!(ship::try_fire(&mut s, 0.0));
    assert!(ship::try_fire(&mut s, 1.0));
}

#[test]
fn test_cooldown_remaining() {
    let mut s = test_ship(2.0);
    assert_eq!(ship::cooldown_remaining(&s, 3.0), 0.0);
    ship::try_fire(&mut s, 3.0);
    assert!((ship::cooldown_remaining(&s, 3.2) - 0.3).abs() < 1e-12);
    assert_eq!(ship::cooldown_remaining(&s, 4.0), 0.0);
}

#[test]
fn test_volley_has_three_literal_directions() {
    let s = test_ship(1.0);
    let volley = ship::volley(&s, DVec2::new(2.0, -4.0));
    assert_eq!(volley.origin, DVec2::new(2.0, -3.0));
    assert_eq!(volley.ship_position, DVec2::new(2.0, -4.0));
    assert_eq!(
        volley.directions,
        [
            DVec2::new(0.0, 1.0),
            DVec2::new(-1.0, 1.0),
            DVec2::new(1.0, 1.0)
        ]
    );
}

#[test]
fn test_dead_ship_cannot_fire() {
    let mut s = test_ship(1.0);
    assert!(ship::on_overlap(&mut s, true));
    assert!(!ship::try_fire(&mut s, 10.0));
}

#[test]
fn test_ship_tick_moves_and_fires() {
    let mut s = test_ship(1.0);
    s.speed = 3.0;
    let mut pos = Position::new(0.0, -4.0);
    let input = InputState {
        horizontal: -0.5,
        fire_held: true,
        bomb_pressed: true,
    };

    let actions = ship::tick(&mut s, &mut pos, &input, 0.5, 0.0);
    assert!((pos.0.x + 0.75).abs() < 1e-12);
    assert_eq!(pos.0.y, -4.0);
    assert!(actions.volley.is_some());
    assert!(actions.bomb);

    // Held fire inside the cooldown does nothing.
    let actions = ship::tick(&mut s, &mut pos, &input, 0.5, 0.5);
    assert!(actions.volley.is_none());
}

#[test]
fn test_ship_axis_input_is_clamped() {
    let s = test_ship(1.0);
    let mut pos = Position::default();
    ship::steer(&s, &mut pos, 5.0, 1.0);
    assert_eq!(pos.0.x, 1.0);
    ship::steer(&s, &mut pos, f64::NAN, 1.0);
    assert_eq!(pos.0.x, 1.0);
}

// ---- Ship death ----

#[test]
fn test_ship_overlap_idempotent() {
    let mut s = test_ship(1.0);
    assert!(ship::on_overlap(&mut s, true));
    assert_eq!(s.state, ShipState::Dead);
    assert!(!s.visible);
    assert!(!ship::on_overlap(&mut s, true), "second death is a no-op");
    assert_eq!(s.state, ShipState::Dead);
}

#[test]
fn test_ship_ignores_non_target_overlap() {
    let mut s = test_ship(1.0);
    assert!(!ship::on_overlap(&mut s, false));
    assert_eq!(s.state, ShipState::Alive);
    assert!(s.visible);
}

/// Death schedules exactly one restart 1s later, spawns one explosion and
/// reloads the level exactly once.
#[test]
fn test_ship_death_restart_sequence() {
    let mut engine = started_engine(quiet_config());
    let ship_entity = engine.ship_entity().unwrap();
    let asteroid = engine.spawn_asteroid_at(DVec2::new(5.0, 5.0));
    let death_time = engine.time().elapsed_secs;

    engine.notify_overlap(ship_entity, asteroid);
    engine.notify_overlap(asteroid, ship_entity);

    assert_eq!(ship_state(&engine).state, ShipState::Dead);
    assert!(!ship_state(&engine).visible);
    assert_eq!(count::<Explosion>(&engine), 1);
    assert_eq!(engine.timers().len(), 1);
    let pending = &engine.timers().pending()[0];
    assert_eq!(pending.kind, DeferredKind::RestartScene);
    assert!((pending.due_secs - (death_time + RESTART_DELAY)).abs() < 1e-12);
    let due = pending.due_secs;

    let snap = engine.tick();
    let explosions = snap
        .audio_events
        .iter()
        .filter(|e| matches!(e, AudioEvent::ShipExploded { .. }))
        .count();
    assert_eq!(explosions, 1);
    assert!(snap.ship.as_ref().is_some_and(|s| !s.visible));

    let mut reloads = Vec::new();
    let mut last_generation = engine.scene_generation();
    for _ in 0..180 {
        let now = engine.time().elapsed_secs;
        let snap = engine.tick();
        if snap.scene_generation != last_generation {
            reloads.push(now);
            last_generation = snap.scene_generation;
        }
    }

    assert_eq!(reloads.len(), 1, "level must reload exactly once");
    assert!(reloads[0] >= due - 1e-6, "reloaded early at {}", reloads[0]);
    assert!(reloads[0] < due + 2.0 * DT, "reloaded late at {}", reloads[0]);
    assert_eq!(engine.scene_generation(), 1);

    let fresh = ship_state(&engine);
    assert_eq!(fresh.state, ShipState::Alive);
    assert!(fresh.visible);
    assert_eq!(fresh.last_fire_secs, None);
    assert!(engine.registry().is_empty());
    assert!(engine.timers().is_empty());
    assert_eq!(count::<Asteroid>(&engine), 0);
}

#[test]
fn test_dead_ship_ignores_input() {
    let mut engine = started_engine(quiet_config());
    let ship_entity = engine.ship_entity().unwrap();
    let asteroid = engine.spawn_asteroid_at(DVec2::new(5.0, 5.0));
    engine.notify_overlap(ship_entity, asteroid);
    let before = ship_position(&engine);

    engine.set_input(InputState {
        horizontal: 1.0,
        fire_held: true,
        bomb_pressed: true,
    });
    let snap = engine.tick();

    assert_eq!(ship_position(&engine), before);
    assert_eq!(count::<Projectile>(&engine), 0);
    assert_eq!(snap.score.volleys_fired, 0);
    assert_eq!(snap.score.bombs_used, 0);
}

#[test]
fn test_ship_dies_when_asteroid_falls_on_it() {
    let mut engine = started_engine(quiet_config());
    let start = ship_position(&engine);
    engine.spawn_asteroid_at(start + DVec2::new(0.0, 2.0));

    let mut died_at = None;
    for i in 0..120 {
        engine.tick();
        if ship_state(&engine).state == ShipState::Dead {
            died_at = Some(i);
            break;
        }
    }
    assert!(died_at.is_some(), "asteroid should reach the ship");
    assert_eq!(engine.timers().len(), 1);
    assert_eq!(count::<Explosion>(&engine), 1);
}

// ---- Engine firing and bombs ----

#[test]
fn test_engine_volley_spawns_three_lasers() {
    let mut engine = started_engine(quiet_config());
    let ship_pos = ship_position(&engine);
    engine.set_input(InputState {
        fire_held: true,
        ..Default::default()
    });
    let snap = engine.tick();

    assert_eq!(snap.projectiles.len(), 3);
    assert_eq!(snap.score.volleys_fired, 1);
    assert!(snap
        .audio_events
        .iter()
        .any(|e| *e == AudioEvent::LaserFired { position: ship_pos }));

    let diagonal = std::f64::consts::FRAC_1_SQRT_2;
    let mut directions: Vec<DVec2> = snap.projectiles.iter().map(|p| p.direction).collect();
    directions.sort_by(|a, b| a.x.total_cmp(&b.x));
    let expected = [
        DVec2::new(-diagonal, diagonal),
        DVec2::new(0.0, 1.0),
        DVec2::new(diagonal, diagonal),
    ];
    for (got, want) in directions.iter().zip(expected) {
        assert!(got.distance(want) < 1e-9, "got {got}, want {want}");
    }
}

#[test]
fn test_engine_held_fire_respects_rate() {
    let mut engine = started_engine(quiet_config());
    engine.set_input(InputState {
        fire_held: true,
        ..Default::default()
    });

    // Rate of fire 1: one volley at the start, the next one second later.
    let mut snap = engine.tick();
    for _ in 0..30 {
        snap = engine.tick();
    }
    assert_eq!(snap.score.volleys_fired, 1);
    for _ in 0..40 {
        snap = engine.tick();
    }
    assert_eq!(snap.score.volleys_fired, 2);
}

#[test]
fn test_lasers_expire_exactly_once() {
    let mut engine = started_engine(quiet_config());
    engine.set_input(InputState {
        fire_held: true,
        ..Default::default()
    });
    engine.tick();
    engine.set_input(InputState::default());

    let ticks = (PROJECTILE_LIFETIME / DT) as usize + 10;
    for _ in 0..ticks {
        engine.tick();
    }
    assert_eq!(engine.score().projectiles_expired, 3);
    assert_eq!(count::<Projectile>(&engine), 0);
}

#[test]
fn test_laser_destroys_asteroid_through_trigger() {
    let mut engine = started_engine(quiet_config());
    let ship_pos = ship_position(&engine);
    engine.spawn_asteroid_at(ship_pos + DVec2::new(0.0, 3.0));
    engine.set_input(InputState {
        fire_held: true,
        ..Default::default()
    });
    engine.tick();
    engine.set_input(InputState::default());

    let mut destroyed_snap = None;
    for _ in 0..60 {
        let snap = engine.tick();
        if snap.score.asteroids_destroyed > 0 {
            destroyed_snap = Some(snap);
            break;
        }
    }
    let snap = destroyed_snap.expect("the straight laser should hit the asteroid");
    assert_eq!(snap.score.asteroids_destroyed, 1);
    assert_eq!(engine.score().projectiles_spent, 1);
    assert!(snap
        .audio_events
        .iter()
        .any(|e| matches!(e, AudioEvent::AsteroidDestroyed { .. })));
    assert!(snap.asteroids.is_empty());
    assert_eq!(snap.projectiles.len(), 2, "side lasers keep flying");
    assert_eq!(ship_state(&engine).state, ShipState::Alive);
}

#[test]
fn test_laser_overlap_with_ship_is_ignored() {
    let mut engine = started_engine(quiet_config());
    engine.set_input(InputState {
        fire_held: true,
        ..Default::default()
    });
    engine.tick();
    let laser = engine
        .world()
        .query::<&Projectile>()
        .iter()
        .next()
        .map(|(e, _)| e)
        .unwrap();
    let ship_entity = engine.ship_entity().unwrap();

    engine.notify_overlap(laser, ship_entity);

    let state = engine.world().get::<&Projectile>(laser).unwrap().state;
    assert_eq!(state, ProjectileState::Flying);
    assert_eq!(ship_state(&engine).state, ShipState::Alive);
}

#[test]
fn test_repeated_overlap_hits_once() {
    let mut config = quiet_config();
    config.asteroid.hit_points = 3;
    let mut engine = started_engine(config);
    let asteroid = engine.spawn_asteroid_at(DVec2::new(4.0, 4.0));
    engine.set_input(InputState {
        fire_held: true,
        ..Default::default()
    });
    engine.tick();
    let laser = engine
        .world()
        .query::<&Projectile>()
        .iter()
        .next()
        .map(|(e, _)| e)
        .unwrap();

    engine.notify_overlap(laser, asteroid);
    engine.notify_overlap(laser, asteroid);

    let hit_points = engine.world().get::<&Asteroid>(asteroid).unwrap().hit_points;
    assert_eq!(hit_points, 2);
    assert_eq!(engine.score().projectiles_spent, 1);
}

#[test]
fn test_bomb_hits_every_target_once() {
    let mut engine = started_engine(quiet_config());
    for x in [-3.0, 0.0, 3.0] {
        engine.spawn_asteroid_at(DVec2::new(x, 4.0));
    }
    assert_eq!(engine.registry().len(), 3);

    engine.set_input(InputState {
        bomb_pressed: true,
        ..Default::default()
    });
    let snap = engine.tick();

    assert_eq!(snap.score.bombs_used, 1);
    assert_eq!(snap.score.asteroids_destroyed, 3);
    assert!(engine.registry().is_empty());
    assert!(snap.asteroids.is_empty());
    assert_eq!(snap.explosions.len(), 3);
    assert_eq!(ship_state(&engine).state, ShipState::Alive);

    // The press is an edge: it is not repeated on the next tick.
    let snap = engine.tick();
    assert_eq!(snap.score.bombs_used, 1);
}

#[test]
fn test_bomb_damages_tough_asteroids() {
    let mut config = quiet_config();
    config.asteroid.hit_points = 2;
    let mut engine = started_engine(config);
    let asteroid = engine.spawn_asteroid_at(DVec2::new(0.0, 4.0));

    engine.set_input(InputState {
        bomb_pressed: true,
        ..Default::default()
    });
    engine.tick();

    assert!(engine.registry().contains(asteroid));
    let hit_points = engine.world().get::<&Asteroid>(asteroid).unwrap().hit_points;
    assert_eq!(hit_points, 1);
}

// ---- Movement ----

#[test]
fn test_ship_moves_one_second_at_full_axis() {
    let mut engine = started_engine(quiet_config());
    let start = ship_position(&engine);
    engine.set_input(InputState {
        horizontal: 1.0,
        ..Default::default()
    });
    for _ in 0..TICK_RATE {
        engine.tick();
    }
    let moved = ship_position(&engine) - start;
    assert!((moved.x - SHIP_SPEED).abs() < 1e-9, "moved {moved}");
    assert_eq!(moved.y, 0.0);
}

// ---- Spawning and cleanup ----

#[test]
fn test_spawner_drops_asteroids_on_cadence() {
    let mut engine = started_engine(GameConfig::default());
    let ticks = (ASTEROID_SPAWN_INTERVAL * 2.0 / DT) as usize + 2;
    for _ in 0..ticks {
        engine.tick();
    }
    assert_eq!(engine.registry().len(), 2);
    for (_, (_, pos)) in engine.world().query::<(&Asteroid, &Position)>().iter() {
        assert!(pos.0.x.abs() <= PLAYFIELD_HALF_WIDTH);
        assert!(pos.0.y > PLAYFIELD_TOP - 4.0);
    }
}

#[test]
fn test_spawner_caps_one_asteroid_per_tick() {
    let mut world = hecs::World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut registry = TargetRegistry::new();
    let tuning = AsteroidTuning {
        spawn_interval_secs: 1e-20,
        ..Default::default()
    };
    let mut cadence = AsteroidSpawner::starting_at(0.0, tuning.spawn_interval_secs);

    let mut now = 0.0;
    for _ in 0..3 {
        now += DT;
        let spawned = spawner::run(&mut world, &mut rng, &mut cadence, &mut registry, &tuning, now);
        assert_eq!(spawned, 1);
    }
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_spawner_resumes_cadence_after_a_gap() {
    let mut world = hecs::World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut registry = TargetRegistry::new();
    let tuning = AsteroidTuning::default();
    let mut cadence = AsteroidSpawner::starting_at(0.0, 1.5);

    // Ten seconds late: one spawn, not six.
    assert_eq!(spawner::run(&mut world, &mut rng, &mut cadence, &mut registry, &tuning, 10.0), 1);
    assert!((cadence.next_spawn_secs - 11.5).abs() < 1e-9);
    assert_eq!(spawner::run(&mut world, &mut rng, &mut cadence, &mut registry, &tuning, 11.0), 0);
}

#[test]
fn test_asteroids_leaving_playfield_are_removed() {
    let mut engine = started_engine(quiet_config());
    let asteroid = engine.spawn_asteroid_at(DVec2::new(6.0, PLAYFIELD_BOTTOM + 0.1));
    for _ in 0..30 {
        engine.tick();
    }
    assert!(!engine.world().contains(asteroid));
    assert!(!engine.registry().contains(asteroid));
}

#[test]
fn test_explosion_effect_expires() {
    let mut engine = started_engine(quiet_config());
    engine.spawn_asteroid_at(DVec2::new(0.0, 4.0));
    engine.set_input(InputState {
        bomb_pressed: true,
        ..Default::default()
    });
    engine.tick();
    assert_eq!(count::<Explosion>(&engine), 1);

    let ticks = (EXPLOSION_DURATION / DT) as usize + 5;
    for _ in 0..ticks {
        engine.tick();
    }
    assert_eq!(count::<Explosion>(&engine), 0);
}

// ---- Engine control ----

#[test]
fn test_main_menu_does_not_tick() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::MainMenu);
    assert_eq!(snap.time.tick, 0);
    assert!(snap.ship.is_none());
}

#[test]
fn test_pause_resume() {
    let mut engine = started_engine(quiet_config());
    engine.queue_command(PlayerCommand::Pause);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Paused);
    let paused_tick = snap.time.tick;

    let snap = engine.tick();
    assert_eq!(snap.time.tick, paused_tick);

    engine.queue_command(PlayerCommand::Resume);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);
    assert!(snap.time.tick > paused_tick);
}

#[test]
fn test_restart_command_reloads_level() {
    let mut engine = started_engine(quiet_config());
    engine.spawn_asteroid_at(DVec2::new(0.0, 4.0));
    engine.set_input(InputState {
        horizontal: 1.0,
        ..Default::default()
    });
    for _ in 0..10 {
        engine.tick();
    }

    engine.queue_command(PlayerCommand::Restart);
    let snap = engine.tick();
    assert_eq!(snap.scene_generation, 1);
    assert!(snap.asteroids.is_empty());
    assert_eq!(snap.score.volleys_fired, 0);
}

#[test]
fn test_time_scale_clamped() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::SetTimeScale { scale: 10.0 });
    engine.tick();
    assert_eq!(engine.time_scale(), 4.0);
    engine.queue_command(PlayerCommand::SetTimeScale { scale: 0.0 });
    engine.tick();
    assert_eq!(engine.time_scale(), MIN_TIME_SCALE);
    engine.queue_command(PlayerCommand::SetTimeScale { scale: -1.0 });
    engine.tick();
    assert_eq!(engine.time_scale(), MIN_TIME_SCALE);
    engine.queue_command(PlayerCommand::SetTimeScale { scale: f64::NAN });
    engine.tick();
    assert_eq!(engine.time_scale(), 1.0);
}

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let mut game = GameConfig::default();
    game.ship.rate_of_fire = 0.0;
    let engine = SimulationEngine::new(SimConfig {
        game,
        ..Default::default()
    });
    assert_eq!(*engine.config(), GameConfig::default());
}

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    engine_a.queue_command(PlayerCommand::StartGame);
    engine_b.queue_command(PlayerCommand::StartGame);

    for i in 0..600u32 {
        let input = InputState {
            horizontal: if (i / 90) % 2 == 0 { 1.0 } else { -1.0 },
            fire_held: true,
            bomb_pressed: i % 250 == 0,
        };
        engine_a.set_input(input);
        engine_b.set_input(input);

        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

// ---- Timers and registry ----

#[test]
fn test_timer_fires_once_in_due_order() {
    let mut timers = TimerQueue::new();
    timers.schedule(DeferredKind::RestartScene, 2.0);
    let first = timers.schedule(DeferredKind::RestartScene, 1.0);

    assert!(timers.drain_due(0.5).is_empty());
    let due = timers.drain_due(2.5);
    assert_eq!(due.len(), 2);
    assert_eq!(due[0].id, first);
    assert!(due[0].due_secs <= due[1].due_secs);
    assert!(timers.drain_due(10.0).is_empty(), "fired actions do not repeat");
}

#[test]
fn test_timer_cancel() {
    let mut timers = TimerQueue::new();
    let id = timers.schedule(DeferredKind::RestartScene, 1.0);
    assert!(timers.cancel(id));
    assert!(!timers.cancel(id));
    assert!(timers.drain_due(5.0).is_empty());
}

#[test]
fn test_registry_no_duplicates() {
    let mut world = hecs::World::new();
    let a = world.spawn((Asteroid {
        hit_points: 1,
        destroyed: false,
    },));
    let b = world.spawn((Asteroid {
        hit_points: 1,
        destroyed: false,
    },));

    let mut registry = TargetRegistry::new();
    registry.register(a);
    registry.register(a);
    registry.register(b);
    assert_eq!(registry.iter().collect::<Vec<_>>(), vec![a, b]);

    assert!(registry.unregister(a));
    assert!(!registry.unregister(a));
    assert_eq!(registry.len(), 1);
    registry.clear();
    assert!(registry.is_empty());
}
