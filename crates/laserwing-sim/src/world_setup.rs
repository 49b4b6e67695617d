//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the ship, lasers, asteroids and explosion effects with
//! appropriate component bundles.

use glam::DVec2;
use hecs::{Entity, World};

use laserwing_core::components::*;
use laserwing_core::config::{AsteroidTuning, GameConfig, ProjectileTuning, ShipTuning};
use laserwing_core::constants::SHIP_START;
use laserwing_core::enums::*;
use laserwing_core::types::{Position, Velocity};

use crate::registry::TargetRegistry;
use crate::systems::projectile::initialize_direction;

/// Set up a fresh level: just the ship. Asteroids arrive via the spawner.
pub fn setup_level(world: &mut World, config: &GameConfig) -> Entity {
    spawn_ship(world, &config.ship, Position::new(SHIP_START.0, SHIP_START.1))
}

/// Spawn the player ship, alive and visible, with no shot fired yet.
pub fn spawn_ship(world: &mut World, tuning: &ShipTuning, position: Position) -> Entity {
    world.spawn((
        Ship {
            speed: tuning.speed,
            rate_of_fire: tuning.rate_of_fire,
            muzzle_offset: tuning.muzzle_offset,
            last_fire_secs: None,
            state: ShipState::Alive,
            visible: true,
        },
        position,
        TriggerVolume {
            radius: tuning.radius,
        },
    ))
}

/// Spawn a laser. The requested direction is normalized here.
pub fn spawn_projectile(
    world: &mut World,
    tuning: &ProjectileTuning,
    origin: DVec2,
    requested_direction: DVec2,
) -> Entity {
    world.spawn((
        Projectile {
            direction: initialize_direction(requested_direction),
            speed: tuning.speed,
            lifetime_secs: tuning.lifetime_secs,
            state: ProjectileState::Flying,
        },
        Position(origin),
        TriggerVolume {
            radius: tuning.radius,
        },
    ))
}

/// Spawn an asteroid drifting straight down and register it as a target.
pub fn spawn_asteroid(
    world: &mut World,
    registry: &mut TargetRegistry,
    tuning: &AsteroidTuning,
    position: DVec2,
) -> Entity {
    let entity = world.spawn((
        Asteroid {
            hit_points: tuning.hit_points,
            destroyed: false,
        },
        Position(position),
        Velocity::new(0.0, -tuning.speed),
        TriggerVolume {
            radius: tuning.radius,
        },
    ));
    registry.register(entity);
    entity
}

/// Spawn an explosion effect.
pub fn spawn_explosion(world: &mut World, position: DVec2, duration_secs: f64) -> Entity {
    world.spawn((
        Explosion {
            remaining_secs: duration_secs,
        },
        Position(position),
    ))
}
