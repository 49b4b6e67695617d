//! Cleanup system: removes spent lasers, dead asteroids and finished effects.

use hecs::{Entity, World};

use laserwing_core::components::{Asteroid, Explosion, Projectile};
use laserwing_core::enums::ProjectileState;

use crate::registry::TargetRegistry;
use crate::systems::asteroid;

/// Despawn everything in a terminal state.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, registry: &mut TargetRegistry, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    // Lasers that expired or hit something.
    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if projectile.state != ProjectileState::Flying {
            despawn_buffer.push(entity);
        }
    }

    // Destroyed asteroids.
    for (entity, asteroid) in world.query_mut::<&Asteroid>() {
        if asteroid.destroyed {
            despawn_buffer.push(entity);
        }
    }

    // Asteroids that left the playfield.
    asteroid::collect_out_of_bounds(world, despawn_buffer);

    // Finished explosions.
    for (entity, explosion) in world.query_mut::<&Explosion>() {
        if explosion.remaining_secs <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        registry.unregister(entity);
        let _ = world.despawn(entity);
    }
}
