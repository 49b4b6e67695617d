//! Kinematic integration for velocity-driven entities (asteroids).
//!
//! Lasers move themselves in `projectile`; the ship moves from input.

use hecs::World;

use laserwing_core::types::{Position, Velocity};

/// position += velocity * dt for all entities with Position + Velocity.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.0 += vel.0 * dt;
    }
}
