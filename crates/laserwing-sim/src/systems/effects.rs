//! Visual effect timers.

use hecs::World;

use laserwing_core::components::Explosion;

/// Count down every explosion.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, explosion) in world.query_mut::<&mut Explosion>() {
        explosion.remaining_secs -= dt;
    }
}
