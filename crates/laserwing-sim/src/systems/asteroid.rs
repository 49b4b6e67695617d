//! Target-side handling for asteroids.

use glam::DVec2;
use hecs::{Entity, World};

use laserwing_core::components::Asteroid;
use laserwing_core::constants::PLAYFIELD_BOTTOM;
use laserwing_core::types::Position;

/// Position of an asteroid, if the entity still exists.
pub fn position_of(world: &World, entity: Entity) -> Option<DVec2> {
    world.get::<&Position>(entity).ok().map(|pos| pos.0)
}

/// Asteroids that drifted fully below the playfield.
pub fn collect_out_of_bounds(world: &World, out: &mut Vec<Entity>) {
    for (entity, (asteroid, pos)) in world.query::<(&Asteroid, &Position)>().iter() {
        if !asteroid.destroyed && pos.0.y < PLAYFIELD_BOTTOM {
            out.push(entity);
        }
    }
}
