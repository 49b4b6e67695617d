//! Trigger overlap pass.
//!
//! Circle-vs-circle tests between all trigger volumes. Only pairs that start
//! overlapping this tick are reported, matching enter-style notifications.

use std::collections::HashSet;

use glam::DVec2;
use hecs::{Entity, World};

use laserwing_core::components::{Asteroid, TriggerVolume};
use laserwing_core::types::Position;

/// Return pairs that began overlapping since the previous call.
/// `active` carries the overlapping set between ticks.
pub fn run(world: &World, active: &mut HashSet<(Entity, Entity)>) -> Vec<(Entity, Entity)> {
    let volumes: Vec<(Entity, DVec2, f64, bool)> = world
        .query::<(&Position, &TriggerVolume, Option<&Asteroid>)>()
        .iter()
        .map(|(entity, (pos, volume, asteroid))| {
            (entity, pos.0, volume.radius, asteroid.is_some())
        })
        .collect();

    let mut current = HashSet::new();
    let mut entered = Vec::new();
    for (i, &(a, pos_a, radius_a, a_is_asteroid)) in volumes.iter().enumerate() {
        for &(b, pos_b, radius_b, b_is_asteroid) in &volumes[i + 1..] {
            // Asteroids do not react to each other.
            if a_is_asteroid && b_is_asteroid {
                continue;
            }
            let reach = radius_a + radius_b;
            if pos_a.distance_squared(pos_b) > reach * reach {
                continue;
            }
            current.insert((a, b));
            if !active.contains(&(a, b)) && !active.contains(&(b, a)) {
                entered.push((a, b));
            }
        }
    }

    *active = current;
    entered
}
