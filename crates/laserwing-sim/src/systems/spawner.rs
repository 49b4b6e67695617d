//! Asteroid spawning: drops asteroids along the top edge on a fixed cadence.

use glam::DVec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use laserwing_core::config::AsteroidTuning;
use laserwing_core::constants::{PLAYFIELD_HALF_WIDTH, PLAYFIELD_TOP};

use crate::registry::TargetRegistry;

/// Spawn cadence state.
#[derive(Debug, Clone, Default)]
pub struct AsteroidSpawner {
    /// Seconds between spawns. Zero or less disables the spawner.
    pub interval_secs: f64,
    /// Sim time of the next spawn.
    pub next_spawn_secs: f64,
}

impl AsteroidSpawner {
    /// First spawn one interval after `now`.
    pub fn starting_at(now: f64, interval_secs: f64) -> Self {
        Self {
            interval_secs,
            next_spawn_secs: now + interval_secs,
        }
    }

    pub fn enabled(&self) -> bool {
        self.interval_secs > 0.0
    }
}

/// Spawn an asteroid if one is due. At most one spawns per call; a missed
/// cadence restarts from `now`. Returns how many were spawned.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    spawner: &mut AsteroidSpawner,
    registry: &mut TargetRegistry,
    tuning: &AsteroidTuning,
    now: f64,
) -> u32 {
    if !spawner.enabled() {
        return 0;
    }

    if now < spawner.next_spawn_secs {
        return 0;
    }

    let half_span = (PLAYFIELD_HALF_WIDTH - tuning.radius).max(0.0);
    let x = if half_span > 0.0 {
        rng.gen_range(-half_span..=half_span)
    } else {
        0.0
    };
    crate::world_setup::spawn_asteroid(
        world,
        registry,
        tuning,
        DVec2::new(x, PLAYFIELD_TOP + tuning.radius),
    );
    spawner.next_spawn_secs = spawner.next_spawn_secs.max(now) + spawner.interval_secs;
    1
}
