//! Snapshot system: queries the ECS world and builds a GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use laserwing_core::components::*;
use laserwing_core::enums::*;
use laserwing_core::events::AudioEvent;
use laserwing_core::state::*;
use laserwing_core::types::{Position, SimTime};

use crate::score::ScoreState;
use crate::systems::{projectile, ship};

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    scene_generation: u32,
    audio_events: Vec<AudioEvent>,
    score: &ScoreState,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        scene_generation,
        ship: build_ship(world, time.elapsed_secs),
        projectiles: build_projectiles(world),
        asteroids: build_asteroids(world),
        explosions: build_explosions(world),
        audio_events,
        score: ScoreView {
            asteroids_destroyed: score.asteroids_destroyed,
            volleys_fired: score.volleys_fired,
            bombs_used: score.bombs_used,
        },
    }
}

fn build_ship(world: &World, now: f64) -> Option<ShipView> {
    world
        .query::<(&Ship, &Position)>()
        .iter()
        .next()
        .map(|(_, (s, pos))| ShipView {
            position: pos.0,
            state: s.state,
            visible: s.visible,
            cooldown_secs: ship::cooldown_remaining(s, now),
        })
}

/// Only lasers still in flight are visible.
fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Projectile, &Position)>()
        .iter()
        .filter(|(_, (p, _))| p.state == ProjectileState::Flying)
        .map(|(_, (p, pos))| ProjectileView {
            position: pos.0,
            direction: p.direction,
            rotation: projectile::rotation(p.direction),
            lifetime_secs: p.lifetime_secs,
        })
        .collect()
}

fn build_asteroids(world: &World) -> Vec<AsteroidView> {
    world
        .query::<(&Asteroid, &Position)>()
        .iter()
        .filter(|(_, (a, _))| !a.destroyed)
        .map(|(_, (a, pos))| AsteroidView {
            position: pos.0,
            hit_points: a.hit_points,
        })
        .collect()
}

fn build_explosions(world: &World) -> Vec<ExplosionView> {
    world
        .query::<(&Explosion, &Position)>()
        .iter()
        .map(|(_, (e, pos))| ExplosionView {
            position: pos.0,
            remaining_secs: e.remaining_secs.max(0.0),
        })
        .collect()
}
