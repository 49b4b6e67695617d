//! Laser flight: direction setup, movement, lifetime and hits.

use std::f64::consts::FRAC_PI_2;

use glam::DVec2;
use hecs::World;

use laserwing_core::components::{Hitable, Projectile};
use laserwing_core::enums::{HitOutcome, ProjectileState};
use laserwing_core::types::Position;

/// Normalize a requested travel direction.
///
/// A zero or non-finite request has no orientation; it falls back to
/// straight up.
pub fn initialize_direction(requested: DVec2) -> DVec2 {
    match requested.try_normalize() {
        Some(direction) => direction,
        None => {
            log::warn!("projectile direction {requested} cannot be normalized, firing straight up");
            DVec2::Y
        }
    }
}

/// Advance one laser by `dt` seconds and return its state afterwards.
/// Lasers that are no longer flying are left untouched.
pub fn advance(projectile: &mut Projectile, position: &mut Position, dt: f64) -> ProjectileState {
    if projectile.state != ProjectileState::Flying {
        return projectile.state;
    }
    let dt = dt.max(0.0);

    position.0 += projectile.direction * projectile.speed * dt;
    projectile.lifetime_secs -= dt;
    if projectile.lifetime_secs <= 0.0 {
        projectile.state = ProjectileState::Expired;
    }
    projectile.state
}

/// Handle an overlap with another entity.
///
/// `target` is `None` when the other entity is not hit-able; such overlaps
/// are ignored. A flying laser hits the target once and is spent.
pub fn on_overlap(
    projectile: &mut Projectile,
    target: Option<&mut dyn Hitable>,
) -> Option<HitOutcome> {
    if projectile.state != ProjectileState::Flying {
        return None;
    }
    let target = target?;
    let outcome = target.register_hit();
    projectile.state = ProjectileState::Spent;
    Some(outcome)
}

/// Sprite rotation for a direction, in radians (0 = pointing up).
pub fn rotation(direction: DVec2) -> f64 {
    direction.y.atan2(direction.x) - FRAC_PI_2
}

/// Fly every laser. Returns how many expired this tick.
pub fn run(world: &mut World, dt: f64) -> u32 {
    let mut expired = 0;
    for (_entity, (projectile, pos)) in world.query_mut::<(&mut Projectile, &mut Position)>() {
        let was_flying = projectile.state == ProjectileState::Flying;
        if was_flying && advance(projectile, pos, dt) == ProjectileState::Expired {
            expired += 1;
        }
    }
    expired
}
