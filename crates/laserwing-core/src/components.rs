//! ECS components for hecs entities.
//!
//! Components are plain data. Game logic lives in systems; the one exception
//! is the `Hitable` capability, which targets implement themselves.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// The player ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    /// Horizontal speed (units/second).
    pub speed: f64,
    /// Volleys per second.
    pub rate_of_fire: f64,
    /// Distance above the ship at which lasers spawn.
    pub muzzle_offset: f64,
    /// Sim time of the last volley. `None` until the first shot.
    pub last_fire_secs: Option<f64>,
    pub state: ShipState,
    /// Cleared on death; the entity stays alive until the level reloads.
    pub visible: bool,
}

/// A laser fired by the ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Unit-length travel direction.
    pub direction: DVec2,
    pub speed: f64,
    /// Seconds left before expiry.
    pub lifetime_secs: f64,
    pub state: ProjectileState,
}

/// A falling asteroid. The only target kind in the level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub hit_points: u32,
    pub destroyed: bool,
}

/// Short-lived explosion effect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Explosion {
    pub remaining_secs: f64,
}

/// Circular trigger volume used for overlap notifications.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TriggerVolume {
    pub radius: f64,
}

/// Capability of entities that can be hit by lasers and bombs.
pub trait Hitable {
    /// Deliver one hit.
    fn register_hit(&mut self) -> HitOutcome;
}

impl Hitable for Asteroid {
    fn register_hit(&mut self) -> HitOutcome {
        if self.destroyed {
            return HitOutcome::Ignored;
        }
        self.hit_points = self.hit_points.saturating_sub(1);
        if self.hit_points == 0 {
            self.destroyed = true;
            HitOutcome::Destroyed
        } else {
            HitOutcome::Damaged
        }
    }
}
