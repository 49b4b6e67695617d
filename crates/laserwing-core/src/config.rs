//! Runtime tunables for a level.
//!
//! Every field has a default taken from `constants`, so a config file only
//! needs to list the values it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Ship tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipTuning {
    /// Horizontal speed (units/second).
    pub speed: f64,
    /// Volleys per second.
    pub rate_of_fire: f64,
    /// Distance above the ship at which lasers spawn.
    pub muzzle_offset: f64,
    pub radius: f64,
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self {
            speed: SHIP_SPEED,
            rate_of_fire: SHIP_RATE_OF_FIRE,
            muzzle_offset: SHIP_MUZZLE_OFFSET,
            radius: SHIP_RADIUS,
        }
    }
}

/// Laser tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub speed: f64,
    /// Seconds before an unspent laser is removed.
    pub lifetime_secs: f64,
    pub radius: f64,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: PROJECTILE_SPEED,
            lifetime_secs: PROJECTILE_LIFETIME,
            radius: PROJECTILE_RADIUS,
        }
    }
}

/// Asteroid tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidTuning {
    pub speed: f64,
    /// Seconds between spawns. Zero or less disables spawning.
    pub spawn_interval_secs: f64,
    pub hit_points: u32,
    pub radius: f64,
}

impl Default for AsteroidTuning {
    fn default() -> Self {
        Self {
            speed: ASTEROID_SPEED,
            spawn_interval_secs: ASTEROID_SPAWN_INTERVAL,
            hit_points: ASTEROID_HIT_POINTS,
            radius: ASTEROID_RADIUS,
        }
    }
}

/// All tunables for one level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub ship: ShipTuning,
    pub projectile: ProjectileTuning,
    pub asteroid: AsteroidTuning,
    /// Delay between ship death and level reload.
    pub restart_delay_secs: f64,
    pub explosion_secs: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ship: ShipTuning::default(),
            projectile: ProjectileTuning::default(),
            asteroid: AsteroidTuning::default(),
            restart_delay_secs: RESTART_DELAY,
            explosion_secs: EXPLOSION_DURATION,
        }
    }
}

impl GameConfig {
    /// Reject tunables the simulation cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("ship.speed", self.ship.speed),
            ("ship.rate_of_fire", self.ship.rate_of_fire),
            ("projectile.speed", self.projectile.speed),
            ("projectile.lifetime_secs", self.projectile.lifetime_secs),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{name} must be a positive number, got {value}"));
            }
        }

        let non_negative = [
            ("ship.muzzle_offset", self.ship.muzzle_offset),
            ("ship.radius", self.ship.radius),
            ("projectile.radius", self.projectile.radius),
            ("asteroid.speed", self.asteroid.speed),
            ("asteroid.radius", self.asteroid.radius),
            ("restart_delay_secs", self.restart_delay_secs),
            ("explosion_secs", self.explosion_secs),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("{name} must be zero or more, got {value}"));
            }
        }

        // Zero or less disables spawning; anything shorter than a tick cannot be honored.
        let interval = self.asteroid.spawn_interval_secs;
        if !interval.is_finite() || (interval > 0.0 && interval < DT) {
            return Err(format!(
                "asteroid.spawn_interval_secs must be at least one tick ({DT:.4}s) or zero to disable, got {interval}"
            ));
        }

        if self.asteroid.hit_points == 0 {
            return Err("asteroid.hit_points must be at least 1".to_string());
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| format!("Failed to parse config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let json = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        Self::from_json_str(&json)
    }
}
