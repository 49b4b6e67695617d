//! Game state snapshot: the complete visible state after each tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::AudioEvent;
use crate::types::SimTime;

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    /// Number of level reloads since the engine was created.
    pub scene_generation: u32,
    pub ship: Option<ShipView>,
    pub projectiles: Vec<ProjectileView>,
    pub asteroids: Vec<AsteroidView>,
    pub explosions: Vec<ExplosionView>,
    pub audio_events: Vec<AudioEvent>,
    pub score: ScoreView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipView {
    pub position: DVec2,
    pub state: ShipState,
    pub visible: bool,
    /// Seconds until the next volley is allowed (0 when ready).
    pub cooldown_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: DVec2,
    pub direction: DVec2,
    /// Rotation in radians for sprite orientation (0 = pointing up).
    pub rotation: f64,
    pub lifetime_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsteroidView {
    pub position: DVec2,
    pub hit_points: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionView {
    pub position: DVec2,
    pub remaining_secs: f64,
}

/// Running score for the current level.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub asteroids_destroyed: u32,
    pub volleys_fired: u32,
    pub bombs_used: u32,
}
