//! Events emitted by the simulation for audio and visual feedback.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// One-shot sounds, played at a world position. Fire-and-forget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// The ship fired a volley.
    LaserFired { position: DVec2 },
    /// The ship was destroyed.
    ShipExploded { position: DVec2 },
    /// An asteroid was destroyed by a laser or bomb.
    AsteroidDestroyed { position: DVec2 },
}
