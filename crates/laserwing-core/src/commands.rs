//! Player commands sent to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.
//! Continuous controls (axis, held keys) travel as `InputState` instead.

use serde::{Deserialize, Serialize};

/// All discrete player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Load the level and start ticking.
    StartGame,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Set time scale (1.0 = normal, 2.0 = double, 0.0 = frozen).
    SetTimeScale { scale: f64 },
    /// Reload the level immediately.
    Restart,
}
