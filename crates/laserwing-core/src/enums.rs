//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Ship lifecycle. `Dead` is terminal; a level reload spawns a fresh ship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipState {
    #[default]
    Alive,
    Dead,
}

/// Projectile lifecycle. Both non-flying states are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileState {
    #[default]
    Flying,
    /// Lifetime ran out.
    Expired,
    /// Consumed by a hit on a target.
    Spent,
}

/// Result of delivering a hit to a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitOutcome {
    /// Target absorbed the hit and is still alive.
    Damaged,
    /// This hit destroyed the target.
    Destroyed,
    /// Target was already destroyed; the hit had no effect.
    Ignored,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
}
