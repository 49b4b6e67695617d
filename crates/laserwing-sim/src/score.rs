//! Running score and level statistics.
//!
//! Stored in `SimulationEngine`, NOT as ECS entities. Reset on level reload.

/// Running score state tracked by the engine.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub asteroids_destroyed: u32,
    pub volleys_fired: u32,
    pub bombs_used: u32,
    /// Lasers removed because their lifetime ran out.
    pub projectiles_expired: u32,
    /// Lasers consumed by a hit.
    pub projectiles_spent: u32,
}
