//! Simulation engine for LASERWING.
//!
//! Owns the hecs ECS world, runs systems once per tick, keeps the deferred
//! action queue and the target registry, and produces GameStateSnapshots.

pub mod engine;
pub mod registry;
pub mod score;
pub mod systems;
pub mod timers;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use laserwing_core as core;

#[cfg(test)]
mod tests;
