//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components or the engine.

pub mod asteroid;
pub mod cleanup;
pub mod effects;
pub mod movement;
pub mod projectile;
pub mod ship;
pub mod snapshot;
pub mod spawner;
pub mod triggers;
