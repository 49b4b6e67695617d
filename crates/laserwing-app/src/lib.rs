//! LASERWING headless runner.
//!
//! Drives the simulation engine on its own thread at a fixed tick rate and
//! feeds it input from a simple autopilot.

pub mod autopilot;
pub mod game_loop;
pub mod state;

pub use laserwing_core as core;
