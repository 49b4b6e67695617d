//! Player input sampling.
//!
//! `RawInput` is what a device reports each frame (axis value and held
//! keys). `InputTracker` turns consecutive samples into an `InputState`,
//! which carries the bomb key as a key-down edge.

use serde::{Deserialize, Serialize};

/// Device state for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    /// Horizontal axis, expected in [-1, 1].
    pub horizontal: f64,
    pub fire_held: bool,
    pub bomb_held: bool,
}

/// Input consumed by the ship for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    /// Horizontal axis, clamped to [-1, 1] when applied.
    pub horizontal: f64,
    /// Fire key is held down.
    pub fire_held: bool,
    /// Bomb key went down this tick.
    pub bomb_pressed: bool,
}

/// Derives key-down edges from held-key samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputTracker {
    bomb_was_held: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame of device state.
    pub fn sample(&mut self, raw: RawInput) -> InputState {
        let bomb_pressed = raw.bomb_held && !self.bomb_was_held;
        self.bomb_was_held = raw.bomb_held;
        InputState {
            horizontal: raw.horizontal,
            fire_held: raw.fire_held,
            bomb_pressed,
        }
    }
}
