//! Scripted pilot used by the headless runner.
//!
//! Reads the latest snapshot and produces device input: slides under the
//! lowest asteroid, keeps the trigger held and taps the bomb when the lower
//! half of the playfield gets crowded.

use laserwing_core::enums::ShipState;
use laserwing_core::input::RawInput;
use laserwing_core::state::GameStateSnapshot;

/// Asteroids below this height count toward the bomb threshold.
const DANGER_LINE: f64 = 0.0;

/// Horizontal distance treated as "lined up".
const AIM_TOLERANCE: f64 = 0.25;

pub struct Autopilot {
    /// Bomb once at least this many asteroids are below the danger line.
    pub bomb_threshold: usize,
    bomb_was_held: bool,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            bomb_threshold: 4,
            bomb_was_held: false,
        }
    }
}

impl Autopilot {
    pub fn new(bomb_threshold: usize) -> Self {
        Self {
            bomb_threshold,
            ..Self::default()
        }
    }

    /// Input for the frame after `snapshot`.
    pub fn steer(&mut self, snapshot: &GameStateSnapshot) -> RawInput {
        let Some(ship) = snapshot
            .ship
            .as_ref()
            .filter(|s| s.state == ShipState::Alive)
        else {
            self.bomb_was_held = false;
            return RawInput::default();
        };

        let target = snapshot
            .asteroids
            .iter()
            .min_by(|a, b| a.position.y.total_cmp(&b.position.y));

        let horizontal = match target {
            Some(asteroid) => {
                let dx = asteroid.position.x - ship.position.x;
                if dx.abs() <= AIM_TOLERANCE {
                    0.0
                } else {
                    dx.signum()
                }
            }
            None => 0.0,
        };

        let crowded = snapshot
            .asteroids
            .iter()
            .filter(|a| a.position.y < DANGER_LINE)
            .count()
            >= self.bomb_threshold;
        // Release for a frame after each press so the next one is an edge.
        let bomb_held = crowded && !self.bomb_was_held;
        self.bomb_was_held = bomb_held;

        RawInput {
            horizontal,
            fire_held: true,
            bomb_held,
        }
    }
}
