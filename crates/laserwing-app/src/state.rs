//! State shared between the runner and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use laserwing_core::commands::PlayerCommand;
use laserwing_core::input::RawInput;
use laserwing_core::state::GameStateSnapshot;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Latest device state; key-down edges are derived on the loop thread.
    Input(RawInput),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, written by the game loop after each tick.
pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

/// Handles held by the runner.
pub struct AppState {
    /// Channel to the game loop. `None` until the loop is started.
    pub command_tx: Option<mpsc::Sender<GameLoopCommand>>,
    pub latest_snapshot: SharedSnapshot,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: None,
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send a command to the loop. Fails if the loop is not running.
    pub fn send(&self, command: GameLoopCommand) -> Result<(), String> {
        let tx = self
            .command_tx
            .as_ref()
            .ok_or_else(|| "Game loop is not running".to_string())?;
        tx.send(command)
            .map_err(|e| format!("Game loop channel closed: {e}"))
    }

    /// Clone of the most recent snapshot, if any.
    pub fn snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }
}
