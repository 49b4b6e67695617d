//! Game loop thread. Runs the simulation engine at the tick rate and
//! publishes snapshots.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. Snapshots are stored in shared state
//! for polling.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use laserwing_core::constants::TICK_RATE;
use laserwing_core::events::AudioEvent;
use laserwing_core::input::InputTracker;
use laserwing_core::state::GameStateSnapshot;
use laserwing_sim::engine::{SimConfig, SimulationEngine};

use crate::state::{GameLoopCommand, SharedSnapshot};

/// Nominal duration of one tick at 1x speed.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// A running game loop thread.
pub struct GameLoopHandle {
    pub commands: mpsc::Sender<GameLoopCommand>,
    thread: JoinHandle<()>,
}

impl GameLoopHandle {
    /// Wait for the loop to exit (after `Shutdown` or disconnect).
    pub fn join(self) -> Result<(), String> {
        self.thread
            .join()
            .map_err(|_| "Game loop thread panicked".to_string())
    }
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: SharedSnapshot,
) -> Result<GameLoopHandle, String> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let thread = std::thread::Builder::new()
        .name("laserwing-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })
        .map_err(|e| format!("Failed to spawn game loop thread: {e}"))?;

    Ok(GameLoopHandle {
        commands: cmd_tx,
        thread,
    })
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &SharedSnapshot,
) {
    let mut engine = SimulationEngine::new(config);
    let mut tracker = InputTracker::new();
    let mut next_tick_time = Instant::now();
    let mut generation = 0;

    loop {
        // 1. Drain all pending commands
        if !drain_commands(&cmd_rx, &mut engine, &mut tracker) {
            return;
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();
        report(&snapshot, &mut generation);

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick, adjusting for time_scale
        let effective_tick_duration = scaled_tick_duration(engine.time_scale());

        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

/// Forward everything queued on the channel to the engine. A bomb press
/// stays latched until the next tick even if later samples release the key.
/// Returns `false` once the loop should stop.
fn drain_commands(
    cmd_rx: &mpsc::Receiver<GameLoopCommand>,
    engine: &mut SimulationEngine,
    tracker: &mut InputTracker,
) -> bool {
    let mut bomb_latched = false;
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                engine.queue_command(cmd);
            }
            Ok(GameLoopCommand::Input(raw)) => {
                let mut input = tracker.sample(raw);
                bomb_latched |= input.bomb_pressed;
                input.bomb_pressed = bomb_latched;
                engine.set_input(input);
            }
            Ok(GameLoopCommand::Shutdown) => {
                log::info!("Game loop shutting down");
                return false;
            }
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

/// Wall-clock length of one tick. The engine keeps `time_scale` positive.
fn scaled_tick_duration(time_scale: f64) -> Duration {
    TICK_DURATION.div_f64(time_scale)
}

/// Log what a presenter would show or play for this tick.
fn report(snapshot: &GameStateSnapshot, generation: &mut u32) {
    if snapshot.scene_generation != *generation {
        *generation = snapshot.scene_generation;
        log::info!(
            "Level reloaded at {:.2}s (generation {})",
            snapshot.time.elapsed_secs,
            snapshot.scene_generation
        );
    }
    for event in &snapshot.audio_events {
        match event {
            AudioEvent::ShipExploded { position } => {
                log::info!("Ship exploded at {position}");
            }
            other => log::debug!("{other:?}"),
        }
    }
}
