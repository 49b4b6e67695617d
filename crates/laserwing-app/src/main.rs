use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::{Duration, Instant};

use laserwing_app::autopilot::Autopilot;
use laserwing_app::game_loop::spawn_game_loop;
use laserwing_app::state::{AppState, GameLoopCommand};
use laserwing_core::commands::PlayerCommand;
use laserwing_core::config::GameConfig;
use laserwing_sim::engine::SimConfig;

/// How often the runner samples the autopilot.
const INPUT_INTERVAL: Duration = Duration::from_millis(20);

struct RunArgs {
    config: Option<PathBuf>,
    seconds: f64,
    seed: u64,
    time_scale: f64,
    dump_json: bool,
}

fn main() {
    let _ = env_logger::Builder::from_default_env().try_init();

    let args: Vec<String> = std::env::args().collect();
    if matches!(
        args.get(1).map(String::as_str),
        Some("help" | "--help" | "-h")
    ) {
        print_usage();
        return;
    }

    let run_args = match parse_args(&args[1..]) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = run(run_args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "laserwing: headless LASERWING simulation runner\n\
         \n\
           --config <path>     Game config JSON (optional, default tunables otherwise)\n\
           --seconds <N>       Wall-clock seconds to run (default: 10)\n\
           --seed <N>          RNG seed (default: 42)\n\
           --time-scale <N>    Simulation speed multiplier, 0.1 to 4 (default: 1)\n\
           --json              Print the final snapshot as JSON on stdout\n\
         \n\
         Set RUST_LOG=info (or debug) to see game events.\n\
         \n\
         Example:\n\
         \n\
           RUST_LOG=info laserwing --seconds 30 --time-scale 4 --seed 7"
    );
}

fn parse_args(args: &[String]) -> Result<RunArgs, String> {
    let mut run_args = RunArgs {
        config: None,
        seconds: 10.0,
        seed: SimConfig::default().seed,
        time_scale: 1.0,
        dump_json: false,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path = args.get(i).ok_or("--config requires a path")?;
                run_args.config = Some(PathBuf::from(path));
            }
            "--seconds" => {
                i += 1;
                let value = args.get(i).ok_or("--seconds requires a value")?;
                run_args.seconds = value
                    .parse()
                    .map_err(|e| format!("Invalid --seconds '{value}': {e}"))?;
                if !run_args.seconds.is_finite() || run_args.seconds <= 0.0 {
                    return Err("--seconds must be positive".into());
                }
            }
            "--seed" => {
                i += 1;
                let value = args.get(i).ok_or("--seed requires a value")?;
                run_args.seed = value
                    .parse()
                    .map_err(|e| format!("Invalid --seed '{value}': {e}"))?;
            }
            "--time-scale" => {
                i += 1;
                let value = args.get(i).ok_or("--time-scale requires a value")?;
                run_args.time_scale = value
                    .parse()
                    .map_err(|e| format!("Invalid --time-scale '{value}': {e}"))?;
            }
            "--json" => run_args.dump_json = true,
            other => return Err(format!("Unknown argument: {other}")),
        }
        i += 1;
    }

    Ok(run_args)
}

fn run(args: RunArgs) -> Result<(), String> {
    let game = match &args.config {
        Some(path) => {
            let game = GameConfig::load_from_file(path)?;
            log::info!("Loaded config from {}", path.display());
            game
        }
        None => GameConfig::default(),
    };

    let config = SimConfig {
        seed: args.seed,
        time_scale: args.time_scale,
        game,
    };

    let mut app = AppState::new();
    let handle = spawn_game_loop(config, Arc::clone(&app.latest_snapshot))?;
    app.command_tx = Some(handle.commands.clone());

    app.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartGame))?;

    let mut pilot = Autopilot::default();
    let deadline = Instant::now() + Duration::from_secs_f64(args.seconds);
    while Instant::now() < deadline {
        if let Some(snapshot) = app.snapshot() {
            app.send(GameLoopCommand::Input(pilot.steer(&snapshot)))?;
        }
        std::thread::sleep(INPUT_INTERVAL);
    }

    app.send(GameLoopCommand::Shutdown)?;
    handle.join()?;

    let Some(snapshot) = app.snapshot() else {
        return Err("Game loop produced no snapshot".into());
    };

    log::info!(
        "Ran {} ticks ({:.1}s sim): {} asteroids destroyed, {} volleys, {} bombs, {} reloads",
        snapshot.time.tick,
        snapshot.time.elapsed_secs,
        snapshot.score.asteroids_destroyed,
        snapshot.score.volleys_fired,
        snapshot.score.bombs_used,
        snapshot.scene_generation
    );

    if args.dump_json {
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| format!("Failed to serialize snapshot: {e}"))?;
        println!("{json}");
    }

    Ok(())
}
