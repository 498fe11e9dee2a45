//! headless-run: step a seeded BROADSIDE session without a front end.
//!
//! Usage:
//!   headless-run --seed 7 --ticks 3600 --difficulty Hard
//!   headless-run --config session.json --ticks 600
//!
//! Prints a JSON summary of the final state on stdout. Set `RUST_LOG=debug`
//! to trace AI state changes and combat.

use std::process;

use log::info;
use serde_json::json;

use broadside_core::commands::PlayerCommand;
use broadside_core::config::{ConfigError, SimConfig};
use broadside_core::enums::{Difficulty, GamePhase};
use broadside_sim::SimulationEngine;

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| matches!(a.as_str(), "help" | "--help" | "-h")) {
        print_usage();
        return;
    }

    if let Err(message) = run(&args) {
        eprintln!("headless-run: {message}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "headless-run: BROADSIDE headless session runner\n\
         \n\
           --config <path>       JSON SimConfig (missing fields use defaults)\n\
           --seed <N>            RNG seed (overrides the config)\n\
           --difficulty <tier>   Easy, Medium or Hard (overrides the config)\n\
           --ticks <N>           Fixed steps to run (default: 3600)\n\
         \n\
         The player holds position and fires a broadside every second.\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_difficulty(value: &str) -> Result<Difficulty, String> {
    match value.to_ascii_lowercase().as_str() {
        "easy" => Ok(Difficulty::Easy),
        "medium" => Ok(Difficulty::Medium),
        "hard" => Ok(Difficulty::Hard),
        other => Err(format!("unknown difficulty: {other}")),
    }
}

fn load_config(args: &[String]) -> Result<SimConfig, String> {
    let mut config = match flag_value(args, "--config") {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {path}: {e}"))?;
            SimConfig::from_json(&text).map_err(|e: ConfigError| e.to_string())?
        }
        None => SimConfig::default(),
    };
    if let Some(seed) = flag_value(args, "--seed") {
        config.seed = seed
            .parse()
            .map_err(|_| format!("invalid seed: {seed}"))?;
    }
    if let Some(tier) = flag_value(args, "--difficulty") {
        config.difficulty = parse_difficulty(tier)?;
    }
    Ok(config)
}

fn run(args: &[String]) -> Result<(), String> {
    let config = load_config(args)?;
    let ticks: u64 = match flag_value(args, "--ticks") {
        Some(n) => n.parse().map_err(|_| format!("invalid tick count: {n}"))?,
        None => 3600,
    };
    let fire_every = (1.0 / config.dt).round().max(1.0) as u64;

    info!(
        "seed {} on {:?}, {} ticks",
        config.seed, config.difficulty, ticks
    );
    let mut engine = SimulationEngine::new(config).map_err(|e| e.to_string())?;
    engine.queue_command(PlayerCommand::StartSession { difficulty: None });

    let mut snapshot = engine.tick();
    let mut events = snapshot.events.len();
    for tick in 1..ticks {
        if tick % fire_every == 0 {
            engine.queue_command(PlayerCommand::FireBroadside);
        }
        snapshot = engine.tick();
        events += snapshot.events.len();
        if matches!(snapshot.phase, GamePhase::Victory | GamePhase::Defeat) {
            break;
        }
    }

    let summary = json!({
        "phase": snapshot.phase,
        "time": snapshot.time,
        "score": snapshot.score,
        "player": snapshot.player,
        "vessels": snapshot.vessels.len(),
        "colleges": snapshot.colleges,
        "events": events,
    });
    let text = serde_json::to_string_pretty(&summary).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}
