use std::fs;
use std::path::PathBuf;

use klondike_bot::EngineError;
use klondike_core::AppInfo;
use klondike_core::game::serialization::TableSnapshot;
use klondike_core::game::table::TableState;
use serde_json::json;

use crate::driver::{DriverConfig, play_from, play_seeded, run_batch};
use crate::render::render;

pub enum CliOutcome {
    Handled,
    NotHandled,
}

#[derive(Debug)]
pub enum CliError {
    UnknownCommand(String),
    MissingArgument(&'static str),
    InvalidNumber(String),
    Io(std::io::Error),
    Json(serde_json::Error),
    Engine(EngineError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::UnknownCommand(cmd) => write!(f, "Unknown command: {cmd}"),
            CliError::MissingArgument(arg) => write!(f, "Missing argument: {arg}"),
            CliError::InvalidNumber(value) => write!(f, "Invalid number: {value}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Engine(err) => write!(f, "Engine error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        CliError::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        CliError::Json(value)
    }
}

impl From<EngineError> for CliError {
    fn from(value: EngineError) -> Self {
        CliError::Engine(value)
    }
}

pub fn run_cli() -> Result<CliOutcome, CliError> {
    run_with_args(std::env::args().skip(1).collect())
}

pub fn run_with_args(args: Vec<String>) -> Result<CliOutcome, CliError> {
    let mut args = args.into_iter();
    let Some(cmd) = args.next() else {
        return Ok(CliOutcome::NotHandled);
    };

    match cmd.as_str() {
        "--export-snapshot" => {
            let path = args
                .next()
                .map(PathBuf::from)
                .ok_or(CliError::MissingArgument(
                    "--export-snapshot <path> [--seed <number>]",
                ))?;
            let mut seed: Option<u64> = None;
            while let Some(flag) = args.next() {
                match flag.as_str() {
                    "--seed" => {
                        let value = args
                            .next()
                            .ok_or(CliError::MissingArgument("--seed <number>"))?;
                        seed = Some(parse_number(value)?);
                    }
                    _ => {
                        return Err(CliError::UnknownCommand(format!("Unknown flag: {flag}")));
                    }
                }
            }
            export_snapshot(path, seed.unwrap_or_else(rand::random))?;
            Ok(CliOutcome::Handled)
        }
        "--import-snapshot" => {
            let path = args
                .next()
                .map(PathBuf::from)
                .ok_or(CliError::MissingArgument("--import-snapshot <path>"))?;
            let mut config = DriverConfig::default();
            while let Some(flag) = args.next() {
                match flag.as_str() {
                    "--max-steps" => {
                        let value = args
                            .next()
                            .ok_or(CliError::MissingArgument("--max-steps <count>"))?;
                        config.max_steps = parse_number(value)?;
                    }
                    "--quiet" | "-q" => config.quiet = true,
                    _ => {
                        return Err(CliError::UnknownCommand(format!("Unknown flag: {flag}")));
                    }
                }
            }
            import_snapshot(path, &config)?;
            Ok(CliOutcome::Handled)
        }
        "--seed" | "--games" | "--max-steps" | "--quiet" | "-q" => {
            run_games(std::iter::once(cmd).chain(args))
        }
        "--help" | "-h" => {
            let help = concat!(
                "Usage: mdklondike [flags]\n",
                "\n",
                "Playing:\n",
                "  --seed <number>      Deal this seed (default: random)\n",
                "  --games <count>      Play this many consecutive seeds and print stats\n",
                "  --max-steps <count>  Step cap per game (default: 500)\n",
                "  --quiet, -q          Suppress table rendering and progress lines\n",
                "\n",
                "Snapshots:\n",
                "  --export-snapshot <path> [--seed <number>]\n",
                "                       Write the dealt table for a seed as JSON\n",
                "  --import-snapshot <path> [--max-steps <count>] [--quiet]\n",
                "                       Load a snapshot and play it out\n",
                "\n",
                "  --help, -h           Show this help message\n",
                "  --version, -V        Print name and version"
            );
            println!("{help}");
            Ok(CliOutcome::Handled)
        }
        "--version" | "-V" => {
            println!("{} {}", AppInfo::name(), AppInfo::version());
            Ok(CliOutcome::Handled)
        }
        other => Err(CliError::UnknownCommand(other.to_string())),
    }
}

/// Entry point when no command-line flags were given: one fresh game.
pub fn run_default() -> Result<(), CliError> {
    play_one(rand::random(), &DriverConfig::default())
}

fn run_games(mut args: impl Iterator<Item = String>) -> Result<CliOutcome, CliError> {
    let mut seed: Option<u64> = None;
    let mut games: Option<usize> = None;
    let mut config = DriverConfig::default();

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--seed" => {
                let value = args
                    .next()
                    .ok_or(CliError::MissingArgument("--seed <number>"))?;
                seed = Some(parse_number(value)?);
            }
            "--games" => {
                let value = args
                    .next()
                    .ok_or(CliError::MissingArgument("--games <count>"))?;
                games = Some(parse_number(value)?);
            }
            "--max-steps" => {
                let value = args
                    .next()
                    .ok_or(CliError::MissingArgument("--max-steps <count>"))?;
                config.max_steps = parse_number(value)?;
            }
            "--quiet" | "-q" => config.quiet = true,
            _ => {
                return Err(CliError::UnknownCommand(format!("Unknown flag: {flag}")));
            }
        }
    }

    match games {
        // Batches default to seed 0 so repeated runs compare like for like.
        Some(count) => run_stats(seed.unwrap_or(0), count, &config)?,
        None => play_one(seed.unwrap_or_else(rand::random), &config)?,
    }
    Ok(CliOutcome::Handled)
}

fn play_one(seed: u64, config: &DriverConfig) -> Result<(), CliError> {
    println!("Playing seed {seed}");
    let (report, state) = play_seeded(seed, config)?;
    if !config.quiet {
        print!("{}", render(&state));
    }
    println!(
        "Seed {}: {:?} after {} steps, {} promoted",
        report.seed, report.outcome, report.steps, report.promoted
    );
    Ok(())
}

fn run_stats(first_seed: u64, games: usize, config: &DriverConfig) -> Result<(), CliError> {
    println!("Running {games} games from seed {first_seed}");
    let summary = run_batch(first_seed, games, config)?;

    let report = json!({
        "games": summary.games,
        "wins": summary.wins,
        "stuck": summary.stuck,
        "capped": summary.capped,
        "win_rate": summary.win_rate(),
        "avg_promoted": summary.average_promoted(),
        "elapsed_seconds": summary.elapsed_seconds,
    });
    println!("\nFinal Summary:");
    println!("{}", serde_json::to_string_pretty(&report).unwrap());
    Ok(())
}

fn export_snapshot(path: PathBuf, seed: u64) -> Result<(), CliError> {
    let state = TableState::deal_with_seed(seed);
    let json = TableSnapshot::to_json(&state)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, json)?;
    println!("Snapshot saved to {}\nSeed: {seed}", path.display());
    Ok(())
}

fn import_snapshot(path: PathBuf, config: &DriverConfig) -> Result<(), CliError> {
    if !path.exists() {
        return Err(CliError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Snapshot not found: {}", path.display()),
        )));
    }

    let json = fs::read_to_string(&path)?;
    let state = TableSnapshot::from_json(&json)?.restore();
    println!("Snapshot loaded from {}", path.display());
    if !config.quiet {
        print!("{}", render(&state));
    }
    let (report, state) = play_from(state, 0, config)?;
    if !config.quiet {
        print!("{}", render(&state));
    }
    println!(
        "Outcome: {:?} after {} steps, {} promoted",
        report.outcome, report.steps, report.promoted
    );
    Ok(())
}

fn parse_number<T: std::str::FromStr>(value: String) -> Result<T, CliError> {
    value.parse::<T>().map_err(|_| CliError::InvalidNumber(value))
}
