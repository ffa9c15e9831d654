//! Open Lines - command-line shell
//!
//! Runs automated matches, replays scripted moves and reports line
//! statistics. Moves are never read interactively.

#![warn(missing_docs)]

mod cli;
mod runner;
mod settings;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use settings::Settings;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let overrides = cli.command.overrides();

    match cli.command {
        Command::Simulate { config, json, .. } => {
            let settings = match config {
                Some(path) => Settings::from_file(path)?,
                None => Settings::default(),
            };
            run_simulation(settings.with_overrides(overrides), json)
        }
        Command::Replay { moves, .. } => {
            run_replay(Settings::default().with_overrides(overrides), &moves)
        }
        Command::Lines { .. } => run_lines(Settings::default().with_overrides(overrides)),
    }
}

/// Play a full automated match
#[instrument(skip(settings))]
fn run_simulation(settings: Settings, json: bool) -> Result<()> {
    info!(size = settings.size(), seed = ?settings.seed(), "Starting simulation");
    let summary = runner::simulate(&settings)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary);
    }
    Ok(())
}

/// Apply scripted moves to a fresh round
#[instrument(skip(settings))]
fn run_replay(settings: Settings, moves: &[usize]) -> Result<()> {
    let round = runner::replay(&settings, moves)?;
    println!("Round {}", runner::describe(&round));
    print!("{}", round);
    Ok(())
}

/// Print line counts for a board
#[instrument(skip(settings))]
fn run_lines(settings: Settings) -> Result<()> {
    let report = runner::line_report(settings.board()?)?;
    print!("{}", report);
    Ok(())
}
