//! Command-line interface for open_lines.

use crate::settings::{Overrides, PlayerSettings};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Open Lines - tic-tac-toe on large boards for any number of players
#[derive(Parser, Debug)]
#[command(name = "open_lines")]
#[command(about = "Run automated open_lines matches", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a full match between automated players
    Simulate {
        /// Path to a TOML settings file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Board edge
        #[arg(long)]
        size: Option<usize>,

        /// Cells in a winning line
        #[arg(long)]
        line_length: Option<usize>,

        /// Round wins needed to take the match
        #[arg(long)]
        rounds_to_win: Option<u32>,

        /// Seed for reproducible tie-breaks
        #[arg(long)]
        seed: Option<u64>,

        /// Player as NAME:MARK; repeat for each player
        #[arg(short, long = "player")]
        players: Vec<PlayerSettings>,

        /// Print the final standings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a list of moves to a fresh round and print the result
    Replay {
        /// Board edge
        #[arg(long, default_value = "5")]
        size: usize,

        /// Cells in a winning line
        #[arg(long)]
        line_length: Option<usize>,

        /// Player as NAME:MARK, in playing order
        #[arg(short, long = "player")]
        players: Vec<PlayerSettings>,

        /// Cells to mark, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        moves: Vec<usize>,
    },

    /// Show how many lines a board holds
    Lines {
        /// Board edge
        #[arg(long, default_value = "5")]
        size: usize,

        /// Cells in a winning line
        #[arg(long)]
        line_length: Option<usize>,
    },
}

impl Command {
    /// Flag values that take precedence over a settings file.
    pub fn overrides(&self) -> Overrides {
        match self {
            Command::Simulate {
                size,
                line_length,
                rounds_to_win,
                seed,
                players,
                ..
            } => Overrides {
                size: *size,
                line_length: *line_length,
                rounds_to_win: *rounds_to_win,
                seed: *seed,
                players: players.clone(),
            },
            Command::Replay {
                size,
                line_length,
                players,
                ..
            } => Overrides {
                size: Some(*size),
                line_length: *line_length,
                players: players.clone(),
                ..Overrides::default()
            },
            Command::Lines { size, line_length } => Overrides {
                size: Some(*size),
                line_length: *line_length,
                ..Overrides::default()
            },
        }
    }
}
