//! Open Lines - generalized tic-tac-toe engine
//!
//! Any number of players take turns marking an N×N board; the first to
//! own K consecutive cells in a row, column or diagonal wins the round.
//! Rounds end in a tie as soon as no line can still be completed.
//!
//! # Architecture
//!
//! - **Lines**: every K-cell window on the board, indexed by cell
//! - **Tracker**: which lines are still winnable, globally and per player
//! - **Outcome**: win and early-tie detection after each move
//! - **Selector**: rule-based move choice for automated players
//! - **Match**: rounds played until someone reaches the winning score
//!
//! # Example
//!
//! ```
//! use open_lines::{CellIndex, Player, RoundState, new_round};
//!
//! # fn example() -> open_lines::Result<()> {
//! let players = vec![
//!     Player::automated("Alice", "X")?,
//!     Player::automated("Bruno", "O")?,
//! ];
//! let mut round = new_round(5, 4, players, &["Alice", "Bruno"])?;
//! let report = round.apply_move(CellIndex::new(13))?;
//! assert_eq!(report.state, RoundState::InProgress);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod config;
mod driver;
mod error;
mod lines;
mod match_play;
mod outcome;
mod player;
mod round;
mod selector;
mod tracker;
mod turns;
mod types;

pub mod invariants;

// Crate-level exports - Core types
pub use error::{EngineError, Result};
pub use types::{CellIndex, LineId, Seat};

// Crate-level exports - Configuration and players
pub use config::{
    BoardConfig, DEFAULT_ROUNDS_TO_WIN, MIN_BOARD_SIZE, MIN_LINE_LENGTH, MatchConfig,
};
pub use player::{
    MAX_MARK_CHARS, MAX_NAME_CHARS, MIN_NAME_CHARS, Mark, Player, PlayerKind, Roster,
};

// Crate-level exports - Board and lines
pub use board::{Board, Square};
pub use lines::{Direction, Line, LineIndex};
pub use tracker::{LineTally, LiveLineTracker, MoveEffect};
pub use turns::TurnOrder;

// Crate-level exports - Rounds and outcome
pub use outcome::{RoundState, WinDetector, completable_within, no_line_completable};
pub use round::{MoveRecord, MoveReport, Round, new_round};

// Crate-level exports - Move selection
pub use selector::{
    ExtendOwnLine, FirstCandidate, Heuristic, HeuristicChain, ImminentLine, MostCoverage,
    MoveSelector, OpeningMove, RandomTieBreak, StandardRules, TieBreak, finalists,
};

// Crate-level exports - Driving play
pub use driver::{MoveSource, ScriptedMoves, play_round};
pub use match_play::{Match, MatchStatus};
