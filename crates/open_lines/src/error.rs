//! Error type shared by every engine operation.

use crate::types::CellIndex;

/// Errors raised by the board, the round and match bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// Board size, line length or roster outside the supported bounds.
    #[display("Invalid configuration: {}", _0)]
    InvalidConfiguration(String),

    /// The cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    OccupiedCell(CellIndex),

    /// The cell index does not exist on this board.
    #[display("Cell {} is out of range (1-{})", index, cells)]
    OutOfRange {
        /// Requested 1-based index.
        index: usize,
        /// Number of cells on the board.
        cells: usize,
    },

    /// The round already reached a terminal state.
    #[display("Round is already over")]
    RoundAlreadyOver,

    /// A finished round was expected.
    #[display("Round is still in progress")]
    RoundInProgress,

    /// The round was not the latest one started by this match.
    #[display("Round was not started by this match")]
    ForeignRound,

    /// The round already counts toward the match score.
    #[display("Round was already scored")]
    RoundAlreadyScored,

    /// No registered player has this name.
    #[display("Unknown player: {}", _0)]
    UnknownPlayer(String),

    /// A scripted move source has no moves left.
    #[display("No scripted moves left")]
    MovesExhausted,

    /// A postcondition check failed after a move.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for EngineError {}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
