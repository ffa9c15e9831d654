//! Board and match configuration.
//!
//! Dimensions are passed explicitly into every round so that several
//! rounds (or tests) can run side by side without sharing state.

use crate::error::{EngineError, Result};
use derive_getters::Getters;
use serde::Serialize;
use tracing::instrument;

/// Smallest supported board edge.
pub const MIN_BOARD_SIZE: usize = 3;

/// Shortest winning line.
pub const MIN_LINE_LENGTH: usize = 4;

/// Round wins needed to take a match unless configured otherwise.
pub const DEFAULT_ROUNDS_TO_WIN: u32 = 5;

/// Dimensions of a board and the length of a winning line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Getters, Serialize)]
pub struct BoardConfig {
    /// Cells per row (and per column).
    size: usize,
    /// Consecutive cells needed to win.
    line_length: usize,
}

impl BoardConfig {
    /// Validates and creates a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if `size` is below
    /// [`MIN_BOARD_SIZE`] or `line_length` is outside
    /// `MIN_LINE_LENGTH..=size`.
    #[instrument]
    pub fn new(size: usize, line_length: usize) -> Result<Self> {
        validate_size(size)?;
        validate_line_length(size, line_length)?;
        Ok(Self { size, line_length })
    }

    /// Uses the shortest allowed winning line for this board.
    #[instrument]
    pub fn with_default_line(size: usize) -> Result<Self> {
        Self::new(size, MIN_LINE_LENGTH.min(size))
    }

    /// Number of cells on the board.
    pub fn cells(&self) -> usize {
        self.size * self.size
    }

    /// Largest roster that still leaves every player room to win.
    pub fn max_players(&self) -> usize {
        ((self.cells() - 1) / (self.line_length - 1)) / 2
    }
}

/// Checks the board edge on its own.
pub(crate) fn validate_size(size: usize) -> Result<()> {
    if size < MIN_BOARD_SIZE {
        return Err(EngineError::InvalidConfiguration(format!(
            "board size {} is below the minimum of {}",
            size, MIN_BOARD_SIZE
        )));
    }
    Ok(())
}

/// Checks a winning line length against a board edge.
pub(crate) fn validate_line_length(size: usize, line_length: usize) -> Result<()> {
    if line_length < MIN_LINE_LENGTH {
        return Err(EngineError::InvalidConfiguration(format!(
            "line length {} is below the minimum of {}",
            line_length, MIN_LINE_LENGTH
        )));
    }
    if line_length > size {
        return Err(EngineError::InvalidConfiguration(format!(
            "line length {} does not fit on a {}x{} board",
            line_length, size, size
        )));
    }
    Ok(())
}

/// Settings for a multi-round match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize)]
pub struct MatchConfig {
    /// Board used for every round.
    board: BoardConfig,
    /// Round wins needed to take the match.
    rounds_to_win: u32,
}

impl MatchConfig {
    /// Creates a match configuration.
    pub fn new(board: BoardConfig, rounds_to_win: u32) -> Result<Self> {
        if rounds_to_win == 0 {
            return Err(EngineError::InvalidConfiguration(
                "a match needs at least one round win".to_string(),
            ));
        }
        Ok(Self {
            board,
            rounds_to_win,
        })
    }

    /// Match with [`DEFAULT_ROUNDS_TO_WIN`].
    pub fn first_to_default(board: BoardConfig) -> Self {
        Self {
            board,
            rounds_to_win: DEFAULT_ROUNDS_TO_WIN,
        }
    }
}
