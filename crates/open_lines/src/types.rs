//! Stable identifiers used across the engine.

use serde::{Deserialize, Serialize};

/// A 1-based cell number in row-major order.
///
/// On a board of size `n`, cell `i` sits at row `(i - 1) / n` and
/// column `(i - 1) % n`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct CellIndex(usize);

impl CellIndex {
    /// Wraps a raw 1-based cell number. Range checks happen on the board.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Builds the index of the cell at `row`, `column` (both 0-based).
    pub const fn at(size: usize, row: usize, column: usize) -> Self {
        Self(row * size + column + 1)
    }

    /// Returns the raw 1-based number.
    pub const fn get(self) -> usize {
        self.0
    }

    /// Returns the 0-based offset into row-major storage.
    ///
    /// # Panics
    ///
    /// For cell 0, which no board has. Callers check the range first.
    pub(crate) const fn offset(self) -> usize {
        assert!(self.0 > 0, "cell 0 is not on any board");
        self.0 - 1
    }

    /// Returns `(row, column)` on a board of the given size.
    ///
    /// # Panics
    ///
    /// For cell 0 or a `size` of 0.
    pub const fn row_col(self, size: usize) -> (usize, usize) {
        let offset = self.offset();
        (offset / size, offset % size)
    }
}

impl From<usize> for CellIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// Identifier of a generated line, stable for the lifetime of its index.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("L{}", _0)]
#[serde(transparent)]
pub struct LineId(pub(crate) usize);

impl LineId {
    /// Returns the position of the line in its index.
    pub const fn get(self) -> usize {
        self.0
    }
}

/// A player's registration slot in the roster.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("seat {}", _0)]
#[serde(transparent)]
pub struct Seat(pub(crate) usize);

impl Seat {
    /// Wraps a raw roster position.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the roster position.
    pub const fn index(self) -> usize {
        self.0
    }
}
