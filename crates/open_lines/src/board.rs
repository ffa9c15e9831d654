//! Square grid of cells.

use crate::config::validate_size;
use crate::error::{EngineError, Result};
use crate::types::{CellIndex, Seat};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Nobody has claimed the cell.
    #[default]
    Empty,
    /// Claimed by the player in this seat.
    Occupied(Seat),
}

/// N×N board addressed by 1-based row-major [`CellIndex`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    squares: Vec<Square>,
    empty: usize,
}

impl Board {
    /// Creates an empty board.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidConfiguration`] if `size` is below 3.
    #[instrument]
    pub fn new(size: usize) -> Result<Self> {
        validate_size(size)?;
        Ok(Self {
            size,
            squares: vec![Square::Empty; size * size],
            empty: size * size,
        })
    }

    /// Cells per row.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.squares.len()
    }

    /// Number of cells still empty.
    pub fn empty_count(&self) -> usize {
        self.empty
    }

    /// Number of cells holding a mark.
    pub fn marked_count(&self) -> usize {
        self.squares.len() - self.empty
    }

    /// Checks that a cell exists on this board.
    pub fn check(&self, cell: CellIndex) -> Result<()> {
        if cell.get() == 0 || cell.get() > self.squares.len() {
            return Err(EngineError::OutOfRange {
                index: cell.get(),
                cells: self.squares.len(),
            });
        }
        Ok(())
    }

    /// Returns the square at `cell`, or `None` when out of range.
    pub fn get(&self, cell: CellIndex) -> Option<Square> {
        self.check(cell).ok().map(|()| self.squares[cell.offset()])
    }

    /// Whether `cell` exists and is empty.
    pub fn is_empty(&self, cell: CellIndex) -> bool {
        matches!(self.get(cell), Some(Square::Empty))
    }

    /// Claims an empty cell for `seat`.
    ///
    /// Once marked, a cell stays marked for the rest of the round.
    ///
    /// # Errors
    ///
    /// [`EngineError::OutOfRange`] for a cell not on the board,
    /// [`EngineError::OccupiedCell`] if it already holds a mark.
    #[instrument(skip(self), fields(size = self.size))]
    pub fn mark(&mut self, cell: CellIndex, seat: Seat) -> Result<()> {
        self.check(cell)?;
        let square = &mut self.squares[cell.offset()];
        if *square != Square::Empty {
            warn!(%cell, "Cell already occupied");
            return Err(EngineError::OccupiedCell(cell));
        }
        *square = Square::Occupied(seat);
        self.empty -= 1;
        Ok(())
    }

    /// True iff no empty cells remain.
    pub fn is_full(&self) -> bool {
        self.empty == 0
    }

    /// Empty cells in ascending order.
    pub fn empty_cells(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.cells()
            .filter(|(_, square)| *square == Square::Empty)
            .map(|(cell, _)| cell)
    }

    /// Every cell with its contents, in ascending order.
    pub fn cells(&self) -> impl Iterator<Item = (CellIndex, Square)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .map(|(offset, square)| (CellIndex::new(offset + 1), *square))
    }

    /// The cells of the middle of the board: one cell on odd boards, the
    /// central 2×2 block on even boards.
    pub fn center_cells(&self) -> Vec<CellIndex> {
        let half = self.size / 2;
        if self.size % 2 == 1 {
            vec![CellIndex::at(self.size, half, half)]
        } else {
            vec![
                CellIndex::at(self.size, half - 1, half - 1),
                CellIndex::at(self.size, half - 1, half),
                CellIndex::at(self.size, half, half - 1),
                CellIndex::at(self.size, half, half),
            ]
        }
    }
}
