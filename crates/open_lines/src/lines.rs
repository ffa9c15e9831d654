//! Every winning line of a board, and the lines through each cell.
//!
//! A line is a run of exactly `line_length` consecutive cells along a
//! row, a column, or either diagonal direction. Longer rows and
//! diagonals are cut into every overlapping window of that length, so a
//! 5-cell row with lines of 4 contributes two lines.

use crate::config::{validate_line_length, validate_size};
use crate::error::Result;
use crate::types::{CellIndex, LineId};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Orientation of a line.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Direction {
    /// Left to right along a row.
    Horizontal,
    /// Top to bottom along a column.
    Vertical,
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl Direction {
    /// Row and column step between consecutive cells.
    fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }
}

/// One immutable winning line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    id: LineId,
    direction: Direction,
    cells: Vec<CellIndex>,
}

impl Line {
    /// Identifier within the owning index.
    pub fn id(&self) -> LineId {
        self.id
    }

    /// Orientation.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Cells in walking order.
    pub fn cells(&self) -> &[CellIndex] {
        &self.cells
    }

    /// Whether the line passes through `cell`.
    pub fn contains(&self, cell: CellIndex) -> bool {
        self.cells.contains(&cell)
    }
}

/// All lines of one board configuration plus a cell → lines lookup.
///
/// Built once per round and read-only afterwards.
#[derive(Debug, Clone)]
pub struct LineIndex {
    size: usize,
    line_length: usize,
    lines: Vec<Line>,
    by_cell: Vec<Vec<LineId>>,
}

impl LineIndex {
    /// Generates every line of `line_length` cells on a `size`×`size` board.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidConfiguration`](crate::EngineError::InvalidConfiguration)
    /// if the board is smaller than 3, or `line_length` is below 4 or
    /// longer than `size`.
    #[instrument]
    pub fn build(size: usize, line_length: usize) -> Result<Self> {
        validate_size(size)?;
        validate_line_length(size, line_length)?;

        let mut lines = Vec::new();
        let mut by_cell = vec![Vec::new(); size * size];

        for direction in Direction::iter() {
            let (dr, dc) = direction.step();
            for row in 0..size {
                for column in 0..size {
                    let Some(cells) = walk(size, line_length, row, column, dr, dc) else {
                        continue;
                    };
                    let id = LineId(lines.len());
                    for cell in &cells {
                        by_cell[cell.offset()].push(id);
                    }
                    lines.push(Line {
                        id,
                        direction,
                        cells,
                    });
                }
            }
        }

        debug!(lines = lines.len(), "Line index built");
        Ok(Self {
            size,
            line_length,
            lines,
            by_cell,
        })
    }

    /// Board edge this index was built for.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cells per line.
    pub fn line_length(&self) -> usize {
        self.line_length
    }

    /// Total number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// An index always holds at least the full rows.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All lines in id order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// The line with this id.
    ///
    /// # Panics
    ///
    /// If `id` came from a different index.
    pub fn line(&self, id: LineId) -> &Line {
        &self.lines[id.0]
    }

    /// Ids of every line passing through `cell`; empty for cells off the board.
    pub fn lines_through(&self, cell: CellIndex) -> &[LineId] {
        if cell.get() == 0 {
            return &[];
        }
        self.by_cell
            .get(cell.offset())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of lines running in `direction`.
    pub fn count_in(&self, direction: Direction) -> usize {
        self.lines
            .iter()
            .filter(|line| line.direction == direction)
            .count()
    }

    /// Number of full rows, columns or diagonals in `direction` long enough
    /// to hold a line.
    ///
    /// Rows and columns give `size`; each diagonal direction gives
    /// `2 * (size - line_length + 1) - 1`.
    pub fn tracks_in(&self, direction: Direction) -> usize {
        let slack = self.size - self.line_length + 1;
        match direction {
            Direction::Horizontal | Direction::Vertical => self.size,
            Direction::Diagonal | Direction::AntiDiagonal => 2 * slack - 1,
        }
    }
}

/// Cells of the line starting at `row`, `column`, or `None` if it would
/// leave the board.
fn walk(
    size: usize,
    length: usize,
    row: usize,
    column: usize,
    dr: isize,
    dc: isize,
) -> Option<Vec<CellIndex>> {
    let reach = length as isize - 1;
    let last_row = row as isize + dr * reach;
    let last_column = column as isize + dc * reach;
    let bound = 0..size as isize;
    if !bound.contains(&last_row) || !bound.contains(&last_column) {
        return None;
    }

    Some(
        (0..length as isize)
            .map(|step| {
                let r = (row as isize + dr * step) as usize;
                let c = (column as isize + dc * step) as usize;
                CellIndex::at(size, r, c)
            })
            .collect(),
    )
}
