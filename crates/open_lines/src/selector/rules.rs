//! The heuristic rules, strongest first.
//!
//! Each rule looks at an in-progress round from one seat's point of view
//! and either proposes a non-empty set of cells or abstains.

use super::Heuristic;
use crate::board::Square;
use crate::lines::Direction;
use crate::round::Round;
use crate::types::{CellIndex, LineId, Seat};
use std::collections::BTreeSet;
use tracing::instrument;

/// Turns an empty set into "no opinion".
fn opinion(cells: BTreeSet<CellIndex>) -> Option<BTreeSet<CellIndex>> {
    if cells.is_empty() { None } else { Some(cells) }
}

/// Keeps the cells with the highest `score`.
pub(crate) fn keep_best<I, K, F>(cells: I, mut score: F) -> BTreeSet<CellIndex>
where
    I: IntoIterator<Item = CellIndex>,
    K: Ord,
    F: FnMut(CellIndex) -> K,
{
    let mut best: Option<K> = None;
    let mut kept = BTreeSet::new();
    for cell in cells {
        let key = score(cell);
        match &best {
            Some(current) if key < *current => {}
            Some(current) if key == *current => {
                kept.insert(cell);
            }
            _ => {
                best = Some(key);
                kept.clear();
                kept.insert(cell);
            }
        }
    }
    kept
}

/// Lines of `seat` that miss exactly `needed` marks.
fn lines_needing(round: &Round, seat: Seat, needed: usize) -> Vec<LineId> {
    let tracker = round.tracker();
    tracker
        .claimed_by(seat)
        .filter(|id| tracker.remaining(*id) == needed)
        .collect()
}

/// Union of the empty cells of `lines`.
fn open_cells_of(round: &Round, lines: &[LineId]) -> BTreeSet<CellIndex> {
    lines
        .iter()
        .flat_map(|id| round.open_cells(*id))
        .collect()
}

/// Marks on the full diagonal through `cell` running in `direction`.
fn marks_on_track(round: &Round, cell: CellIndex, direction: Direction) -> usize {
    let size = round.board().size() as isize;
    let (row, column) = cell.row_col(round.board().size());
    let (row, column) = (row as isize, column as isize);
    let dc = match direction {
        Direction::AntiDiagonal => -1,
        _ => 1,
    };
    (-size..size)
        .map(|t| (row + t, column + dc * t))
        .filter(|(r, c)| (0..size).contains(r) && (0..size).contains(c))
        .filter(|(r, c)| {
            let on = CellIndex::at(round.board().size(), *r as usize, *c as usize);
            matches!(round.board().get(on), Some(Square::Occupied(_)))
        })
        .count()
}

/// Live diagonal lines through `cell`.
fn live_diagonals(round: &Round, cell: CellIndex) -> usize {
    let lines = round.lines();
    lines
        .lines_through(cell)
        .iter()
        .filter(|id| round.tracker().is_live(**id))
        .filter(|id| {
            matches!(
                lines.line(**id).direction(),
                Direction::Diagonal | Direction::AntiDiagonal
            )
        })
        .count()
}

/// Take the middle of the board while players are still placing their
/// first marks.
///
/// On odd boards this is the single center cell. On even boards it is the
/// central cell lying on the diagonal that already carries the most marks,
/// then the one crossed by the most live diagonal lines.
pub struct OpeningMove;

impl Heuristic for OpeningMove {
    #[instrument(skip(round))]
    fn candidates(round: &Round, _actor: Seat) -> Option<BTreeSet<CellIndex>> {
        let board = round.board();
        if board.marked_count() >= round.turn_order().len() {
            return None;
        }

        let open: Vec<CellIndex> = board
            .center_cells()
            .into_iter()
            .filter(|cell| board.is_empty(*cell))
            .collect();

        if board.size() % 2 == 1 {
            return opinion(open.into_iter().collect());
        }

        opinion(keep_best(open, |cell| {
            let busiest = marks_on_track(round, cell, Direction::Diagonal)
                .max(marks_on_track(round, cell, Direction::AntiDiagonal));
            (busiest, live_diagonals(round, cell))
        }))
    }

    fn name() -> &'static str {
        "opening"
    }
}

/// Win now if possible; otherwise block the nearest opponent (in turn
/// order) who could win on their next turn.
///
/// Among blocking cells, prefer those that stop the most threats at once,
/// counting every opponent's threats.
pub struct ImminentLine;

impl Heuristic for ImminentLine {
    #[instrument(skip(round))]
    fn candidates(round: &Round, actor: Seat) -> Option<BTreeSet<CellIndex>> {
        let winning = open_cells_of(round, &lines_needing(round, actor, 1));
        if !winning.is_empty() {
            return Some(winning);
        }

        let opponents: Vec<Seat> = round
            .turn_order()
            .priority_order(actor)
            .into_iter()
            .skip(1)
            .collect();

        let threats: Vec<Vec<LineId>> = opponents
            .iter()
            .map(|seat| lines_needing(round, *seat, 1))
            .collect();
        let blocked_by = |cell: CellIndex| {
            threats
                .iter()
                .flatten()
                .filter(|id| round.lines().line(**id).contains(cell))
                .count()
        };

        threats
            .iter()
            .find(|lines| !lines.is_empty())
            .and_then(|lines| opinion(keep_best(open_cells_of(round, lines), blocked_by)))
    }

    fn name() -> &'static str {
        "imminent line"
    }
}

/// Add to the actor's own most advanced live line, preferring the cell
/// that also serves the most of the actor's other live lines.
pub struct ExtendOwnLine;

impl Heuristic for ExtendOwnLine {
    #[instrument(skip(round))]
    fn candidates(round: &Round, actor: Seat) -> Option<BTreeSet<CellIndex>> {
        let tracker = round.tracker();
        let longest = tracker
            .claimed_by(actor)
            .map(|id| tracker.tally(id).filled())
            .max()?;
        let lines: Vec<LineId> = tracker
            .claimed_by(actor)
            .filter(|id| tracker.tally(*id).filled() == longest)
            .collect();

        opinion(keep_best(open_cells_of(round, &lines), |cell| {
            tracker.player_coverage(round.lines(), cell, actor)
        }))
    }

    fn name() -> &'static str {
        "extend own line"
    }
}

/// Any empty cell touching the most live lines.
pub struct MostCoverage;

impl Heuristic for MostCoverage {
    #[instrument(skip(round))]
    fn candidates(round: &Round, _actor: Seat) -> Option<BTreeSet<CellIndex>> {
        opinion(keep_best(round.board().empty_cells(), |cell| {
            round.tracker().live_coverage(round.lines(), cell)
        }))
    }

    fn name() -> &'static str {
        "most coverage"
    }
}
