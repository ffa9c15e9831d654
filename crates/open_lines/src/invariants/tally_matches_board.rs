//! Line tallies agree with what is actually on the board.

use super::Invariant;
use crate::board::Square;
use crate::round::Round;

/// Invariant: a live line's tally has the same owner and count as the
/// marks on its cells, and a dead line really holds two distinct marks.
pub struct TalliesMatchBoard;

impl Invariant<Round> for TalliesMatchBoard {
    fn holds(round: &Round) -> bool {
        let tracker = round.tracker();
        round.lines().lines().iter().all(|line| {
            let mut owners = line
                .cells()
                .iter()
                .filter_map(|cell| match round.board().get(*cell) {
                    Some(Square::Occupied(seat)) => Some(seat),
                    _ => None,
                })
                .collect::<Vec<_>>();
            let filled = owners.len();
            owners.sort();
            owners.dedup();

            if tracker.is_live(line.id()) {
                let tally = tracker.tally(line.id());
                owners.len() <= 1
                    && tally.filled() == filled
                    && tally.owner() == owners.first().copied()
            } else {
                owners.len() >= 2
            }
        })
    }

    fn description() -> &'static str {
        "Line tallies match the marks on the board"
    }
}
