//! Monotonic board: replaying the history reproduces the board.

use super::Invariant;
use crate::board::Board;
use crate::round::Round;

/// Invariant: every mark on the board comes from exactly one recorded
/// move, and no move overwrote another.
pub struct BoardMatchesHistory;

impl Invariant<Round> for BoardMatchesHistory {
    fn holds(round: &Round) -> bool {
        let Ok(mut replayed) = Board::new(round.board().size()) else {
            return false;
        };

        for record in round.history() {
            if replayed.mark(record.cell, record.seat).is_err() {
                return false;
            }
        }

        replayed == *round.board()
    }

    fn description() -> &'static str {
        "Board matches the replayed move history"
    }
}
