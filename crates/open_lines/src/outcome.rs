//! Win and tie detection.
//!
//! A round is won the moment one line is fully covered by a single mark.
//! It is tied as soon as no live line can be completed any more: either
//! every line holds two different marks, or the cells left on the board
//! run out before any player could fill one of the surviving lines,
//! given the turn order. This can happen well before the board is full.

use crate::error::{EngineError, Result};
use crate::lines::LineIndex;
use crate::tracker::{LiveLineTracker, MoveEffect};
use crate::turns::TurnOrder;
use crate::types::{CellIndex, Seat};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// State of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoundState {
    /// Moves are still accepted.
    #[default]
    InProgress,
    /// The player in this seat completed a line.
    Won(Seat),
    /// No line can be completed any more.
    Tied,
}

impl RoundState {
    /// Whether no further moves are accepted.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RoundState::InProgress)
    }

    /// The winning seat, if any.
    pub fn winner(&self) -> Option<Seat> {
        match self {
            RoundState::Won(seat) => Some(*seat),
            _ => None,
        }
    }
}

/// Whether a line missing `needed` marks can still be completed.
///
/// The player filling it first moves `distance` turns from now and then
/// every `players` turns; its last mark lands on turn
/// `distance + (needed - 1) * players`, which must come before the
/// `remaining` empty cells run out.
pub fn completable_within(needed: usize, distance: usize, players: usize, remaining: usize) -> bool {
    if needed == 0 {
        return true;
    }
    distance + (needed - 1) * players < remaining
}

/// True when no live line can be completed with the cells that are left.
///
/// An owned line must be finished by its owner, who moves
/// `distance_after(just_moved, owner)` turns from now. An empty line can
/// be started by whoever moves next.
#[instrument(skip(tracker, turns))]
pub fn no_line_completable(
    tracker: &LiveLineTracker,
    turns: &TurnOrder,
    just_moved: Seat,
    remaining: usize,
) -> bool {
    tracker.global_live().iter().all(|&id| {
        let distance = tracker
            .tally(id)
            .owner()
            .map_or(0, |owner| turns.distance_after(just_moved, owner));
        !completable_within(tracker.remaining(id), distance, turns.len(), remaining)
    })
}

/// Per-round state machine: `InProgress` → `Won` | `Tied`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WinDetector {
    state: RoundState,
}

impl WinDetector {
    /// Starts in [`RoundState::InProgress`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> RoundState {
        self.state
    }

    /// Records `seat`'s mark on `cell` in the tracker and re-evaluates the
    /// round. `remaining` is the number of empty cells after the move.
    ///
    /// # Errors
    ///
    /// [`EngineError::RoundAlreadyOver`] once the state is terminal.
    #[instrument(skip(self, tracker, lines, turns))]
    pub fn advance(
        &mut self,
        tracker: &mut LiveLineTracker,
        lines: &LineIndex,
        turns: &TurnOrder,
        cell: CellIndex,
        seat: Seat,
        remaining: usize,
    ) -> Result<MoveEffect> {
        if self.state.is_terminal() {
            return Err(EngineError::RoundAlreadyOver);
        }

        let effect = tracker.record_move(lines, cell, seat);

        let won = effect
            .advanced
            .iter()
            .any(|&id| tracker.remaining(id) == 0);
        if won {
            info!(%seat, %cell, "Line completed");
            self.state = RoundState::Won(seat);
        } else if no_line_completable(tracker, turns, seat, remaining) {
            info!(
                live = tracker.global_live().len(),
                remaining, "No line can be completed"
            );
            self.state = RoundState::Tied;
        } else {
            debug!(live = tracker.global_live().len(), "Round continues");
        }

        Ok(effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completable_within() {
        // Next player needs one mark and one cell is left.
        assert!(completable_within(1, 0, 2, 1));
        // Same line, but the owner moves one turn later.
        assert!(!completable_within(1, 1, 2, 1));
        // Two marks, two players: turns 0 and 2 are needed.
        assert!(completable_within(2, 0, 2, 3));
        assert!(!completable_within(2, 0, 2, 2));
        // Three players stretch the gap between own turns.
        assert!(!completable_within(2, 1, 3, 4));
        assert!(completable_within(2, 1, 3, 5));
    }

    #[test]
    fn test_completable_within_boundary() {
        // Last mark on turn d + (m - 1) * P; it must be an existing turn.
        for (needed, distance, players) in [(4, 0, 2), (3, 1, 2), (2, 2, 3), (1, 1, 4)] {
            let last_turn = distance + (needed - 1) * players;
            assert!(completable_within(needed, distance, players, last_turn + 1));
            assert!(!completable_within(needed, distance, players, last_turn));
        }
    }

    /// 4x4, K = 4: every line is dead except the top row, which seat 1
    /// owns with three cells still open.
    fn only_top_row_live() -> (LineIndex, LiveLineTracker) {
        let lines = LineIndex::build(4, 4).unwrap();
        let mut tracker = LiveLineTracker::reset(&lines, 2);
        let pattern = [(1, 1), (5, 0), (7, 1), (10, 0), (12, 1), (14, 1), (15, 0), (16, 0)];
        for (cell, seat) in pattern {
            tracker.record_move(&lines, CellIndex::new(cell), Seat::new(seat));
        }
        (lines, tracker)
    }

    #[test]
    fn test_owner_distance_decides_tie() {
        let (_lines, tracker) = only_top_row_live();
        assert_eq!(tracker.global_live().len(), 1);
        let turns = TurnOrder::registration(2);

        // Seat 0 just moved: the owner is next and needs turns 0, 2 and 4.
        assert!(!no_line_completable(&tracker, &turns, Seat::new(0), 5));
        assert!(no_line_completable(&tracker, &turns, Seat::new(0), 4));

        // Seat 1 just moved: its marks land on turns 1, 3 and 5.
        assert!(!no_line_completable(&tracker, &turns, Seat::new(1), 6));
        assert!(no_line_completable(&tracker, &turns, Seat::new(1), 5));
    }

    #[test]
    fn test_state_helpers() {
        assert!(!RoundState::InProgress.is_terminal());
        assert!(RoundState::Tied.is_terminal());
        assert_eq!(RoundState::Won(Seat::new(1)).winner(), Some(Seat::new(1)));
        assert_eq!(RoundState::Tied.winner(), None);
    }

    #[test]
    fn test_empty_live_set_is_a_tie() {
        let lines = LineIndex::build(4, 4).unwrap();
        let mut tracker = LiveLineTracker::reset(&lines, 2);
        let turns = TurnOrder::registration(2);
        // Every line gets marks from both seats.
        let pattern = [(1, 0), (4, 1), (7, 0), (6, 1), (10, 0), (11, 1), (16, 0), (13, 1)];
        for (cell, seat) in pattern {
            tracker.record_move(&lines, CellIndex::new(cell), Seat::new(seat));
        }
        assert!(tracker.global_live().is_empty());
        assert!(no_line_completable(&tracker, &turns, Seat::new(1), 8));
    }

    #[test]
    fn test_rejects_moves_after_terminal() {
        let lines = LineIndex::build(4, 4).unwrap();
        let mut tracker = LiveLineTracker::reset(&lines, 2);
        let turns = TurnOrder::registration(2);
        let mut detector = WinDetector::new();
        for cell in 1..=3 {
            detector
                .advance(&mut tracker, &lines, &turns, CellIndex::new(cell), Seat::new(0), 16 - cell)
                .unwrap();
        }
        assert_eq!(detector.state(), RoundState::InProgress);
        detector
            .advance(&mut tracker, &lines, &turns, CellIndex::new(4), Seat::new(0), 12)
            .unwrap();
        assert_eq!(detector.state(), RoundState::Won(Seat::new(0)));
        assert_eq!(
            detector.advance(&mut tracker, &lines, &turns, CellIndex::new(5), Seat::new(1), 11),
            Err(EngineError::RoundAlreadyOver)
        );
    }
}
