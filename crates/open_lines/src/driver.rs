//! Sources of moves and the loop that plays a round to the end.

use crate::error::{EngineError, Result};
use crate::outcome::RoundState;
use crate::round::Round;
use crate::selector::{MoveSelector, TieBreak};
use crate::types::{CellIndex, Seat};
use std::collections::VecDeque;
use tracing::{debug, info, instrument, warn};

/// Something that picks the next cell for a seat.
///
/// The call blocks until a cell is available; the round does not advance
/// meanwhile.
pub trait MoveSource {
    /// Cell that `seat` wants to mark in `round`.
    fn next_move(&mut self, round: &Round, seat: Seat) -> Result<CellIndex>;
}

impl<T: TieBreak> MoveSource for MoveSelector<T> {
    fn next_move(&mut self, round: &Round, seat: Seat) -> Result<CellIndex> {
        self.choose(round, seat)
    }
}

/// Pre-recorded cells, handed out in order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedMoves {
    moves: VecDeque<CellIndex>,
}

impl ScriptedMoves {
    /// Replays `moves` in order.
    pub fn new(moves: impl IntoIterator<Item = CellIndex>) -> Self {
        Self {
            moves: moves.into_iter().collect(),
        }
    }

    /// Cells not yet handed out.
    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

impl MoveSource for ScriptedMoves {
    fn next_move(&mut self, _round: &Round, _seat: Seat) -> Result<CellIndex> {
        self.moves.pop_front().ok_or(EngineError::MovesExhausted)
    }
}

/// Plays `round` until it is won or tied.
///
/// `sources` is indexed by seat. An illegal cell from a source aborts the
/// loop with the board error; the round itself stays consistent and can
/// be resumed.
///
/// # Errors
///
/// Whatever a source or [`Round::apply_move`] returns, and
/// [`EngineError::InvalidConfiguration`] if there is no source for a seat.
#[instrument(skip(round, sources), fields(sources = sources.len()))]
pub fn play_round(round: &mut Round, sources: &mut [&mut dyn MoveSource]) -> Result<RoundState> {
    if sources.len() != round.roster().len() {
        return Err(EngineError::InvalidConfiguration(format!(
            "{} move sources for {} players",
            sources.len(),
            round.roster().len()
        )));
    }

    while !round.is_over() {
        let seat = round.current_seat();
        let cell = sources[seat.index()].next_move(round, seat)?;
        match round.apply_move(cell) {
            Ok(report) => debug!(%seat, %cell, state = ?report.state, "Move applied"),
            Err(err) => {
                warn!(%seat, %cell, %err, "Move rejected");
                return Err(err);
            }
        }
    }

    let state = round.state();
    info!(?state, moves = round.history().len(), "Round finished");
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, new_round};

    #[test]
    fn test_scripted_moves_exhaust() {
        let mut round = new_round(
            4,
            4,
            vec![
                Player::human("Alice", "X").unwrap(),
                Player::human("Bruno", "O").unwrap(),
            ],
            &["Alice", "Bruno"],
        )
        .unwrap();
        let mut alice = ScriptedMoves::new([1, 2].map(CellIndex::new));
        let mut bruno = ScriptedMoves::new([5].map(CellIndex::new));
        let result = play_round(&mut round, &mut [&mut alice, &mut bruno]);
        assert_eq!(result, Err(EngineError::MovesExhausted));
        assert_eq!(round.history().len(), 3);
        assert_eq!(round.state(), RoundState::InProgress);
    }

    #[test]
    fn test_source_count_must_match() {
        let mut round = new_round(
            4,
            4,
            vec![
                Player::human("Alice", "X").unwrap(),
                Player::human("Bruno", "O").unwrap(),
            ],
            &["Alice", "Bruno"],
        )
        .unwrap();
        let mut only = ScriptedMoves::default();
        assert!(matches!(
            play_round(&mut round, &mut [&mut only]),
            Err(EngineError::InvalidConfiguration(_))
        ));
    }
}
