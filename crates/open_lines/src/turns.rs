//! Cyclic turn order.

use crate::error::{EngineError, Result};
use crate::types::Seat;
use serde::Serialize;
use tracing::instrument;

/// The fixed cyclic sequence in which seats act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnOrder {
    order: Vec<Seat>,
    cursor: usize,
}

impl TurnOrder {
    /// Creates a turn order over `seats` players.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidConfiguration`] unless `order` names every
    /// seat in `0..seats` exactly once.
    #[instrument]
    pub fn new(order: Vec<Seat>, seats: usize) -> Result<Self> {
        let mut seen = vec![false; seats];
        for seat in &order {
            match seen.get_mut(seat.0) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(EngineError::InvalidConfiguration(format!(
                        "{} appears twice in the turn order",
                        seat
                    )));
                }
                None => {
                    return Err(EngineError::InvalidConfiguration(format!(
                        "{} is not registered",
                        seat
                    )));
                }
            }
        }
        if order.len() != seats {
            return Err(EngineError::InvalidConfiguration(
                "every player must appear in the turn order".to_string(),
            ));
        }
        Ok(Self { order, cursor: 0 })
    }

    /// Seats in registration order.
    pub fn registration(seats: usize) -> Self {
        Self {
            order: (0..seats).map(Seat).collect(),
            cursor: 0,
        }
    }

    /// Number of players taking turns.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// A turn order always has players.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Seats in playing order, starting with the opener.
    pub fn seats(&self) -> &[Seat] {
        &self.order
    }

    /// Seat whose turn it is.
    pub fn current(&self) -> Seat {
        self.order[self.cursor]
    }

    /// Passes the turn to the next seat.
    pub fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % self.order.len();
    }

    /// Restarts the cycle from the opener.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    fn position(&self, seat: Seat) -> usize {
        self.order
            .iter()
            .position(|s| *s == seat)
            .unwrap_or_default()
    }

    /// Turns that pass before `seat` moves, counted from the move after
    /// `just_moved`. The next seat is 0 away; `just_moved` itself is
    /// `len - 1` away.
    pub fn distance_after(&self, just_moved: Seat, seat: Seat) -> usize {
        let n = self.order.len();
        let from = (self.position(just_moved) + 1) % n;
        (self.position(seat) + n - from) % n
    }

    /// `actor` followed by everyone else in the order they play after it.
    pub fn priority_order(&self, actor: Seat) -> Vec<Seat> {
        let n = self.order.len();
        let start = self.position(actor);
        (0..n).map(|step| self.order[(start + step) % n]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats(raw: &[usize]) -> Vec<Seat> {
        raw.iter().copied().map(Seat::new).collect()
    }

    #[test]
    fn test_rejects_duplicates_and_gaps() {
        assert!(TurnOrder::new(seats(&[0, 0]), 2).is_err());
        assert!(TurnOrder::new(seats(&[0]), 2).is_err());
        assert!(TurnOrder::new(seats(&[0, 2]), 2).is_err());
        assert!(TurnOrder::new(seats(&[1, 0]), 2).is_ok());
    }

    #[test]
    fn test_cycles() {
        let mut turns = TurnOrder::new(seats(&[2, 0, 1]), 3).unwrap();
        assert_eq!(turns.current(), Seat::new(2));
        turns.advance();
        assert_eq!(turns.current(), Seat::new(0));
        turns.advance();
        turns.advance();
        assert_eq!(turns.current(), Seat::new(2));
    }

    #[test]
    fn test_distance_after() {
        let turns = TurnOrder::new(seats(&[0, 1, 2]), 3).unwrap();
        assert_eq!(turns.distance_after(Seat::new(0), Seat::new(1)), 0);
        assert_eq!(turns.distance_after(Seat::new(0), Seat::new(2)), 1);
        assert_eq!(turns.distance_after(Seat::new(0), Seat::new(0)), 2);
        assert_eq!(turns.distance_after(Seat::new(2), Seat::new(0)), 0);
    }

    #[test]
    fn test_priority_order() {
        let turns = TurnOrder::new(seats(&[0, 1, 2, 3]), 4).unwrap();
        assert_eq!(turns.priority_order(Seat::new(2)), seats(&[2, 3, 0, 1]));
    }
}
