//! Incremental bookkeeping of which lines can still be won, and by whom.
//!
//! A line stays *live* while it holds marks from at most one player. The
//! tracker keeps the global live set plus, per seat, the live lines that
//! seat could still complete (empty lines or lines holding only its own
//! marks). Sets only ever shrink during a round.

use crate::lines::LineIndex;
use crate::types::{CellIndex, LineId, Seat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// Accumulated marks on one line.
///
/// Only meaningful while the line is live: a live line has at most one
/// owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineTally {
    owner: Option<Seat>,
    filled: usize,
}

impl LineTally {
    /// The only seat with marks on the line, if any.
    pub fn owner(&self) -> Option<Seat> {
        self.owner
    }

    /// Number of marked cells on the line.
    pub fn filled(&self) -> usize {
        self.filled
    }
}

/// What a single move did to the lines through its cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEffect {
    /// Lines that gained the mark and remain live.
    pub advanced: Vec<LineId>,
    /// Lines that received a second distinct mark and died.
    pub eliminated: Vec<LineId>,
}

impl MoveEffect {
    /// Every live line the move touched, advanced first.
    pub fn affected(&self) -> Vec<LineId> {
        self.advanced
            .iter()
            .chain(&self.eliminated)
            .copied()
            .collect()
    }
}

/// Global and per-seat live line sets for one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveLineTracker {
    line_length: usize,
    global_live: BTreeSet<LineId>,
    player_live: Vec<BTreeSet<LineId>>,
    tallies: Vec<LineTally>,
}

impl LiveLineTracker {
    /// Starts a round: every line is live for everybody.
    #[instrument(skip(lines), fields(lines = lines.len()))]
    pub fn reset(lines: &LineIndex, seats: usize) -> Self {
        let all: BTreeSet<LineId> = lines.lines().iter().map(|line| line.id()).collect();
        Self {
            line_length: lines.line_length(),
            player_live: vec![all.clone(); seats],
            global_live: all,
            tallies: vec![LineTally::default(); lines.len()],
        }
    }

    /// Applies `seat`'s mark on `cell`.
    ///
    /// Each live line through the cell either advances (it held no other
    /// player's mark) or is eliminated everywhere. A line first claimed by
    /// `seat` leaves every other seat's live set, since they can no longer
    /// complete it.
    #[instrument(skip(self, lines))]
    pub fn record_move(&mut self, lines: &LineIndex, cell: CellIndex, seat: Seat) -> MoveEffect {
        let mut effect = MoveEffect::default();

        for &id in lines.lines_through(cell) {
            if !self.global_live.contains(&id) {
                continue;
            }
            let tally = &mut self.tallies[id.0];
            match tally.owner {
                Some(owner) if owner != seat => {
                    self.global_live.remove(&id);
                    for live in &mut self.player_live {
                        live.remove(&id);
                    }
                    effect.eliminated.push(id);
                }
                Some(_) => {
                    tally.filled += 1;
                    effect.advanced.push(id);
                }
                None => {
                    tally.owner = Some(seat);
                    tally.filled += 1;
                    for (other, live) in self.player_live.iter_mut().enumerate() {
                        if other != seat.0 {
                            live.remove(&id);
                        }
                    }
                    effect.advanced.push(id);
                }
            }
        }

        debug!(
            advanced = effect.advanced.len(),
            eliminated = effect.eliminated.len(),
            live = self.global_live.len(),
            "Lines updated"
        );
        effect
    }

    /// Cells per line.
    pub fn line_length(&self) -> usize {
        self.line_length
    }

    /// Lines still winnable by someone.
    pub fn global_live(&self) -> &BTreeSet<LineId> {
        &self.global_live
    }

    /// Lines `seat` could still complete.
    ///
    /// # Panics
    ///
    /// If `seat` is outside the roster the tracker was reset for.
    pub fn player_live(&self, seat: Seat) -> &BTreeSet<LineId> {
        &self.player_live[seat.0]
    }

    /// Number of seats tracked.
    pub fn seats(&self) -> usize {
        self.player_live.len()
    }

    /// Whether the line has not been eliminated.
    pub fn is_live(&self, id: LineId) -> bool {
        self.global_live.contains(&id)
    }

    /// Marks accumulated on a line.
    pub fn tally(&self, id: LineId) -> LineTally {
        self.tallies[id.0]
    }

    /// Marks still missing from a line.
    pub fn remaining(&self, id: LineId) -> usize {
        self.line_length - self.tallies[id.0].filled
    }

    /// Live lines holding at least one of `seat`'s marks.
    pub fn claimed_by(&self, seat: Seat) -> impl Iterator<Item = LineId> + '_ {
        self.player_live[seat.0]
            .iter()
            .copied()
            .filter(move |id| self.tallies[id.0].owner == Some(seat))
    }

    /// Lines completely covered by `seat`'s mark.
    pub fn lines_completed_by(&self, seat: Seat) -> Vec<LineId> {
        self.claimed_by(seat)
            .filter(|id| self.remaining(*id) == 0)
            .collect()
    }

    /// Number of live lines passing through `cell`.
    pub fn live_coverage(&self, lines: &LineIndex, cell: CellIndex) -> usize {
        lines
            .lines_through(cell)
            .iter()
            .filter(|id| self.global_live.contains(*id))
            .count()
    }

    /// Number of `seat`'s live lines passing through `cell`.
    pub fn player_coverage(&self, lines: &LineIndex, cell: CellIndex, seat: Seat) -> usize {
        let live = &self.player_live[seat.0];
        lines
            .lines_through(cell)
            .iter()
            .filter(|id| live.contains(*id))
            .count()
    }
}
