//! A single round: board, line bookkeeping, turn order and outcome.

use crate::board::{Board, Square};
use crate::config::BoardConfig;
use crate::error::{EngineError, Result};
#[cfg(debug_assertions)]
use crate::invariants::{InvariantSet, RoundInvariants};
use crate::lines::LineIndex;
use crate::outcome::{RoundState, WinDetector};
use crate::player::{Player, Roster};
use crate::tracker::LiveLineTracker;
use crate::turns::TurnOrder;
use crate::types::{CellIndex, LineId, Seat};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{info, instrument, warn};

/// A mark placed during the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct MoveRecord {
    /// Who moved.
    pub seat: Seat,
    /// Where.
    pub cell: CellIndex,
}

/// Result of applying one move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    /// Seat that moved.
    pub seat: Seat,
    /// Cell that was marked.
    pub cell: CellIndex,
    /// Round state after the move.
    pub state: RoundState,
    /// Live lines through the cell before the move.
    pub affected_lines: Vec<LineId>,
    /// The subset of `affected_lines` the move eliminated.
    pub eliminated_lines: Vec<LineId>,
}

/// Identifies a round handed out by a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RoundTicket {
    pub(crate) match_id: u64,
    pub(crate) serial: u32,
}

/// One round of play.
///
/// Owns its board, line index and tracker exclusively; a new round
/// starts from scratch.
#[derive(Debug, Clone)]
pub struct Round {
    config: BoardConfig,
    roster: Roster,
    board: Board,
    lines: LineIndex,
    tracker: LiveLineTracker,
    detector: WinDetector,
    turns: TurnOrder,
    history: Vec<MoveRecord>,
    ticket: Option<RoundTicket>,
}

/// Creates a round from raw settings, naming the turn order by player name.
///
/// # Errors
///
/// [`EngineError::InvalidConfiguration`] for unsupported dimensions, an
/// invalid roster or a turn order that is not a permutation of the
/// players; [`EngineError::UnknownPlayer`] for a name not in `players`.
#[instrument(skip(players), fields(players = players.len()))]
pub fn new_round(
    size: usize,
    line_length: usize,
    players: Vec<Player>,
    turn_order: &[&str],
) -> Result<Round> {
    let config = BoardConfig::new(size, line_length)?;
    let roster = Roster::new(players, &config)?;
    let order = turn_order
        .iter()
        .map(|name| roster.seat_of(name))
        .collect::<Result<Vec<_>>>()?;
    let turns = TurnOrder::new(order, roster.len())?;
    Round::new(config, roster, turns)
}

impl Round {
    /// Creates a fresh round.
    #[instrument(skip(roster, turns), fields(players = roster.len()))]
    pub fn new(config: BoardConfig, roster: Roster, mut turns: TurnOrder) -> Result<Self> {
        if turns.len() != roster.len() {
            return Err(EngineError::InvalidConfiguration(format!(
                "turn order has {} seats but {} players are registered",
                turns.len(),
                roster.len()
            )));
        }
        turns.rewind();

        let lines = LineIndex::build(*config.size(), *config.line_length())?;
        let tracker = LiveLineTracker::reset(&lines, roster.len());
        let board = Board::new(*config.size())?;

        info!(
            size = config.size(),
            line_length = config.line_length(),
            lines = lines.len(),
            "Round started"
        );

        Ok(Self {
            config,
            roster,
            board,
            lines,
            tracker,
            detector: WinDetector::new(),
            turns,
            history: Vec::new(),
            ticket: None,
        })
    }

    pub(crate) fn with_ticket(mut self, ticket: RoundTicket) -> Self {
        self.ticket = Some(ticket);
        self
    }

    pub(crate) fn ticket(&self) -> Option<RoundTicket> {
        self.ticket
    }

    /// Marks `cell` for the player whose turn it is.
    ///
    /// # Errors
    ///
    /// - [`EngineError::RoundAlreadyOver`] once the round is won or tied
    /// - [`EngineError::OutOfRange`] / [`EngineError::OccupiedCell`] for an
    ///   illegal cell; the round is left untouched and the same player
    ///   must try again
    /// - [`EngineError::InvariantViolation`] (debug builds) if the
    ///   bookkeeping drifted out of sync with the board
    #[instrument(skip(self), fields(seat = %self.turns.current()))]
    pub fn apply_move(&mut self, cell: CellIndex) -> Result<MoveReport> {
        if self.is_over() {
            warn!(%cell, "Move attempted on a finished round");
            return Err(EngineError::RoundAlreadyOver);
        }

        let seat = self.turns.current();
        self.board.mark(cell, seat)?;
        self.history.push(MoveRecord::new(seat, cell));

        let effect = self.detector.advance(
            &mut self.tracker,
            &self.lines,
            &self.turns,
            cell,
            seat,
            self.board.empty_count(),
        )?;
        let state = self.detector.state();
        if !state.is_terminal() {
            self.turns.advance();
        }

        #[cfg(debug_assertions)]
        RoundInvariants::check_all(self).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Round invariants violated");
            EngineError::InvariantViolation(descriptions)
        })?;

        Ok(MoveReport {
            seat,
            cell,
            state,
            affected_lines: effect.affected(),
            eliminated_lines: effect.eliminated,
        })
    }

    /// Empty cells, ascending. Empty once the round is over.
    pub fn legal_moves(&self) -> BTreeSet<CellIndex> {
        if self.is_over() {
            return BTreeSet::new();
        }
        self.board.empty_cells().collect()
    }

    /// Current state.
    pub fn state(&self) -> RoundState {
        self.detector.state()
    }

    /// Whether the round is won or tied.
    pub fn is_over(&self) -> bool {
        self.detector.state().is_terminal()
    }

    /// The winning player, if any.
    pub fn winner(&self) -> Option<&Player> {
        self.state().winner().map(|seat| self.roster.player(seat))
    }

    /// Seat to move (the last mover once the round is over).
    pub fn current_seat(&self) -> Seat {
        self.turns.current()
    }

    /// Player to move.
    pub fn current_player(&self) -> &Player {
        self.roster.player(self.turns.current())
    }

    /// Board dimensions.
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Registered players.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Generated lines.
    pub fn lines(&self) -> &LineIndex {
        &self.lines
    }

    /// Live line bookkeeping.
    pub fn tracker(&self) -> &LiveLineTracker {
        &self.tracker
    }

    /// Turn order.
    pub fn turn_order(&self) -> &TurnOrder {
        &self.turns
    }

    /// Moves applied so far.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Marks on `line`, in walking order.
    pub fn line_squares(&self, id: LineId) -> Vec<Square> {
        self.lines
            .line(id)
            .cells()
            .iter()
            .filter_map(|cell| self.board.get(*cell))
            .collect()
    }

    /// Empty cells of `line`.
    pub fn open_cells(&self, id: LineId) -> Vec<CellIndex> {
        self.lines
            .line(id)
            .cells()
            .iter()
            .copied()
            .filter(|cell| self.board.is_empty(*cell))
            .collect()
    }
}

impl fmt::Display for Round {
    /// Plain grid: marks for claimed cells, numbers for empty ones.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.board.size();
        let width = self.board.cell_count().to_string().len();
        for (cell, square) in self.board.cells() {
            let label = match square {
                Square::Empty => cell.to_string(),
                Square::Occupied(seat) => self.roster.player(seat).mark().to_string(),
            };
            write!(f, "{:>width$}", label, width = width)?;
            let (_, column) = cell.row_col(size);
            if column + 1 < size {
                write!(f, " | ")?;
            } else {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
