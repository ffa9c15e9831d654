//! Multi-round matches with persistent scores.

use crate::config::MatchConfig;
use crate::error::{EngineError, Result};
use crate::outcome::RoundState;
use crate::player::{Player, Roster};
use crate::round::{Round, RoundTicket};
use crate::turns::TurnOrder;
use crate::types::Seat;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, instrument, warn};

static NEXT_MATCH_ID: AtomicU64 = AtomicU64::new(1);

/// Where a match stands after a round was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchStatus {
    /// More rounds are needed.
    Ongoing,
    /// This seat reached the winning score.
    Decided(Seat),
}

/// A series of rounds between the same players.
///
/// Rounds are created fresh each time; only the scores carry over. Only
/// the round most recently returned by [`Match::start_round`] can be
/// recorded, and only once.
#[derive(Debug, Clone, Serialize)]
pub struct Match {
    #[serde(skip)]
    id: u64,
    #[serde(skip)]
    issued: u32,
    #[serde(skip)]
    scored: u32,
    config: MatchConfig,
    roster: Roster,
    turns: TurnOrder,
    scores: Vec<u32>,
    rounds_played: u32,
    ties: u32,
}

impl Match {
    /// Starts a match with all scores at zero.
    ///
    /// `turn_order` names every player once.
    ///
    /// # Errors
    ///
    /// Same as [`new_round`](crate::new_round).
    #[instrument(skip(players), fields(players = players.len()))]
    pub fn new(config: MatchConfig, players: Vec<Player>, turn_order: &[&str]) -> Result<Self> {
        let roster = Roster::new(players, config.board())?;
        let order = turn_order
            .iter()
            .map(|name| roster.seat_of(name))
            .collect::<Result<Vec<_>>>()?;
        let turns = TurnOrder::new(order, roster.len())?;
        info!(rounds_to_win = config.rounds_to_win(), "Match started");
        Ok(Self {
            id: NEXT_MATCH_ID.fetch_add(1, Ordering::Relaxed),
            issued: 0,
            scored: 0,
            config,
            scores: vec![0; roster.len()],
            roster,
            turns,
            rounds_played: 0,
            ties: 0,
        })
    }

    /// Fresh round with this match's players and turn order.
    ///
    /// # Errors
    ///
    /// [`EngineError::RoundAlreadyOver`] once the match is decided.
    pub fn start_round(&mut self) -> Result<Round> {
        if self.champion().is_some() {
            return Err(EngineError::RoundAlreadyOver);
        }
        let round = Round::new(*self.config.board(), self.roster.clone(), self.turns.clone())?;
        self.issued += 1;
        Ok(round.with_ticket(RoundTicket {
            match_id: self.id,
            serial: self.issued,
        }))
    }

    /// Scores a finished round.
    ///
    /// # Errors
    ///
    /// - [`EngineError::RoundAlreadyOver`] if the match is already decided
    /// - [`EngineError::ForeignRound`] unless `round` is the latest one
    ///   from [`Match::start_round`]
    /// - [`EngineError::RoundAlreadyScored`] if `round` was recorded before
    /// - [`EngineError::RoundInProgress`] if the round is not finished
    #[instrument(skip(self, round), fields(rounds_played = self.rounds_played))]
    pub fn record(&mut self, round: &Round) -> Result<MatchStatus> {
        if self.champion().is_some() {
            return Err(EngineError::RoundAlreadyOver);
        }
        let latest = RoundTicket {
            match_id: self.id,
            serial: self.issued,
        };
        if round.ticket() != Some(latest) {
            warn!(issued = self.issued, "Refusing a round this match did not start last");
            return Err(EngineError::ForeignRound);
        }
        if self.scored == self.issued {
            return Err(EngineError::RoundAlreadyScored);
        }
        match round.state() {
            RoundState::InProgress => return Err(EngineError::RoundInProgress),
            RoundState::Won(seat) => {
                let Some(score) = self.scores.get_mut(seat.index()) else {
                    return Err(EngineError::UnknownPlayer(seat.to_string()));
                };
                *score += 1;
                info!(
                    winner = %self.roster.player(seat).name(),
                    score = *score,
                    "Round won"
                );
            }
            RoundState::Tied => {
                self.ties += 1;
                info!("Round tied");
            }
        }
        self.scored = self.issued;
        self.rounds_played += 1;

        Ok(match self.champion_seat() {
            Some(seat) => {
                info!(champion = %self.roster.player(seat).name(), "Match decided");
                MatchStatus::Decided(seat)
            }
            None => MatchStatus::Ongoing,
        })
    }

    fn champion_seat(&self) -> Option<Seat> {
        self.scores
            .iter()
            .position(|score| *score >= *self.config.rounds_to_win())
            .map(Seat::new)
    }

    /// The player who reached the winning score, once the match is decided.
    pub fn champion(&self) -> Option<&Player> {
        self.champion_seat().map(|seat| self.roster.player(seat))
    }

    /// Round wins of `seat`.
    pub fn score(&self, seat: Seat) -> u32 {
        self.scores.get(seat.index()).copied().unwrap_or_default()
    }

    /// Players by descending score; registration order among equals.
    pub fn standings(&self) -> Vec<(&Player, u32)> {
        let mut table: Vec<_> = self
            .roster
            .iter()
            .map(|(seat, player)| (player, self.score(seat)))
            .collect();
        table.sort_by(|a, b| b.1.cmp(&a.1));
        table
    }

    /// Rounds scored so far.
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Rounds that ended in a tie.
    pub fn ties(&self) -> u32 {
        self.ties
    }

    /// Registered players.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Match settings.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }
}
