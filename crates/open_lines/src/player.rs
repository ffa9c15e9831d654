//! Players, their marks and the roster of a match.

use crate::config::BoardConfig;
use crate::error::{EngineError, Result};
use crate::types::Seat;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Longest mark a player may use.
pub const MAX_MARK_CHARS: usize = 2;

/// Shortest allowed player name.
pub const MIN_NAME_CHARS: usize = 3;

/// Longest allowed player name.
pub const MAX_NAME_CHARS: usize = 20;

/// Short token written into every cell a player claims.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[serde(transparent)]
pub struct Mark(String);

impl Mark {
    /// Validates a mark.
    ///
    /// Marks are 1-2 characters and may not contain digits (which would
    /// read as cell numbers), control characters or backslashes.
    pub fn new(mark: impl Into<String>) -> Result<Self> {
        let mark = mark.into();
        let chars = mark.chars().count();
        if chars == 0 || chars > MAX_MARK_CHARS {
            return Err(EngineError::InvalidConfiguration(format!(
                "mark {:?} must be 1-{} characters",
                mark, MAX_MARK_CHARS
            )));
        }
        if mark
            .chars()
            .any(|c| c.is_ascii_digit() || c.is_control() || c == '\\' || c.is_whitespace())
        {
            return Err(EngineError::InvalidConfiguration(format!(
                "mark {:?} contains a digit, whitespace or control character",
                mark
            )));
        }
        Ok(Self(mark))
    }

    /// Returns the mark text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Mark {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Mark::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Who picks a player's cells.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PlayerKind {
    /// Moves arrive from outside the engine.
    Human,
    /// Moves are computed by the move selector.
    #[default]
    Automated,
}

/// A participant in a match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct Player {
    /// Unique display name.
    name: String,
    /// Unique mark.
    mark: Mark,
    /// Human or automated.
    kind: PlayerKind,
}

impl Player {
    /// Creates a player, validating the name length.
    pub fn new(name: impl Into<String>, mark: Mark, kind: PlayerKind) -> Result<Self> {
        let name = name.into().trim().to_string();
        let chars = name.chars().count();
        if !(MIN_NAME_CHARS..=MAX_NAME_CHARS).contains(&chars) {
            return Err(EngineError::InvalidConfiguration(format!(
                "player name {:?} must be {}-{} characters",
                name, MIN_NAME_CHARS, MAX_NAME_CHARS
            )));
        }
        Ok(Self { name, mark, kind })
    }

    /// Shorthand for an automated player.
    pub fn automated(name: impl Into<String>, mark: &str) -> Result<Self> {
        Self::new(name, Mark::new(mark)?, PlayerKind::Automated)
    }

    /// Shorthand for a human player.
    pub fn human(name: impl Into<String>, mark: &str) -> Result<Self> {
        Self::new(name, Mark::new(mark)?, PlayerKind::Human)
    }

    /// Whether the move selector plays for this player.
    pub fn is_automated(&self) -> bool {
        self.kind == PlayerKind::Automated
    }
}

/// The registered players, addressed by [`Seat`].
///
/// Fixed once play starts: names and marks are unique and the roster
/// size fits the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Validates a roster for the given board.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidConfiguration`] for fewer than two players,
    /// more than [`BoardConfig::max_players`], or a repeated name or
    /// mark (compared case-insensitively).
    #[instrument(skip(players), fields(count = players.len()))]
    pub fn new(players: Vec<Player>, board: &BoardConfig) -> Result<Self> {
        let max = board.max_players().max(2);
        if players.len() < 2 || players.len() > max {
            return Err(EngineError::InvalidConfiguration(format!(
                "{} players cannot share a {}x{} board with lines of {} (allowed: 2-{})",
                players.len(),
                board.size(),
                board.size(),
                board.line_length(),
                max
            )));
        }

        for (i, player) in players.iter().enumerate() {
            for other in &players[..i] {
                if other.name.eq_ignore_ascii_case(&player.name) {
                    return Err(EngineError::InvalidConfiguration(format!(
                        "name {:?} is already taken",
                        player.name
                    )));
                }
                if other.mark.0.to_lowercase() == player.mark.0.to_lowercase() {
                    return Err(EngineError::InvalidConfiguration(format!(
                        "mark {:?} is already taken",
                        player.mark.0
                    )));
                }
            }
        }

        debug!("Roster accepted");
        Ok(Self { players })
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// A valid roster is never empty.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Player sitting at `seat`.
    pub fn get(&self, seat: Seat) -> Option<&Player> {
        self.players.get(seat.0)
    }

    /// Player sitting at `seat`.
    ///
    /// # Panics
    ///
    /// If the seat was not handed out by this roster.
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.0]
    }

    /// Seat of the player with this name (case-insensitive).
    pub fn seat_of(&self, name: &str) -> Result<Seat> {
        self.players
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))
            .map(Seat)
            .ok_or_else(|| EngineError::UnknownPlayer(name.to_string()))
    }

    /// All seats in registration order.
    pub fn seats(&self) -> impl Iterator<Item = Seat> + '_ {
        (0..self.players.len()).map(Seat)
    }

    /// Players with their seats, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &Player)> {
        self.players.iter().enumerate().map(|(i, p)| (Seat(i), p))
    }
}
