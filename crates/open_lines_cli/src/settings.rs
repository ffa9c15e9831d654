//! Match settings loaded from TOML and overridden from the command line.

use derive_getters::Getters;
use derive_more::{Display, Error};
use open_lines::{BoardConfig, DEFAULT_ROUNDS_TO_WIN, MatchConfig, Mark, Player, PlayerKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, instrument};

/// One player entry in a settings file or a `--player NAME:MARK` flag.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayerSettings {
    /// Display name.
    name: String,
    /// Mark written into claimed cells.
    mark: String,
    /// Human or automated; automated unless stated.
    #[serde(default)]
    kind: PlayerKind,
}

impl PlayerSettings {
    /// An automated player.
    pub fn automated(name: impl Into<String>, mark: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mark: mark.into(),
            kind: PlayerKind::Automated,
        }
    }

    /// Validates the entry into an engine player.
    pub fn to_player(&self) -> Result<Player, SettingsError> {
        let mark = Mark::new(self.mark.as_str())
            .map_err(|e| SettingsError::new(format!("Player {}: {}", self.name, e)))?;
        Player::new(self.name.as_str(), mark, self.kind)
            .map_err(|e| SettingsError::new(format!("Player {}: {}", self.name, e)))
    }
}

impl FromStr for PlayerSettings {
    type Err = String;

    /// Parses `NAME:MARK`. The last colon separates the two.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (name, mark) = raw
            .rsplit_once(':')
            .ok_or_else(|| format!("expected NAME:MARK, got {:?}", raw))?;
        if name.trim().is_empty() || mark.is_empty() {
            return Err(format!("expected NAME:MARK, got {:?}", raw));
        }
        Ok(Self::automated(name.trim(), mark))
    }
}

/// Everything needed to run a match.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct Settings {
    /// Board edge.
    #[serde(default = "default_size")]
    size: usize,

    /// Winning line length; the shortest allowed line when absent.
    #[serde(default)]
    line_length: Option<usize>,

    /// Round wins needed to take the match.
    #[serde(default = "default_rounds_to_win")]
    rounds_to_win: u32,

    /// Upper bound on rounds, since tied rounds score nothing.
    #[serde(default = "default_max_rounds")]
    max_rounds: u32,

    /// Seed for reproducible tie-breaks.
    #[serde(default)]
    seed: Option<u64>,

    /// Registered players.
    #[serde(default = "default_players")]
    players: Vec<PlayerSettings>,

    /// Names in playing order; registration order when absent.
    #[serde(default)]
    turn_order: Option<Vec<String>>,
}

#[instrument]
fn default_size() -> usize {
    5
}

#[instrument]
fn default_rounds_to_win() -> u32 {
    DEFAULT_ROUNDS_TO_WIN
}

#[instrument]
fn default_max_rounds() -> u32 {
    100
}

#[instrument]
fn default_players() -> Vec<PlayerSettings> {
    vec![
        PlayerSettings::automated("Alice", "X"),
        PlayerSettings::automated("Bruno", "O"),
    ]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            size: default_size(),
            line_length: None,
            rounds_to_win: default_rounds_to_win(),
            max_rounds: default_max_rounds(),
            seed: None,
            players: default_players(),
            turn_order: None,
        }
    }
}

/// Command-line values that replace file values when present.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--size`
    pub size: Option<usize>,
    /// `--line-length`
    pub line_length: Option<usize>,
    /// `--rounds-to-win`
    pub rounds_to_win: Option<u32>,
    /// `--seed`
    pub seed: Option<u64>,
    /// `--player`, replacing the whole roster when non-empty.
    pub players: Vec<PlayerSettings>,
}

impl Settings {
    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SettingsError::new(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| SettingsError::new(format!("Failed to parse settings: {}", e)))?;

        info!(
            size = settings.size,
            players = settings.players.len(),
            "Settings loaded successfully"
        );
        Ok(settings)
    }

    /// Applies command-line overrides.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(size) = overrides.size {
            self.size = size;
        }
        if overrides.line_length.is_some() {
            self.line_length = overrides.line_length;
        }
        if let Some(rounds) = overrides.rounds_to_win {
            self.rounds_to_win = rounds;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if !overrides.players.is_empty() {
            self.players = overrides.players;
            self.turn_order = None;
        }
        self
    }

    /// Validated board dimensions.
    pub fn board(&self) -> Result<BoardConfig, SettingsError> {
        let board = match self.line_length {
            Some(line_length) => BoardConfig::new(self.size, line_length),
            None => BoardConfig::with_default_line(self.size),
        };
        board.map_err(|e| SettingsError::new(e.to_string()))
    }

    /// Validated match settings.
    pub fn match_config(&self) -> Result<MatchConfig, SettingsError> {
        MatchConfig::new(self.board()?, self.rounds_to_win)
            .map_err(|e| SettingsError::new(e.to_string()))
    }

    /// Engine players in registration order.
    pub fn roster(&self) -> Result<Vec<Player>, SettingsError> {
        self.players.iter().map(PlayerSettings::to_player).collect()
    }

    /// Names in playing order.
    pub fn playing_order(&self) -> Vec<&str> {
        match &self.turn_order {
            Some(order) => order.iter().map(String::as_str).collect(),
            None => self.players.iter().map(|p| p.name.as_str()).collect(),
        }
    }
}

/// Settings error.
#[derive(Debug, Clone, Display, Error)]
#[display("Settings error: {} at {}:{}", message, file, line)]
pub struct SettingsError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SettingsError {
    /// Creates a new settings error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
