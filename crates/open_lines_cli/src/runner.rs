//! The work behind each subcommand.

use crate::settings::Settings;
use anyhow::{Context, Result, bail};
use derive_getters::Getters;
use open_lines::{
    BoardConfig, CellIndex, Direction, LineIndex, Match, MatchStatus, MoveSelector, MoveSource,
    Round, RoundState, new_round, play_round,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, instrument, warn};

/// One row of the final standings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct Standing {
    name: String,
    mark: String,
    score: u32,
}

/// Outcome of a simulated match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct MatchSummary {
    rounds_played: u32,
    ties: u32,
    champion: Option<String>,
    standings: Vec<Standing>,
}

impl MatchSummary {
    fn of(game: &Match) -> Self {
        Self {
            rounds_played: game.rounds_played(),
            ties: game.ties(),
            champion: game.champion().map(|p| p.name().clone()),
            standings: game
                .standings()
                .into_iter()
                .map(|(player, score)| Standing {
                    name: player.name().clone(),
                    mark: player.mark().to_string(),
                    score,
                })
                .collect(),
        }
    }
}

impl fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.champion {
            Some(name) => writeln!(f, "Champion: {}", name)?,
            None => writeln!(f, "No champion")?,
        }
        writeln!(f, "Rounds: {} ({} tied)", self.rounds_played, self.ties)?;
        for (rank, standing) in self.standings.iter().enumerate() {
            writeln!(
                f,
                "{:>2}. {:<20} {:>2} {:>3}",
                rank + 1,
                standing.name,
                standing.mark,
                standing.score
            )?;
        }
        Ok(())
    }
}

/// Segment and track counts for one board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineReport {
    size: usize,
    line_length: usize,
    total: usize,
    directions: Vec<(Direction, usize, usize)>,
}

impl fmt::Display for LineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}x{} board, lines of {}: {} lines",
            self.size, self.size, self.line_length, self.total
        )?;
        for (direction, lines, tracks) in &self.directions {
            writeln!(f, "  {:<13} {:>4} lines on {:>3} tracks", direction, lines, tracks)?;
        }
        Ok(())
    }
}

/// Human-readable round result.
pub fn describe(round: &Round) -> String {
    match round.state() {
        RoundState::InProgress => format!("in progress, {} to move", round.current_player().name()),
        RoundState::Won(seat) => format!("won by {}", round.roster().player(seat).name()),
        RoundState::Tied => "tied".to_string(),
    }
}

/// One selector per seat; seeded from `seed` when given.
fn selectors(seed: Option<u64>, seats: usize) -> Vec<MoveSelector> {
    match seed {
        Some(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..seats).map(|_| MoveSelector::seeded(rng.r#gen())).collect()
        }
        None => (0..seats).map(|_| MoveSelector::new()).collect(),
    }
}

/// Plays rounds between automated players until someone reaches the
/// winning score or `max_rounds` is used up.
#[instrument(skip(settings))]
pub fn simulate(settings: &Settings) -> Result<MatchSummary> {
    let config = settings.match_config()?;
    let players = settings.roster()?;
    if let Some(human) = players.iter().find(|p| !p.is_automated()) {
        bail!(
            "{} is a human player; simulate only runs automated players",
            human.name()
        );
    }

    let mut game = Match::new(config, players, &settings.playing_order())?;
    let mut engines = selectors(*settings.seed(), game.roster().len());

    for number in 1..=*settings.max_rounds() {
        let mut round = game.start_round()?;
        let mut sources: Vec<&mut dyn MoveSource> = engines
            .iter_mut()
            .map(|engine| engine as &mut dyn MoveSource)
            .collect();
        play_round(&mut round, &mut sources)?;

        info!(
            round = number,
            moves = round.history().len(),
            result = %describe(&round),
            "Round complete"
        );
        debug!(board = %round, "Final board");

        if let MatchStatus::Decided(_) = game.record(&round)? {
            break;
        }
    }

    if game.champion().is_none() {
        warn!(
            max_rounds = settings.max_rounds(),
            "Match stopped without a champion"
        );
    }
    Ok(MatchSummary::of(&game))
}

/// Applies `moves` in turn order to a fresh round.
#[instrument(skip(settings))]
pub fn replay(settings: &Settings, moves: &[usize]) -> Result<Round> {
    let board = settings.board()?;
    let mut round = new_round(
        *board.size(),
        *board.line_length(),
        settings.roster()?,
        &settings.playing_order(),
    )?;

    for (number, &cell) in moves.iter().enumerate() {
        round
            .apply_move(CellIndex::new(cell))
            .with_context(|| format!("move {} (cell {})", number + 1, cell))?;
    }

    info!(moves = moves.len(), result = %describe(&round), "Replay complete");
    Ok(round)
}

/// Counts the lines of a board by direction.
#[instrument]
pub fn line_report(board: BoardConfig) -> Result<LineReport> {
    use strum::IntoEnumIterator;

    let index = LineIndex::build(*board.size(), *board.line_length())?;
    Ok(LineReport {
        size: index.size(),
        line_length: index.line_length(),
        total: index.len(),
        directions: Direction::iter()
            .map(|d| (d, index.count_in(d), index.tracks_in(d)))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Overrides, PlayerSettings};

    fn seeded(seed: u64) -> Settings {
        Settings::default().with_overrides(Overrides {
            seed: Some(seed),
            rounds_to_win: Some(2),
            ..Overrides::default()
        })
    }

    #[test]
    fn test_seeded_simulation_is_reproducible() {
        let first = simulate(&seeded(11)).expect("simulation runs");
        let second = simulate(&seeded(11)).expect("simulation runs");
        assert_eq!(first, second);

        let won: u32 = first.standings().iter().map(|s| *s.score()).sum();
        assert_eq!(*first.rounds_played(), first.ties() + won);
    }

    #[test]
    fn test_simulation_rejects_human_players() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("match.toml");
        std::fs::write(
            &path,
            r#"[[players]]
name = "Alice"
mark = "X"
kind = "human"

[[players]]
name = "Bruno"
mark = "O"
"#,
        )
        .expect("Failed to write TOML");

        let settings = Settings::from_file(&path).expect("Load failed");
        let err = simulate(&settings).expect_err("humans cannot be simulated");
        assert!(err.to_string().contains("Alice"));
    }

    #[test]
    fn test_replay_reports_winner() {
        let settings = Settings::default();
        let round = replay(&settings, &[1, 6, 2, 7, 3, 8, 4]).expect("legal moves");
        assert_eq!(describe(&round), "won by Alice");
    }

    #[test]
    fn test_replay_stops_at_illegal_move() {
        let settings = Settings::default().with_overrides(Overrides {
            players: vec![
                PlayerSettings::automated("Chloe", "Z"),
                PlayerSettings::automated("Dmitri", "W"),
            ],
            ..Overrides::default()
        });
        let err = replay(&settings, &[1, 1]).expect_err("cell 1 is taken");
        assert!(format!("{:#}", err).contains("move 2"));
    }

    #[test]
    fn test_line_report_for_small_board() {
        let report = line_report(BoardConfig::new(4, 4).expect("valid board")).expect("report");
        assert_eq!(report.total, 10);
        assert!(report.to_string().contains("10 lines"));
    }
}
