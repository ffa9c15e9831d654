//! Heuristic move selection for automated players.
//!
//! Rules are pure functions of a round, tried in order; the first one
//! with an opinion supplies the candidate cells. Remaining ties go to the
//! cell touching the most live lines, then to the [`TieBreak`].

mod rules;
mod tie_break;

pub use rules::{ExtendOwnLine, ImminentLine, MostCoverage, OpeningMove};
pub use tie_break::{FirstCandidate, RandomTieBreak, TieBreak};

use crate::error::{EngineError, Result};
use crate::round::Round;
use crate::types::{CellIndex, Seat};
use rand::rngs::StdRng;
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// One move-selection rule.
pub trait Heuristic {
    /// Proposed cells, or `None` when the rule does not apply.
    ///
    /// A returned set is never empty.
    fn candidates(round: &Round, actor: Seat) -> Option<BTreeSet<CellIndex>>;

    /// Short name for logs.
    fn name() -> &'static str;
}

/// Ordered rules composed first-opinion-wins.
///
/// Implemented for tuples of [`Heuristic`]s.
pub trait HeuristicChain {
    /// The first rule with an opinion and its cells.
    fn first_opinion(round: &Round, actor: Seat) -> Option<(&'static str, BTreeSet<CellIndex>)>;
}

fn ask<H: Heuristic>(round: &Round, actor: Seat) -> Option<(&'static str, BTreeSet<CellIndex>)> {
    H::candidates(round, actor).map(|cells| (H::name(), cells))
}

impl<H1, H2> HeuristicChain for (H1, H2)
where
    H1: Heuristic,
    H2: Heuristic,
{
    fn first_opinion(round: &Round, actor: Seat) -> Option<(&'static str, BTreeSet<CellIndex>)> {
        ask::<H1>(round, actor).or_else(|| ask::<H2>(round, actor))
    }
}

impl<H1, H2, H3> HeuristicChain for (H1, H2, H3)
where
    H1: Heuristic,
    H2: Heuristic,
    H3: Heuristic,
{
    fn first_opinion(round: &Round, actor: Seat) -> Option<(&'static str, BTreeSet<CellIndex>)> {
        ask::<H1>(round, actor)
            .or_else(|| ask::<H2>(round, actor))
            .or_else(|| ask::<H3>(round, actor))
    }
}

impl<H1, H2, H3, H4> HeuristicChain for (H1, H2, H3, H4)
where
    H1: Heuristic,
    H2: Heuristic,
    H3: Heuristic,
    H4: Heuristic,
{
    fn first_opinion(round: &Round, actor: Seat) -> Option<(&'static str, BTreeSet<CellIndex>)> {
        ask::<H1>(round, actor)
            .or_else(|| ask::<H2>(round, actor))
            .or_else(|| ask::<H3>(round, actor))
            .or_else(|| ask::<H4>(round, actor))
    }
}

/// Opening, imminent win/block, extend own line, most coverage.
pub type StandardRules = (OpeningMove, ImminentLine, ExtendOwnLine, MostCoverage);

/// Equally good cells for `actor`, before the final tie-break.
///
/// # Errors
///
/// - [`EngineError::RoundAlreadyOver`] for a finished round
/// - [`EngineError::UnknownPlayer`] if `actor` has no seat in the round
/// - [`EngineError::InvariantViolation`] if no rule proposes a cell,
///   which a round in progress with an empty cell never allows
#[instrument(skip(round))]
pub fn finalists(round: &Round, actor: Seat) -> Result<Vec<CellIndex>> {
    if round.is_over() {
        return Err(EngineError::RoundAlreadyOver);
    }
    if round.roster().get(actor).is_none() {
        return Err(EngineError::UnknownPlayer(actor.to_string()));
    }

    let (rule, candidates) = StandardRules::first_opinion(round, actor).ok_or_else(|| {
        EngineError::InvariantViolation("no rule proposed a cell".to_string())
    })?;

    let finalists: Vec<CellIndex> = rules::keep_best(candidates.iter().copied(), |cell| {
        round.tracker().live_coverage(round.lines(), cell)
    })
    .into_iter()
    .collect();

    debug!(
        rule,
        candidates = candidates.len(),
        finalists = finalists.len(),
        "Heuristic applied"
    );
    Ok(finalists)
}

/// Picks cells for automated players.
#[derive(Debug, Clone)]
pub struct MoveSelector<T = RandomTieBreak<StdRng>> {
    tie_break: T,
}

impl MoveSelector {
    /// Random tie-breaks seeded from the operating system.
    pub fn new() -> Self {
        Self::with_tie_break(RandomTieBreak::from_entropy())
    }

    /// Reproducible random tie-breaks.
    pub fn seeded(seed: u64) -> Self {
        Self::with_tie_break(RandomTieBreak::seeded(seed))
    }
}

impl Default for MoveSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TieBreak> MoveSelector<T> {
    /// Uses a custom final tie-break.
    pub fn with_tie_break(tie_break: T) -> Self {
        Self { tie_break }
    }

    /// Chooses the cell `actor` should mark.
    ///
    /// # Errors
    ///
    /// Same as [`finalists`].
    #[instrument(skip(self, round))]
    pub fn choose(&mut self, round: &Round, actor: Seat) -> Result<CellIndex> {
        let finalists = finalists(round, actor)?;
        let cell = self.tie_break.pick(&finalists);
        debug!(%cell, "Cell chosen");
        Ok(cell)
    }
}
