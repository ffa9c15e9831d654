//! Per-player live sets stay inside the global live set.

use super::Invariant;
use crate::round::Round;

/// Invariant: `player_live[p] ⊆ global_live` for every seat.
pub struct PlayerLiveWithinGlobal;

impl Invariant<Round> for PlayerLiveWithinGlobal {
    fn holds(round: &Round) -> bool {
        let tracker = round.tracker();
        round
            .roster()
            .seats()
            .all(|seat| tracker.player_live(seat).is_subset(tracker.global_live()))
    }

    fn description() -> &'static str {
        "Each player's live lines are a subset of the global live lines"
    }
}
