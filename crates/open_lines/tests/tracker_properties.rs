//! Property-based tests for live line bookkeeping.
//!
//! Random legal games must keep the tracker consistent with the board:
//! - per-player live sets stay inside the global live set
//! - live sets only ever shrink
//! - a won round has a completed line and a tied round has none left
//!   that could be completed in time
//! - a round in progress still has a line that could be completed

use open_lines::{
    CellIndex, LineId, Player, Round, RoundState, Seat, completable_within, new_round,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;

// =============================================================================
// Strategies for generating test inputs
// =============================================================================

/// Board edge and line length with K <= N.
fn arb_dimensions() -> impl Strategy<Value = (usize, usize)> {
    (4usize..=7).prop_flat_map(|size| (Just(size), 4usize..=size))
}

fn arb_seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

fn fresh_round(size: usize, line_length: usize, players: usize) -> Round {
    let names = ["Alice", "Bruno", "Chloe", "Dmitri", "Esther"];
    let marks = ["X", "O", "Z", "W", "V"];
    let roster = names
        .iter()
        .zip(marks)
        .take(players)
        .map(|(name, mark)| Player::automated(*name, mark).expect("valid player"))
        .collect();
    new_round(size, line_length, roster, &names[..players]).expect("valid round")
}

/// Live lines whose owner (or the next player, when unowned) can still
/// fill every open cell before the board runs out.
fn completable_lines(round: &Round) -> usize {
    let tracker = round.tracker();
    let turns = round.turn_order();
    let remaining = round.board().empty_count();
    let Some(last) = round.history().last().map(|record| record.seat) else {
        return tracker.global_live().len();
    };
    tracker
        .global_live()
        .iter()
        .filter(|&&id| {
            let distance = tracker
                .tally(id)
                .owner()
                .map_or(0, |owner| turns.distance_after(last, owner));
            completable_within(tracker.remaining(id), distance, turns.len(), remaining)
        })
        .count()
}

fn snapshot(round: &Round) -> (BTreeSet<LineId>, Vec<BTreeSet<LineId>>) {
    let tracker = round.tracker();
    let per_seat = (0..tracker.seats())
        .map(|i| tracker.player_live(Seat::new(i)).clone())
        .collect();
    (tracker.global_live().clone(), per_seat)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_live_sets_are_nested_and_shrink(
        (size, line_length) in arb_dimensions(),
        seed in arb_seed(),
    ) {
        let max = ((size * size - 1) / (line_length - 1)) / 2;
        let players = max.clamp(2, 3);
        let mut round = fresh_round(size, line_length, players);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let (mut global, mut per_seat) = snapshot(&round);
        while !round.is_over() {
            let moves: Vec<CellIndex> = round.legal_moves().into_iter().collect();
            let cell = *moves.choose(&mut rng).expect("round in progress has empty cells");
            round.apply_move(cell).expect("legal move");

            let (next_global, next_per_seat) = snapshot(&round);
            prop_assert!(next_global.is_subset(&global));
            for (before, after) in per_seat.iter().zip(&next_per_seat) {
                prop_assert!(after.is_subset(before));
                prop_assert!(after.is_subset(&next_global));
            }
            global = next_global;
            per_seat = next_per_seat;
        }
    }

    #[test]
    fn prop_terminal_states_are_justified(
        (size, line_length) in arb_dimensions(),
        extra_seat in any::<bool>(),
        seed in arb_seed(),
    ) {
        let max = ((size * size - 1) / (line_length - 1)) / 2;
        let players = if extra_seat && max >= 3 { 3 } else { 2 };
        let mut round = fresh_round(size, line_length, players);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        while !round.is_over() {
            let moves: Vec<CellIndex> = round.legal_moves().into_iter().collect();
            let cell = *moves.choose(&mut rng).expect("round in progress has empty cells");
            let report = round.apply_move(cell).expect("legal move");

            // A round that carries on must still have a line someone can finish.
            if report.state == RoundState::InProgress {
                prop_assert!(completable_lines(&round) > 0);
            }
        }

        let tracker = round.tracker();
        match round.state() {
            RoundState::Won(seat) => {
                prop_assert!(!tracker.lines_completed_by(seat).is_empty());
            }
            RoundState::Tied => prop_assert_eq!(completable_lines(&round), 0),
            RoundState::InProgress => prop_assert!(false, "loop exits only on a finished round"),
        }
    }

    #[test]
    fn prop_tallies_count_marks(
        (size, line_length) in arb_dimensions(),
        seed in arb_seed(),
        moves in 1usize..12,
    ) {
        let mut round = fresh_round(size, line_length, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        for _ in 0..moves {
            if round.is_over() {
                break;
            }
            let open: Vec<CellIndex> = round.legal_moves().into_iter().collect();
            let cell = *open.choose(&mut rng).expect("round in progress has empty cells");
            round.apply_move(cell).expect("legal move");
        }

        let tracker = round.tracker();
        for &id in tracker.global_live() {
            let tally = tracker.tally(id);
            let marked = round.lines().line(id).cells().len() - round.open_cells(id).len();
            prop_assert_eq!(tally.filled(), marked);
            prop_assert_eq!(tally.owner().is_none(), marked == 0);
        }
    }
}
