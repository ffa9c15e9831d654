//! Final choice among equally good cells.

use crate::types::CellIndex;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Picks one cell out of a set of equally ranked candidates.
pub trait TieBreak {
    /// Chooses one of `candidates`.
    ///
    /// Callers always pass at least one candidate.
    fn pick(&mut self, candidates: &[CellIndex]) -> CellIndex;
}

/// Uniform random choice.
#[derive(Debug, Clone)]
pub struct RandomTieBreak<R> {
    rng: R,
}

impl<R: Rng> RandomTieBreak<R> {
    /// Uses the given generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomTieBreak<StdRng> {
    /// Seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TieBreak for RandomTieBreak<R> {
    fn pick(&mut self, candidates: &[CellIndex]) -> CellIndex {
        candidates[self.rng.gen_range(0..candidates.len())]
    }
}

/// Always the lowest-numbered candidate. Deterministic, for tests and replays.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCandidate;

impl TieBreak for FirstCandidate {
    fn pick(&mut self, candidates: &[CellIndex]) -> CellIndex {
        candidates[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(raw: &[usize]) -> Vec<CellIndex> {
        raw.iter().copied().map(CellIndex::new).collect()
    }

    #[test]
    fn test_first_candidate() {
        assert_eq!(FirstCandidate.pick(&cells(&[4, 9])), CellIndex::new(4));
    }

    #[test]
    fn test_random_stays_in_set() {
        let options = cells(&[3, 8, 12]);
        let mut tie_break = RandomTieBreak::seeded(7);
        for _ in 0..50 {
            assert!(options.contains(&tie_break.pick(&options)));
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let options = cells(&[1, 2, 3, 4, 5, 6]);
        let mut a = RandomTieBreak::seeded(42);
        let mut b = RandomTieBreak::seeded(42);
        let first: Vec<_> = (0..10).map(|_| a.pick(&options)).collect();
        let second: Vec<_> = (0..10).map(|_| b.pick(&options)).collect();
        assert_eq!(first, second);
    }
}
