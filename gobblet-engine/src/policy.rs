//! Opponent strategies.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Action, Board};

/// Picks the opponent's action from a precomputed list of legal candidates.
///
/// The engine never calls `choose` with an empty list. The returned value is an
/// index into `candidates`.
///
/// Object-safe so it can be used as `Box<dyn OpponentPolicy>`.
pub trait OpponentPolicy {
    fn choose(&mut self, board: &Board, candidates: &[Action]) -> usize;
}

impl<P: OpponentPolicy + ?Sized> OpponentPolicy for Box<P> {
    fn choose(&mut self, board: &Board, candidates: &[Action]) -> usize {
        (**self).choose(board, candidates)
    }
}

/// Uniform random choice among all legal placements and moves.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    /// Reproducible policy: the same seed gives the same choices.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl OpponentPolicy for RandomPolicy {
    fn choose(&mut self, _board: &Board, candidates: &[Action]) -> usize {
        self.rng.random_range(0..candidates.len())
    }
}

/// Always takes the first candidate. Useful in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstLegalPolicy;

impl OpponentPolicy for FirstLegalPolicy {
    fn choose(&mut self, _board: &Board, _candidates: &[Action]) -> usize {
        0
    }
}
