//! Automated opponents.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::position::MoveOption;

/// Trait for opponents that pick a reply from the legal moves.
pub trait Opponent {
    /// Picks one of `moves` by index. Returns `None` only if `moves` is empty.
    fn choose(&mut self, moves: &[MoveOption]) -> Option<usize>;

    /// Returns the opponent's display name.
    fn name(&self) -> &str;
}

/// Opponent choosing uniformly at random among all legal moves.
#[derive(Debug)]
pub struct RandomOpponent<R = StdRng> {
    name: String,
    rng: R,
}

impl<R: Rng> RandomOpponent<R> {
    /// Creates a random opponent drawing from `rng`.
    pub fn new(name: impl Into<String>, rng: R) -> Self {
        Self {
            name: name.into(),
            rng,
        }
    }
}

impl RandomOpponent<StdRng> {
    /// Creates a random opponent seeded from the operating system.
    pub fn from_os_rng(name: impl Into<String>) -> Self {
        Self::new(name, StdRng::from_os_rng())
    }

    /// Creates a reproducible random opponent.
    pub fn seeded(name: impl Into<String>, seed: u64) -> Self {
        Self::new(name, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Opponent for RandomOpponent<R> {
    #[instrument(skip(self, moves), fields(opponent = %self.name, count = moves.len()))]
    fn choose(&mut self, moves: &[MoveOption]) -> Option<usize> {
        if moves.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..moves.len());
        debug!(index, mv = %moves[index], "Opponent chose move");
        Some(index)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
