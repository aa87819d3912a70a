use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::game::Move;

/// Opponent policy for the non-learning seats: uniform over legal moves.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        RandomPolicy {
            rng: StdRng::from_os_rng(),
        }
    }

    /// A policy whose draws are reproducible from `seed`.
    pub fn seeded(seed: u64) -> Self {
        RandomPolicy {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick one of `legal_moves`, or pass if there are none.
    pub fn choose(&mut self, legal_moves: &[u8]) -> Move {
        if legal_moves.is_empty() {
            return Move::NoMove;
        }
        let idx = self.rng.random_range(0..legal_moves.len());
        Move::Piece(legal_moves[idx])
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}
