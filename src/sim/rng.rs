//! Seeded random source shared by every stochastic actor
//!
//! One stream per environment. The engine owns it and lends it to the ball
//! and the opponent paddle, so a single seed replays a whole episode.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Deterministic uniform random stream
#[derive(Debug, Clone)]
pub struct RandomStream {
    seed: u64,
    rng: Pcg32,
}

impl RandomStream {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this stream was created from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform real in `[lo, hi)`; returns `lo` for an empty range
    pub fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        self.rng.random_range(lo..hi)
    }

    /// Uniform real in `[0, 1)`
    pub fn unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Uniform pick from a fixed set. `N` must be non-zero.
    pub fn choose<T: Copy, const N: usize>(&mut self, items: &[T; N]) -> T {
        items[self.rng.random_range(0..N)]
    }
}
