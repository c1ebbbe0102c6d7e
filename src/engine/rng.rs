//! Deterministic random number generation.
//!
//! Random inputs are generated from a PCG (Permuted Congruential Generator)
//! seeded explicitly, so the same seed always yields the same input on every
//! platform, and a visualization can be reproduced exactly.

use rand::prelude::*;
use rand_pcg::Pcg64;

/// Deterministic, reproducible random number generator.
#[derive(Debug, Clone)]
pub struct VizRng {
    rng: Pcg64,
}

impl VizRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Generate an integer in `[min, max]` (inclusive). Returns `min` when
    /// the range is empty.
    pub fn gen_range_i32(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Generate `n` integers in `[min, max]`.
    #[must_use]
    pub fn sample_i32(&mut self, n: usize, min: i32, max: i32) -> Vec<i32> {
        (0..n).map(|_| self.gen_range_i32(min, max)).collect()
    }
}
