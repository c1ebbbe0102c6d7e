//! Reproducible random input.

use crate::config::InputConfig;
use crate::engine::VizRng;

/// `len` values in `1..=max` drawn from a PCG seeded with `seed`.
#[must_use]
pub fn random_values(seed: u64, len: usize, max: i32) -> Vec<i32> {
    VizRng::new(seed).sample_i32(len, 1, max.max(1))
}

/// Random input as described by the `input` configuration section.
#[must_use]
pub fn random_input(config: &InputConfig) -> Vec<i32> {
    VizRng::new(config.seed).sample_i32(config.length, config.min_value, config.max_value)
}
