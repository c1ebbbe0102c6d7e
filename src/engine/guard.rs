//! Invariant guards.
//!
//! A guard inspects every frame a run publishes and stops the run on the
//! first anomaly, before a corrupted snapshot can propagate to observers
//! of later frames.
//!
//! # Guards
//!
//! 1. [`MultisetGuard`]: the multiset of cell values never changes during a
//!    run (no value lost or duplicated mid-run).
//! 2. `TerminalGuard` (in [`crate::pathfinding`]): at most one Start and one
//!    End cell exist.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{VizError, VizResult};

use super::cell::Cell;

/// Guard configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuardConfig {
    /// Check every frame of every run.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
        }
    }
}

/// Per-frame invariant check.
pub trait SnapshotGuard<C: Cell>: Send {
    /// Inspect the snapshot published at `frame`.
    ///
    /// # Errors
    ///
    /// Returns a guard violation ([`VizError::is_guard_violation`]) when the
    /// invariant does not hold.
    fn check(&mut self, frame: u64, cells: &[C]) -> VizResult<()>;
}

/// Ensures every snapshot is a permutation of the run's input.
#[derive(Debug, Clone)]
pub struct MultisetGuard<C> {
    expected: BTreeMap<i64, usize>,
    key: fn(&C) -> i64,
}

impl<C: Cell> MultisetGuard<C> {
    /// Record the multiset of `cells` under `key`.
    #[must_use]
    pub fn new(cells: &[C], key: fn(&C) -> i64) -> Self {
        Self {
            expected: histogram(cells, key),
            key,
        }
    }
}

impl<C: Cell + Send> SnapshotGuard<C> for MultisetGuard<C> {
    fn check(&mut self, frame: u64, cells: &[C]) -> VizResult<()> {
        let actual = histogram(cells, self.key);
        if actual == self.expected {
            return Ok(());
        }
        Err(VizError::MultisetChanged {
            frame,
            detail: describe_difference(&self.expected, &actual),
        })
    }
}

fn histogram<C>(cells: &[C], key: fn(&C) -> i64) -> BTreeMap<i64, usize> {
    let mut counts = BTreeMap::new();
    for cell in cells {
        *counts.entry(key(cell)).or_insert(0) += 1;
    }
    counts
}

fn describe_difference(expected: &BTreeMap<i64, usize>, actual: &BTreeMap<i64, usize>) -> String {
    for (value, &want) in expected {
        let got = actual.get(value).copied().unwrap_or(0);
        if got != want {
            return format!("value {value}: expected {want} copies, found {got}");
        }
    }
    for (value, &got) in actual {
        if !expected.contains_key(value) {
            return format!("value {value}: expected 0 copies, found {got}");
        }
    }
    "histograms differ".to_string()
}
