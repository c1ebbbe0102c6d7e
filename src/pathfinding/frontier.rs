//! Distance-ordered frontier with deterministic ordering.
//!
//! A min-heap that ensures:
//! - Cells come out in distance order
//! - Ties are broken by insertion order (sequence number)
//! - Stale entries are left in place and skipped by the caller

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A queued cell with its tentative distance.
#[derive(Debug, Clone, Copy)]
pub struct QueuedCell {
    /// Tentative distance from the Start.
    pub distance: u32,
    /// Sequence number for deterministic tie-breaking.
    pub sequence: u64,
    /// Flat cell index.
    pub index: usize,
}

// min-heap by distance, then sequence
impl PartialEq for QueuedCell {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance && self.sequence == other.sequence
    }
}

impl Eq for QueuedCell {}

impl PartialOrd for QueuedCell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedCell {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.distance.cmp(&other.distance) {
            Ordering::Equal => self.sequence.cmp(&other.sequence),
            ord => ord,
        }
    }
}

/// Priority-ordered cell queue.
#[derive(Debug, Default)]
pub struct Frontier {
    /// Min-heap ordered by (distance, sequence).
    queue: BinaryHeap<Reverse<QueuedCell>>,
    /// Monotonic sequence counter for tie-breaking.
    sequence: u64,
}

impl Frontier {
    /// Create an empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `index` at `distance`.
    pub fn push(&mut self, index: usize, distance: u32) {
        let sequence = self.sequence;
        self.sequence += 1;
        self.queue.push(Reverse(QueuedCell {
            distance,
            sequence,
            index,
        }));
    }

    /// Remove the closest cell.
    pub fn pop(&mut self) -> Option<QueuedCell> {
        self.queue.pop().map(|Reverse(cell)| cell)
    }

    /// Number of queued entries, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
