//! Snapshot store.
//!
//! Holds the currently published collection of cells, the newest-first log
//! and the status line. Every mutation replaces the published snapshot as a
//! whole, so an observer can only ever see a fully formed collection.
//!
//! The store has a single writer: the session that owns it. Observers either
//! poll ([`SnapshotStore::version`], [`SnapshotStore::current`]) or register
//! a callback with [`SnapshotStore::subscribe`].

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use super::cell::Cell;

/// Change notification delivered to observers.
#[derive(Debug, Clone, PartialEq)]
pub enum Change<C> {
    /// The published collection was replaced.
    Replaced {
        /// New snapshot.
        snapshot: Arc<[C]>,
        /// Store version after the change.
        version: u64,
    },
    /// A line was prepended to the log.
    Logged(String),
    /// The log was emptied.
    LogCleared,
    /// The status line changed.
    Status(String),
}

/// Handle returned by [`SnapshotStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer<C> = Box<dyn FnMut(&Change<C>) + Send>;

/// Single-owner store of the published cell collection and run log.
pub struct SnapshotStore<C: Cell> {
    snapshot: Arc<[C]>,
    /// Newest entry at the front.
    log: VecDeque<String>,
    /// Optional cap on the log; the oldest lines are evicted beyond it.
    log_capacity: Option<usize>,
    status: String,
    version: u64,
    observers: Vec<(ObserverId, Observer<C>)>,
    next_observer: u64,
}

impl<C: Cell> SnapshotStore<C> {
    /// Create a store publishing `cells`, with an unbounded log.
    #[must_use]
    pub fn new(cells: Vec<C>) -> Self {
        Self {
            snapshot: cells.into(),
            log: VecDeque::new(),
            log_capacity: None,
            status: String::new(),
            version: 0,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    /// Cap the log at `capacity` lines (`None` = unbounded).
    #[must_use]
    pub fn with_log_capacity(mut self, capacity: Option<usize>) -> Self {
        self.log_capacity = capacity;
        self.trim_log();
        self
    }

    /// Latest published snapshot.
    #[must_use]
    pub fn current(&self) -> Arc<[C]> {
        Arc::clone(&self.snapshot)
    }

    /// Borrow the latest published snapshot.
    #[must_use]
    pub fn cells(&self) -> &[C] {
        &self.snapshot
    }

    /// Monotonic version; bumps on every snapshot replacement.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Log lines, newest first.
    pub fn log(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.log.iter().map(String::as_str)
    }

    /// Most recent log line.
    #[must_use]
    pub fn latest_log(&self) -> Option<&str> {
        self.log.front().map(String::as_str)
    }

    /// Number of log lines retained.
    #[must_use]
    pub fn log_len(&self) -> usize {
        self.log.len()
    }

    /// Current status line.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Atomically publish a new collection.
    pub fn replace(&mut self, cells: Vec<C>) {
        self.snapshot = cells.into();
        self.version += 1;
        trace!(version = self.version, len = self.snapshot.len(), "snapshot replaced");
        let change = Change::Replaced {
            snapshot: Arc::clone(&self.snapshot),
            version: self.version,
        };
        self.notify(&change);
    }

    /// Prepend a line to the log.
    pub fn append_log(&mut self, message: impl Into<String>) {
        let message = message.into();
        trace!(%message, "log");
        self.log.push_front(message.clone());
        self.trim_log();
        self.notify(&Change::Logged(message));
    }

    /// Empty the log.
    pub fn clear_log(&mut self) {
        self.log.clear();
        self.notify(&Change::LogCleared);
    }

    /// Replace the status line.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        let change = Change::Status(self.status.clone());
        self.notify(&change);
    }

    /// Register an observer; it is called after every change.
    pub fn subscribe(&mut self, observer: impl FnMut(&Change<C>) + Send + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer, _)| *observer != id);
        self.observers.len() != before
    }

    fn trim_log(&mut self) {
        if let Some(capacity) = self.log_capacity {
            self.log.truncate(capacity);
        }
    }

    fn notify(&mut self, change: &Change<C>) {
        for (_, observer) in &mut self.observers {
            observer(change);
        }
    }
}

impl<C: Cell> fmt::Debug for SnapshotStore<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotStore")
            .field("cells", &self.snapshot.len())
            .field("log", &self.log.len())
            .field("status", &self.status)
            .field("version", &self.version)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::{Bar, BarState};
    use std::sync::{Arc, Mutex};

    fn bars(values: &[i32]) -> Vec<Bar> {
        Bar::from_values(values)
    }

    #[test]
    fn test_replace_bumps_version() {
        let mut store = SnapshotStore::new(bars(&[1, 2]));
        assert_eq!(store.version(), 0);
        store.replace(bars(&[3]));
        assert_eq!(store.version(), 1);
        assert_eq!(store.cells().len(), 1);
        assert_eq!(store.cells()[0].value, 3);
    }

    #[test]
    fn test_snapshot_is_immutable_after_replace() {
        let mut store = SnapshotStore::new(bars(&[1, 2]));
        let before = store.current();
        store.replace(bars(&[9, 9, 9]));
        assert_eq!(before.len(), 2);
        assert_eq!(store.current().len(), 3);
    }

    #[test]
    fn test_log_newest_first() {
        let mut store = SnapshotStore::new(bars(&[]));
        store.append_log("first");
        store.append_log("second");
        store.append_log("third");
        let lines: Vec<&str> = store.log().collect();
        assert_eq!(lines, vec!["third", "second", "first"]);
        assert_eq!(store.latest_log(), Some("third"));
    }

    #[test]
    fn test_log_unbounded_by_default() {
        let mut store = SnapshotStore::new(bars(&[]));
        for i in 0..5_000 {
            store.append_log(format!("line {i}"));
        }
        assert_eq!(store.log_len(), 5_000);
    }

    #[test]
    fn test_log_capacity_evicts_oldest() {
        let mut store = SnapshotStore::new(bars(&[])).with_log_capacity(Some(2));
        store.append_log("a");
        store.append_log("b");
        store.append_log("c");
        let lines: Vec<&str> = store.log().collect();
        assert_eq!(lines, vec!["c", "b"]);
    }

    #[test]
    fn test_clear_log() {
        let mut store = SnapshotStore::new(bars(&[]));
        store.append_log("a");
        store.clear_log();
        assert_eq!(store.log_len(), 0);
        assert_eq!(store.latest_log(), None);
    }

    #[test]
    fn test_observers_receive_changes_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut store = SnapshotStore::new(bars(&[1]));
        let sink = Arc::clone(&seen);
        store.subscribe(move |change: &Change<Bar>| {
            let label = match change {
                Change::Replaced { version, .. } => format!("replaced:{version}"),
                Change::Logged(line) => format!("log:{line}"),
                Change::LogCleared => "cleared".to_string(),
                Change::Status(status) => format!("status:{status}"),
            };
            sink.lock().unwrap().push(label);
        });

        store.replace(bars(&[2]));
        store.append_log("hello");
        store.set_status("busy");
        store.clear_log();

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["replaced:1", "log:hello", "status:busy", "cleared"]
        );
    }

    #[test]
    fn test_replaced_snapshot_is_complete() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut store = SnapshotStore::new(bars(&[4, 5]));
        let sink = Arc::clone(&seen);
        store.subscribe(move |change: &Change<Bar>| {
            if let Change::Replaced { snapshot, .. } = change {
                sink.lock().unwrap().push(snapshot.clone());
            }
        });
        let mut next = bars(&[4, 5]);
        next[0].state = BarState::Comparing;
        store.replace(next);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].len(), 2);
        assert_eq!(seen[0][0].state, BarState::Comparing);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Arc::new(Mutex::new(0));
        let mut store = SnapshotStore::new(bars(&[]));
        let sink = Arc::clone(&count);
        let id = store.subscribe(move |_: &Change<Bar>| *sink.lock().unwrap() += 1);
        store.append_log("x");
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.append_log("y");
        assert_eq!(*count.lock().unwrap(), 1);
    }
}
