//! Interactive sorting session.
//!
//! Owns the bar store and the single-flight controller. Every operation
//! reports an [`Outcome`] instead of failing.

use std::time::Duration;

use tracing::{debug, warn};

use super::{Bar, SortAlgorithm};
use crate::config::VizConfig;
use crate::engine::{
    Change, Frame, IgnoreReason, MultisetGuard, ObserverId, Outcome, Pacer, Run, RunController,
    RunSummary, SnapshotStore,
};
use crate::error::VizResult;

/// Sorting engine state plus the active run, if any.
#[derive(Debug)]
pub struct SortingSession {
    controller: RunController<Bar>,
    step_delay: Duration,
    guard: bool,
}

impl Default for SortingSession {
    fn default() -> Self {
        Self::with_config(&VizConfig::default())
    }
}

impl SortingSession {
    /// Empty session with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty session using the delay, log and guard settings of `config`.
    #[must_use]
    pub fn with_config(config: &VizConfig) -> Self {
        let store = SnapshotStore::new(Vec::new()).with_log_capacity(config.log.capacity);
        Self {
            controller: RunController::new(store),
            step_delay: config.sorting.step_delay(),
            guard: config.guard.enabled,
        }
    }

    /// Replace the input and clear the log.
    pub fn set_input(&mut self, values: &[i32]) -> Outcome {
        let outcome = self.controller.edit(|store| {
            store.replace(Bar::from_values(values));
            store.clear_log();
        });
        match outcome {
            Outcome::Applied => debug!(len = values.len(), "input replaced"),
            ref other => warn!(?other, "set_input ignored"),
        }
        outcome
    }

    /// Start `algorithm` with the configured delay.
    pub fn start(&mut self, algorithm: SortAlgorithm) -> Outcome {
        self.start_sort(algorithm, self.step_delay)
    }

    /// Start `algorithm`, holding each frame for `step_delay`.
    ///
    /// Ignored while a run is active or when there is no input.
    pub fn start_sort(&mut self, algorithm: SortAlgorithm, step_delay: Duration) -> Outcome {
        if self.controller.is_running() {
            warn!(%algorithm, "start ignored: run active");
            return Outcome::Ignored(IgnoreReason::RunActive);
        }
        let bars = self.controller.store().cells().to_vec();
        if bars.is_empty() {
            warn!(%algorithm, "start ignored: empty input");
            return Outcome::Ignored(IgnoreReason::EmptyInput);
        }

        let guard = self
            .guard
            .then(|| MultisetGuard::new(&bars, |bar: &Bar| i64::from(bar.value)));
        let steps = algorithm.record(bars);
        debug!(%algorithm, steps = steps.len(), ?step_delay, "sort recorded");

        let mut run = Run::new(algorithm.name(), steps, step_delay);
        if let Some(guard) = guard {
            run = run.with_guard(guard);
        }
        self.controller.begin(run)
    }

    /// Pull the next frame of the active run.
    ///
    /// # Errors
    ///
    /// Returns the guard violation that stopped the run.
    pub fn advance(&mut self) -> VizResult<Option<Frame<Bar>>> {
        self.controller.advance()
    }

    /// Play the active run to its end.
    ///
    /// # Errors
    ///
    /// Returns the guard violation that stopped the run.
    pub fn run_to_completion(&mut self, pacer: impl Pacer) -> VizResult<RunSummary> {
        self.controller.run_to_completion(pacer)
    }

    /// Append a free-form line to the log. Ignored while a run is active.
    pub fn post_log(&mut self, message: impl Into<String>) -> Outcome {
        let message = message.into();
        self.controller.edit(|store| store.append_log(message))
    }

    /// Current bars.
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        self.controller.store().cells()
    }

    /// Whether a run is active.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.controller.is_running()
    }

    /// Log lines, newest first.
    pub fn log(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.controller.store().log()
    }

    /// Current status line.
    #[must_use]
    pub fn status(&self) -> &str {
        self.controller.store().status()
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &SnapshotStore<Bar> {
        self.controller.store()
    }

    /// Configured per-frame delay.
    #[must_use]
    pub const fn step_delay(&self) -> Duration {
        self.step_delay
    }

    /// Observe store changes.
    pub fn subscribe(&mut self, observer: impl FnMut(&Change<Bar>) + Send + 'static) -> ObserverId {
        self.controller.subscribe(observer)
    }

    /// Stop observing.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.controller.unsubscribe(id)
    }
}
