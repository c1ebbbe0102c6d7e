//! Interactive pathfinding session: grid editing plus searches.

use std::time::Duration;

use tracing::{debug, warn};

use super::grid::{apply_tap, GridMode, GridShape, Node};
use super::{clear_visits, PathfindingAlgorithm, TerminalGuard, Terminals};
use crate::config::VizConfig;
use crate::engine::{
    Change, Frame, IgnoreReason, ObserverId, Outcome, Pacer, Run, RunController, RunSummary,
    SnapshotStore,
};
use crate::error::VizResult;

/// Grid, editing mode, and the active search, if any.
#[derive(Debug)]
pub struct PathfindingSession {
    controller: RunController<Node>,
    shape: GridShape,
    mode: GridMode,
    step_delay: Duration,
    guard: bool,
}

impl Default for PathfindingSession {
    fn default() -> Self {
        Self::with_config(&VizConfig::default())
    }
}

impl PathfindingSession {
    /// 10×10 grid with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grid sized and paced by `config`.
    #[must_use]
    pub fn with_config(config: &VizConfig) -> Self {
        let shape = GridShape::new(config.pathfinding.rows, config.pathfinding.cols);
        let store = SnapshotStore::new(shape.blank()).with_log_capacity(config.log.capacity);
        Self {
            controller: RunController::new(store),
            shape,
            mode: GridMode::None,
            step_delay: config.pathfinding.step_delay(),
            guard: config.guard.enabled,
        }
    }

    /// Select what taps do. Ignored while a run is active.
    pub fn set_mode(&mut self, mode: GridMode) -> Outcome {
        if self.controller.is_running() {
            warn!(?mode, "set_mode ignored: run active");
            return Outcome::Ignored(IgnoreReason::RunActive);
        }
        self.mode = mode;
        Outcome::Applied
    }

    /// Apply the current mode to `(row, col)`.
    pub fn on_cell_tapped(&mut self, row: usize, col: usize) -> Outcome {
        if self.controller.is_running() {
            warn!(row, col, "tap ignored: run active");
            return Outcome::Ignored(IgnoreReason::RunActive);
        }
        let Some(index) = self.shape.index(row, col) else {
            warn!(row, col, "tap ignored: outside grid");
            return Outcome::Ignored(IgnoreReason::OutOfBounds);
        };
        if self.mode == GridMode::None {
            return Outcome::Ignored(IgnoreReason::NoMode);
        }
        let mode = self.mode;
        self.controller.edit(|store| {
            let mut cells = store.cells().to_vec();
            if apply_tap(&mut cells, index, mode) {
                store.replace(cells);
            }
        })
    }

    /// Reset the grid, status and log.
    pub fn clear_grid(&mut self) -> Outcome {
        let blank = self.shape.blank();
        let outcome = self.controller.edit(|store| {
            store.replace(blank);
            store.set_status("");
            store.clear_log();
        });
        if outcome.is_applied() {
            debug!(rows = self.shape.rows, cols = self.shape.cols, "grid cleared");
        }
        outcome
    }

    /// Search with the configured delay.
    pub fn run(&mut self, algorithm: PathfindingAlgorithm) -> Outcome {
        self.run_pathfinding(algorithm, self.step_delay)
    }

    /// Start `algorithm`, holding each frame for `step_delay`.
    ///
    /// Previous visit marks are cleared and `Starting <name>...` is
    /// published first. If the Start or End is missing, the status names
    /// it and no search runs.
    pub fn run_pathfinding(&mut self, algorithm: PathfindingAlgorithm, step_delay: Duration) -> Outcome {
        let starting = format!("Starting {}...", algorithm.name());
        let mut located = None;
        let outcome = self.controller.edit(|store| {
            let mut cells = store.cells().to_vec();
            if clear_visits(&mut cells) {
                store.replace(cells);
            }
            store.set_status(starting.clone());
            store.append_log(starting);
            let terminals = Terminals::locate(store.cells());
            if let Err(missing) = &terminals {
                store.set_status(missing.to_string());
                store.append_log(missing.to_string());
            }
            located = Some(terminals);
        });
        let Some(located) = located else {
            warn!(%algorithm, "run ignored: run active");
            return outcome;
        };
        let terminals = match located {
            Ok(terminals) => terminals,
            Err(missing) => {
                let message = missing.to_string();
                warn!(%algorithm, %message, "run not started");
                return Outcome::PreconditionFailed(message);
            }
        };

        let cells = self.controller.store().cells().to_vec();
        let steps = algorithm.record(self.shape, cells, terminals);
        debug!(%algorithm, steps = steps.len(), ?step_delay, "search recorded");
        let mut run = Run::new(algorithm.name(), steps, step_delay);
        if self.guard {
            run = run.with_guard(TerminalGuard);
        }
        self.controller.begin(run)
    }

    /// Pull the next frame of the active search.
    ///
    /// # Errors
    ///
    /// Returns the guard violation that stopped the run.
    pub fn advance(&mut self) -> VizResult<Option<Frame<Node>>> {
        self.controller.advance()
    }

    /// Play the active search to its end.
    ///
    /// # Errors
    ///
    /// Returns the guard violation that stopped the run.
    pub fn run_to_completion(&mut self, pacer: impl Pacer) -> VizResult<RunSummary> {
        self.controller.run_to_completion(pacer)
    }

    /// Grid cells, row-major.
    #[must_use]
    pub fn cells(&self) -> &[Node] {
        self.controller.store().cells()
    }

    /// Cell at `(row, col)`.
    #[must_use]
    pub fn node(&self, row: usize, col: usize) -> Option<&Node> {
        self.shape.index(row, col).and_then(|i| self.cells().get(i))
    }

    /// Grid dimensions.
    #[must_use]
    pub const fn shape(&self) -> GridShape {
        self.shape
    }

    /// Current editing mode.
    #[must_use]
    pub const fn mode(&self) -> GridMode {
        self.mode
    }

    /// Whether a search is active.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.controller.is_running()
    }

    /// Current status line.
    #[must_use]
    pub fn status(&self) -> &str {
        self.controller.store().status()
    }

    /// Log lines, newest first.
    pub fn log(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.controller.store().log()
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &SnapshotStore<Node> {
        self.controller.store()
    }

    /// Configured per-frame delay.
    #[must_use]
    pub const fn step_delay(&self) -> Duration {
        self.step_delay
    }

    /// Observe store changes.
    pub fn subscribe(&mut self, observer: impl FnMut(&Change<Node>) + Send + 'static) -> ObserverId {
        self.controller.subscribe(observer)
    }

    /// Stop observing.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.controller.unsubscribe(id)
    }
}
