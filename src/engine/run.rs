//! Run replay and single-flight control.
//!
//! A [`Run`] is a pull-based iterator over the frames of one algorithm
//! execution. Each [`Run::advance`] applies the recorded steps up to the
//! next delay point to the snapshot store and returns the resulting
//! [`Frame`]. Nothing happens between pulls, so the caller fully controls
//! cadence.
//!
//! The [`RunController`] owns the store and enforces that at most one run
//! is active at a time. Once started, a run always plays out to its end.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::cell::{annotate, Cell};
use super::guard::SnapshotGuard;
use super::pacer::Pacer;
use super::step::{Delta, Frame, Step};
use super::store::{Change, ObserverId, SnapshotStore};
use crate::error::VizResult;

/// Why an operation was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// A run is in progress.
    RunActive,
    /// There is nothing to run on.
    EmptyInput,
    /// No editing mode is selected.
    NoMode,
    /// The addressed cell does not exist.
    OutOfBounds,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::RunActive => "a run is in progress",
            Self::EmptyInput => "input is empty",
            Self::NoMode => "no editing mode selected",
            Self::OutOfBounds => "cell is outside the grid",
        };
        f.write_str(text)
    }
}

/// Result of a user-facing operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The operation took effect.
    Applied,
    /// The operation was a silent no-op.
    Ignored(IgnoreReason),
    /// The operation was attempted but a precondition failed; the message
    /// is also published as the status line.
    PreconditionFailed(String),
}

impl Outcome {
    /// Whether the operation took effect.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// Whether the operation was ignored.
    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored(_))
    }
}

/// Single-flight flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunGate {
    running: bool,
    started: u64,
}

impl RunGate {
    /// Try to claim the gate. Returns false if a run is already active.
    pub fn try_begin(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.started += 1;
        true
    }

    /// Release the gate.
    pub fn finish(&mut self) {
        self.running = false;
    }

    /// Whether a run is active.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Number of runs started so far.
    #[must_use]
    pub const fn runs_started(&self) -> u64 {
        self.started
    }
}

/// Totals of a run played to completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Frames published.
    pub frames: u64,
    /// Sum of the pauses requested.
    pub paused: Duration,
}

/// Frame-by-frame replay of recorded steps.
pub struct Run<C: Cell> {
    label: String,
    steps: std::vec::IntoIter<Step<C>>,
    pause: Duration,
    frames: u64,
    finished: bool,
    guard: Option<Box<dyn SnapshotGuard<C>>>,
}

impl<C: Cell> Run<C> {
    /// Replay `steps`, holding each frame for `pause`.
    #[must_use]
    pub fn new(label: impl Into<String>, steps: Vec<Step<C>>, pause: Duration) -> Self {
        Self {
            label: label.into(),
            steps: steps.into_iter(),
            pause,
            frames: 0,
            finished: false,
            guard: None,
        }
    }

    /// Check every frame with `guard`.
    #[must_use]
    pub fn with_guard(mut self, guard: impl SnapshotGuard<C> + 'static) -> Self {
        self.guard = Some(Box::new(guard));
        self
    }

    /// Human-readable name of the algorithm being replayed.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Frames emitted so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Whether every step has been applied.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Apply steps up to the next delay point and return the frame.
    ///
    /// Returns `Ok(None)` once the run is exhausted.
    ///
    /// # Errors
    ///
    /// Returns a guard violation if the published snapshot breaks an
    /// invariant; the run is then finished.
    pub fn advance(&mut self, store: &mut SnapshotStore<C>) -> VizResult<Option<Frame<C>>> {
        if self.finished {
            return Ok(None);
        }

        let mut log_lines = Vec::new();
        let mut status = None;
        let mut deltas = Vec::new();
        let mut applied = 0usize;
        let mut pause = Duration::ZERO;

        loop {
            let Some(step) = self.steps.next() else {
                self.finished = true;
                break;
            };
            applied += 1;
            match step {
                Step::Annotate {
                    positions,
                    annotation,
                } => {
                    let mut cells = store.cells().to_vec();
                    for position in annotate(&mut cells, positions, annotation) {
                        deltas.push(Delta::Annotated {
                            position,
                            annotation,
                        });
                    }
                    store.replace(cells);
                }
                Step::Swap { a, b } => {
                    let mut cells = store.cells().to_vec();
                    if a < cells.len() && b < cells.len() {
                        cells.swap(a, b);
                        deltas.push(Delta::Swapped { a, b });
                        store.replace(cells);
                    }
                }
                Step::Write { position, cell } => {
                    let mut cells = store.cells().to_vec();
                    if let Some(slot) = cells.get_mut(position) {
                        *slot = cell;
                        deltas.push(Delta::Written { position });
                        store.replace(cells);
                    }
                }
                Step::Log(line) => {
                    store.append_log(line.clone());
                    log_lines.push(line);
                }
                Step::Status(line) => {
                    store.set_status(line.clone());
                    store.append_log(line.clone());
                    log_lines.push(line.clone());
                    status = Some(line);
                }
                Step::Pause => {
                    pause = self.pause;
                    self.finished = self.steps.as_slice().is_empty();
                    break;
                }
            }
        }

        if applied == 0 {
            return Ok(None);
        }

        let frame = Frame {
            index: self.frames,
            snapshot: store.current(),
            log_lines,
            status,
            deltas,
            pause,
            is_final: self.finished,
        };
        self.frames += 1;

        if let Some(guard) = self.guard.as_mut() {
            if let Err(violation) = guard.check(frame.index, &frame.snapshot) {
                error!(run = %self.label, frame = frame.index, %violation, "guard stopped the run");
                self.finished = true;
                return Err(violation);
            }
        }

        Ok(Some(frame))
    }
}

impl<C: Cell> fmt::Debug for Run<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Run")
            .field("label", &self.label)
            .field("remaining_steps", &self.steps.len())
            .field("pause", &self.pause)
            .field("frames", &self.frames)
            .field("finished", &self.finished)
            .field("guarded", &self.guard.is_some())
            .finish()
    }
}

/// Owns the snapshot store and the single active run.
#[derive(Debug)]
pub struct RunController<C: Cell> {
    store: SnapshotStore<C>,
    gate: RunGate,
    active: Option<Run<C>>,
}

impl<C: Cell> RunController<C> {
    /// Wrap a store; no run is active.
    #[must_use]
    pub fn new(store: SnapshotStore<C>) -> Self {
        Self {
            store,
            gate: RunGate::default(),
            active: None,
        }
    }

    /// Read access to the store.
    #[must_use]
    pub const fn store(&self) -> &SnapshotStore<C> {
        &self.store
    }

    /// Whether a run is active.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.gate.is_running()
    }

    /// Number of runs started so far.
    #[must_use]
    pub const fn runs_started(&self) -> u64 {
        self.gate.runs_started()
    }

    /// Register a store observer. Allowed at any time: observers only read.
    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&Change<C>) + Send + 'static,
    ) -> ObserverId {
        self.store.subscribe(observer)
    }

    /// Remove a store observer.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Mutate the store outside of a run.
    ///
    /// Ignored while a run is active: only the run may write then.
    pub fn edit(&mut self, f: impl FnOnce(&mut SnapshotStore<C>)) -> Outcome {
        if self.gate.is_running() {
            return Outcome::Ignored(IgnoreReason::RunActive);
        }
        f(&mut self.store);
        Outcome::Applied
    }

    /// Make `run` the active run.
    pub fn begin(&mut self, run: Run<C>) -> Outcome {
        if !self.gate.try_begin() {
            return Outcome::Ignored(IgnoreReason::RunActive);
        }
        debug!(run = run.label(), "run started");
        self.active = Some(run);
        Outcome::Applied
    }

    /// Pull the next frame of the active run.
    ///
    /// Returns `Ok(None)` when no run is active. The gate is released as
    /// soon as the final frame has been published.
    ///
    /// # Errors
    ///
    /// Returns the guard violation that stopped the run.
    pub fn advance(&mut self) -> VizResult<Option<Frame<C>>> {
        let Some(run) = self.active.as_mut() else {
            return Ok(None);
        };
        let result = run.advance(&mut self.store);
        let done = run.is_finished();
        if done {
            let frames = run.frames();
            debug!(run = run.label(), frames, "run finished");
            self.active = None;
            self.gate.finish();
        }
        result
    }

    /// Play the active run to its end, pausing after every frame.
    ///
    /// # Errors
    ///
    /// Returns the guard violation that stopped the run.
    pub fn run_to_completion(&mut self, mut pacer: impl Pacer) -> VizResult<RunSummary> {
        let mut summary = RunSummary::default();
        while let Some(frame) = self.advance()? {
            summary.frames += 1;
            summary.paused += frame.pause;
            pacer.pause(frame.pause);
        }
        Ok(summary)
    }
}
