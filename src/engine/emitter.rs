//! Step emitter: the unit of observable progress.
//!
//! Algorithms never touch the snapshot store directly. They drive a
//! `StepEmitter` that keeps a private working copy of the cells (so the
//! algorithm can read values as it goes) and records every transition as a
//! [`Step`]. The recorded steps are later replayed frame by frame by a
//! [`Run`](super::run::Run).
//!
//! The emitter never decides when to pause: callers insert
//! [`StepEmitter::delay`] where the animation should hold.

use tracing::trace;

use super::cell::{annotate, Cell};
use super::step::Step;

/// Records the transitions of one algorithm run.
#[derive(Debug, Clone)]
pub struct StepEmitter<C: Cell> {
    cells: Vec<C>,
    steps: Vec<Step<C>>,
}

impl<C: Cell> StepEmitter<C> {
    /// Start recording over `cells`.
    #[must_use]
    pub fn new(cells: Vec<C>) -> Self {
        Self {
            cells,
            steps: Vec::new(),
        }
    }

    /// Working copy, reflecting every step recorded so far.
    #[must_use]
    pub fn cells(&self) -> &[C] {
        &self.cells
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Steps recorded so far.
    #[must_use]
    pub fn steps(&self) -> &[Step<C>] {
        &self.steps
    }

    /// Overwrite the annotation of every valid position.
    ///
    /// Invalid positions are silently dropped; if none is valid nothing is
    /// recorded.
    pub fn set_annotations(
        &mut self,
        positions: impl IntoIterator<Item = usize>,
        annotation: C::Annotation,
    ) {
        let positions = annotate(&mut self.cells, positions, annotation);
        if positions.is_empty() {
            return;
        }
        trace!(?positions, ?annotation, "annotate");
        self.steps.push(Step::Annotate {
            positions,
            annotation,
        });
    }

    /// Exchange two cells. Ignored if either position is out of range.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a >= self.cells.len() || b >= self.cells.len() {
            return;
        }
        self.cells.swap(a, b);
        self.steps.push(Step::Swap { a, b });
    }

    /// Overwrite a cell. Ignored if the position is out of range.
    pub fn write(&mut self, position: usize, cell: C) {
        let Some(slot) = self.cells.get_mut(position) else {
            return;
        };
        *slot = cell.clone();
        self.steps.push(Step::Write { position, cell });
    }

    /// Record a log line.
    pub fn log(&mut self, message: impl Into<String>) {
        self.steps.push(Step::Log(message.into()));
    }

    /// Record a status change (also logged on replay).
    pub fn status(&mut self, message: impl Into<String>) {
        self.steps.push(Step::Status(message.into()));
    }

    /// Record a delay point.
    pub fn delay(&mut self) {
        self.steps.push(Step::Pause);
    }

    /// Stop recording; returns the final working copy and the steps.
    #[must_use]
    pub fn finish(self) -> (Vec<C>, Vec<Step<C>>) {
        (self.cells, self.steps)
    }
}
