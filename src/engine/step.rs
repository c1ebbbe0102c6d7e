//! Recorded steps and the frames they are replayed into.
//!
//! A [`Step`] is one primitive transition recorded by the
//! [`StepEmitter`](super::emitter::StepEmitter). A [`Frame`] groups the
//! steps between two delay points: it is what an observer sees while the
//! run is paused.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::cell::Cell;

/// One primitive transition of a run.
#[derive(Debug, Clone, PartialEq)]
pub enum Step<C: Cell> {
    /// Overwrite the annotation of every listed position.
    Annotate {
        /// Positions to annotate (already clamped to the valid range).
        positions: Vec<usize>,
        /// Annotation to apply.
        annotation: C::Annotation,
    },
    /// Exchange two cells.
    Swap {
        /// First position.
        a: usize,
        /// Second position.
        b: usize,
    },
    /// Replace the cell at a position.
    Write {
        /// Target position.
        position: usize,
        /// New cell.
        cell: C,
    },
    /// Prepend a line to the log.
    Log(String),
    /// Replace the status line (and log it).
    Status(String),
    /// Delay point: end of the current frame.
    Pause,
}

/// Structural change carried by a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delta<A> {
    /// A position received a new annotation.
    Annotated {
        /// Position.
        position: usize,
        /// New annotation.
        annotation: A,
    },
    /// Two positions exchanged their cells.
    Swapped {
        /// First position.
        a: usize,
        /// Second position.
        b: usize,
    },
    /// A position was overwritten.
    Written {
        /// Position.
        position: usize,
    },
}

/// One externally observable beat of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<C: Cell> {
    /// Zero-based frame index within the run.
    pub index: u64,
    /// Snapshot visible for the duration of the pause.
    pub snapshot: Arc<[C]>,
    /// Log lines emitted during this frame, oldest first.
    pub log_lines: Vec<String>,
    /// Status line, if it changed during this frame.
    pub status: Option<String>,
    /// Structural changes, in emission order.
    pub deltas: Vec<Delta<C::Annotation>>,
    /// How long the driver should hold this frame.
    pub pause: Duration,
    /// No frame follows this one.
    pub is_final: bool,
}

impl<C: Cell> Frame<C> {
    /// Last log line of this frame, if any.
    #[must_use]
    pub fn last_log(&self) -> Option<&str> {
        self.log_lines.last().map(String::as_str)
    }

    /// Whether this frame ends the run.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        self.is_final
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::{Bar, BarState};

    #[test]
    fn test_delta_serialization() {
        let delta = Delta::Annotated {
            position: 3,
            annotation: BarState::Pivot,
        };
        let json = serde_json::to_string(&delta).expect("serialize");
        assert!(json.contains("Annotated"));
        assert!(json.contains("Pivot"));
        let back: Delta<BarState> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, delta);
    }

    #[test]
    fn test_frame_last_log_and_final() {
        let frame: Frame<Bar> = Frame {
            index: 0,
            snapshot: Bar::from_values(&[1]).into(),
            log_lines: vec!["a".to_string(), "b".to_string()],
            status: None,
            deltas: Vec::new(),
            pause: Duration::ZERO,
            is_final: false,
        };
        assert_eq!(frame.last_log(), Some("b"));
        assert!(!frame.is_final());
    }
}
