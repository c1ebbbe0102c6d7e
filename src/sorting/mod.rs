//! Sorting engine.
//!
//! Five textbook algorithms replayed over a row of [`Bar`]s. Each algorithm
//! records, at every comparison, exchange and pivot selection: the
//! annotation of the bars involved, a log line, and a delay point. Touched
//! bars return to `Default` unless they are permanently `Sorted`.
//!
//! | Algorithm | Stable | Notes |
//! |-----------|--------|-------|
//! | Bubble    | no*    | early exit after a pass without exchange |
//! | Selection | no     | running minimum marked `Pivot` |
//! | Insertion | yes    | one exchange per shift |
//! | Merge     | yes    | `<=` favors the left half |
//! | Quick     | no     | Lomuto partition, last element as pivot |
//!
//! (*) Bubble sort never exchanges equal values, but stability is not
//! part of its contract here.

mod bubble;
mod input;
mod insertion;
mod merge;
mod quick;
mod selection;
pub mod session;

pub use input::{random_input, random_values};
pub use session::SortingSession;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::engine::{Cell, Step, StepEmitter};

/// Annotation of a bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarState {
    /// Not involved in the current step.
    #[default]
    Default,
    /// Being compared.
    Comparing,
    /// Being exchanged or shifted.
    Swapping,
    /// Pivot, running minimum, or element being inserted.
    Pivot,
    /// In its final position.
    Sorted,
}

/// One array element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bar {
    /// Value being sorted.
    pub value: i32,
    /// Current annotation.
    pub state: BarState,
    /// Index of this element in the submitted input.
    pub origin: usize,
}

impl Bar {
    /// Create an unannotated bar.
    #[must_use]
    pub const fn new(value: i32, origin: usize) -> Self {
        Self {
            value,
            state: BarState::Default,
            origin,
        }
    }

    /// One bar per value, `origin` set to the input index.
    #[must_use]
    pub fn from_values(values: &[i32]) -> Vec<Self> {
        values
            .iter()
            .enumerate()
            .map(|(origin, &value)| Self::new(value, origin))
            .collect()
    }
}

impl Cell for Bar {
    type Annotation = BarState;

    fn annotation(&self) -> BarState {
        self.state
    }

    fn set_annotation(&mut self, annotation: BarState) {
        self.state = annotation;
    }
}

/// Available sorting algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortAlgorithm {
    /// Bubble sort.
    Bubble,
    /// Selection sort.
    Selection,
    /// Insertion sort.
    Insertion,
    /// Merge sort.
    Merge,
    /// Quick sort.
    Quick,
}

impl SortAlgorithm {
    /// All algorithms, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Bubble,
        Self::Selection,
        Self::Insertion,
        Self::Merge,
        Self::Quick,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Selection => "Selection Sort",
            Self::Insertion => "Insertion Sort",
            Self::Merge => "Merge Sort",
            Self::Quick => "Quick Sort",
        }
    }

    /// Whether equal values keep their relative order.
    #[must_use]
    pub const fn is_stable(self) -> bool {
        matches!(self, Self::Insertion | Self::Merge)
    }

    /// Run the algorithm over `bars` and return the recorded steps.
    ///
    /// Any leftover annotation from a previous run is cleared first.
    #[must_use]
    pub fn record(self, bars: Vec<Bar>) -> Vec<Step<Bar>> {
        let stale: Vec<usize> = bars
            .iter()
            .enumerate()
            .filter(|(_, bar)| bar.state != BarState::Default)
            .map(|(i, _)| i)
            .collect();
        let mut emitter = StepEmitter::new(bars);
        emitter.set_annotations(stale, BarState::Default);

        match self {
            Self::Bubble => bubble::record(&mut emitter),
            Self::Selection => selection::record(&mut emitter),
            Self::Insertion => insertion::record(&mut emitter),
            Self::Merge => merge::record(&mut emitter),
            Self::Quick => quick::record(&mut emitter),
        }
        mark_all_sorted(&mut emitter);

        emitter.finish().1
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sorting algorithm '{0}' (expected bubble, selection, insertion, merge or quick)")]
pub struct UnknownSortAlgorithm(pub String);

impl FromStr for SortAlgorithm {
    type Err = UnknownSortAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let key = normalized.strip_suffix(" sort").unwrap_or(&normalized);
        match key {
            "bubble" => Ok(Self::Bubble),
            "selection" => Ok(Self::Selection),
            "insertion" => Ok(Self::Insertion),
            "merge" => Ok(Self::Merge),
            "quick" => Ok(Self::Quick),
            _ => Err(UnknownSortAlgorithm(s.to_string())),
        }
    }
}

/// Completion: every bar `Sorted`, then the completion line.
fn mark_all_sorted(e: &mut StepEmitter<Bar>) {
    e.set_annotations(0..e.len(), BarState::Sorted);
    e.log("All elements sorted");
}

/// Return touched bars to `Default`, leaving `Sorted` ones alone.
fn release(e: &mut StepEmitter<Bar>, positions: impl IntoIterator<Item = usize>) {
    let positions: Vec<usize> = positions
        .into_iter()
        .filter(|&i| e.cells().get(i).is_some_and(|bar| bar.state != BarState::Sorted))
        .collect();
    e.set_annotations(positions, BarState::Default);
}

/// Value at `i` in the working copy.
fn value(e: &StepEmitter<Bar>, i: usize) -> i32 {
    e.cells()[i].value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{RunController, SnapshotStore};

    /// Replay every step of `algorithm` over `values`; returns the final bars.
    pub(crate) fn sorted_by(algorithm: SortAlgorithm, values: &[i32]) -> Vec<Bar> {
        let steps = algorithm.record(Bar::from_values(values));
        let mut emitter = StepEmitter::new(Bar::from_values(values));
        for step in steps {
            match step {
                Step::Annotate {
                    positions,
                    annotation,
                } => emitter.set_annotations(positions, annotation),
                Step::Swap { a, b } => emitter.swap(a, b),
                Step::Write { position, cell } => emitter.write(position, cell),
                Step::Log(_) | Step::Status(_) | Step::Pause => {}
            }
        }
        emitter.finish().0
    }

    fn values(bars: &[Bar]) -> Vec<i32> {
        bars.iter().map(|b| b.value).collect()
    }

    #[test]
    fn test_every_algorithm_sorts_example() {
        for algorithm in SortAlgorithm::ALL {
            let bars = sorted_by(algorithm, &[5, 2, 9, 1, 7]);
            assert_eq!(values(&bars), vec![1, 2, 5, 7, 9], "{algorithm}");
            assert!(bars.iter().all(|b| b.state == BarState::Sorted), "{algorithm}");
        }
    }

    #[test]
    fn test_edge_inputs() {
        let cases: [&[i32]; 6] = [
            &[],
            &[42],
            &[3, 3, 3, 3],
            &[1, 2, 3, 4, 5],
            &[5, 4, 3, 2, 1],
            &[-3, 0, -3, 7, i32::MIN, i32::MAX],
        ];
        for algorithm in SortAlgorithm::ALL {
            for case in cases {
                let mut expected = case.to_vec();
                expected.sort_unstable();
                assert_eq!(values(&sorted_by(algorithm, case)), expected, "{algorithm} {case:?}");
            }
        }
    }

    #[test]
    fn test_last_log_is_completion() {
        for algorithm in SortAlgorithm::ALL {
            let steps = algorithm.record(Bar::from_values(&[2, 1]));
            let last_log = steps.iter().rev().find_map(|s| match s {
                Step::Log(line) => Some(line.as_str()),
                _ => None,
            });
            assert_eq!(last_log, Some("All elements sorted"), "{algorithm}");
        }
    }

    #[test]
    fn test_record_clears_stale_annotations() {
        let mut bars = Bar::from_values(&[2, 1]);
        bars[0].state = BarState::Sorted;
        let steps = SortAlgorithm::Bubble.record(bars);
        assert_eq!(
            steps[0],
            Step::Annotate {
                positions: vec![0],
                annotation: BarState::Default,
            }
        );
    }

    #[test]
    fn test_algorithm_names_and_parsing() {
        for algorithm in SortAlgorithm::ALL {
            assert_eq!(algorithm.name().parse::<SortAlgorithm>(), Ok(algorithm));
            assert_eq!(algorithm.to_string(), algorithm.name());
        }
        assert_eq!("  QUICK ".parse::<SortAlgorithm>(), Ok(SortAlgorithm::Quick));
        assert_eq!("merge".parse::<SortAlgorithm>(), Ok(SortAlgorithm::Merge));
        let err = "bogo".parse::<SortAlgorithm>().unwrap_err();
        assert!(err.to_string().contains("bogo"));
    }

    #[test]
    fn test_stability_flags() {
        assert!(SortAlgorithm::Merge.is_stable());
        assert!(SortAlgorithm::Insertion.is_stable());
        assert!(!SortAlgorithm::Quick.is_stable());
        assert!(!SortAlgorithm::Selection.is_stable());
        assert!(!SortAlgorithm::Bubble.is_stable());
    }

    #[test]
    fn test_algorithm_serde() {
        let json = serde_json::to_string(&SortAlgorithm::Insertion).expect("serialize");
        assert_eq!(json, "\"insertion\"");
    }

    #[test]
    fn test_replay_matches_recording() {
        let steps = SortAlgorithm::Quick.record(Bar::from_values(&[4, 1, 3]));
        let mut controller = RunController::new(SnapshotStore::new(Bar::from_values(&[4, 1, 3])));
        assert!(controller
            .begin(crate::engine::Run::new("quick", steps, std::time::Duration::ZERO))
            .is_applied());
        controller
            .run_to_completion(crate::engine::InstantPacer)
            .expect("no guard");
        assert_eq!(values(controller.store().cells()), vec![1, 3, 4]);
    }
}
