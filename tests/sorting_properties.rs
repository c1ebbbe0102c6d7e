use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use algoviz::engine::Change;
use algoviz::prelude::*;
use proptest::prelude::*;

fn histogram(values: impl IntoIterator<Item = i32>) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    counts
}

/// Play `algorithm` over `values` with every snapshot captured.
fn play(algorithm: SortAlgorithm, values: &[i32]) -> (SortingSession, Vec<Vec<Bar>>) {
    let mut session = SortingSession::new();
    session.set_input(values);
    let snapshots = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&snapshots);
    session.subscribe(move |change| {
        if let Change::Replaced { snapshot, .. } = change {
            sink.lock().unwrap().push(snapshot.to_vec());
        }
    });
    let outcome = session.start_sort(algorithm, Duration::ZERO);
    if !values.is_empty() {
        assert!(outcome.is_applied());
        session.run_to_completion(InstantPacer).unwrap();
    }
    let snapshots = snapshots.lock().unwrap().clone();
    (session, snapshots)
}

// H0: Some algorithm leaves the example input unsorted
// Falsification: sort [5,2,9,1,7] with each algorithm
#[test]
fn h0_1_example_input_sorted_by_every_algorithm() {
    for algorithm in SortAlgorithm::ALL {
        let (session, _) = play(algorithm, &[5, 2, 9, 1, 7]);
        let values: Vec<i32> = session.bars().iter().map(|b| b.value).collect();
        assert_eq!(values, vec![1, 2, 5, 7, 9], "{algorithm}");
        assert_eq!(session.log().next(), Some("All elements sorted"), "{algorithm}");
        assert!(!session.is_running());
    }
}

// H0: Edge-shaped inputs break an algorithm
// Falsification: empty, single, all-equal, sorted, reverse
#[test]
fn h0_2_edge_inputs() {
    let inputs: [Vec<i32>; 5] = [
        vec![],
        vec![8],
        vec![4; 7],
        (1..=9).collect(),
        (1..=9).rev().collect(),
    ];
    for algorithm in SortAlgorithm::ALL {
        for input in &inputs {
            let (session, _) = play(algorithm, input);
            let mut expected = input.clone();
            expected.sort_unstable();
            let got: Vec<i32> = session.bars().iter().map(|b| b.value).collect();
            assert_eq!(got, expected, "{algorithm} on {input:?}");
        }
    }
}

// H0: A run publishes a snapshot that is not a permutation of the input
// Falsification: capture every published snapshot during each run
#[test]
fn h0_3_every_snapshot_is_a_permutation() {
    let input = [9, 3, 3, 7, 1, 8, 2, 2, 6];
    let expected = histogram(input);
    for algorithm in SortAlgorithm::ALL {
        let (_, snapshots) = play(algorithm, &input);
        assert!(!snapshots.is_empty());
        for snapshot in snapshots {
            assert_eq!(histogram(snapshot.iter().map(|b| b.value)), expected, "{algorithm}");
        }
    }
}

// H0: The same input and algorithm can produce different runs
// Falsification: record the frames of two runs and compare
#[test]
fn h0_4_runs_are_deterministic() {
    let input = algoviz::sorting::random_values(42, 16, 50);
    for algorithm in SortAlgorithm::ALL {
        let frames = |values: &[i32]| {
            let mut session = SortingSession::new();
            session.set_input(values);
            session.start_sort(algorithm, Duration::ZERO);
            let mut frames = Vec::new();
            while let Some(frame) = session.advance().unwrap() {
                frames.push((frame.snapshot.to_vec(), frame.log_lines));
            }
            frames
        };
        assert_eq!(frames(&input), frames(&input), "{algorithm}");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Final order is a non-decreasing permutation, and the multiset holds
    // at every frame
    #[test]
    fn prop_sorted_permutation_at_every_frame(values in prop::collection::vec(-20i32..20, 0..24)) {
        let expected = histogram(values.iter().copied());
        for algorithm in SortAlgorithm::ALL {
            let (session, snapshots) = play(algorithm, &values);
            let got: Vec<i32> = session.bars().iter().map(|b| b.value).collect();
            prop_assert!(got.windows(2).all(|w| w[0] <= w[1]));
            prop_assert_eq!(histogram(got), expected.clone());
            for snapshot in snapshots {
                prop_assert_eq!(histogram(snapshot.iter().map(|b| b.value)), expected.clone());
            }
        }
    }

    // Merge and insertion sort keep equal values in input order
    #[test]
    fn prop_stability(values in prop::collection::vec(0i32..4, 0..24)) {
        for algorithm in [SortAlgorithm::Merge, SortAlgorithm::Insertion] {
            let (session, _) = play(algorithm, &values);
            for pair in session.bars().windows(2) {
                if pair[0].value == pair[1].value {
                    prop_assert!(pair[0].origin < pair[1].origin);
                }
            }
        }
    }
}
