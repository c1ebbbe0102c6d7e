//! Bubble sort: adjacent compare-and-swap passes, largest value settling last.

use super::{release, value, Bar, BarState};
use crate::engine::StepEmitter;

pub(super) fn record(e: &mut StepEmitter<Bar>) {
    let n = e.len();
    for i in 0..n {
        let mut swapped = false;
        for j in 0..n - i - 1 {
            e.set_annotations([j, j + 1], BarState::Comparing);
            e.log(format!(
                "Comparing array[{j}]={} with array[{}]={}",
                value(e, j),
                j + 1,
                value(e, j + 1)
            ));
            e.delay();
            if value(e, j) > value(e, j + 1) {
                e.set_annotations([j, j + 1], BarState::Swapping);
                e.log(format!("Swapping array[{j}] and array[{}]", j + 1));
                e.delay();
                e.swap(j, j + 1);
                swapped = true;
                e.delay();
            }
            release(e, [j, j + 1]);
        }
        let last = n - i - 1;
        e.set_annotations([last], BarState::Sorted);
        e.log(format!("array[{last}] placed (sorted)"));
        if !swapped {
            break;
        }
    }
}
