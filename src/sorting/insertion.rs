//! Insertion sort. Each shift is an exchange of the key with its larger
//! predecessor, so the key walks left one slot per step.

use super::{value, Bar, BarState};
use crate::engine::StepEmitter;

pub(super) fn record(e: &mut StepEmitter<Bar>) {
    let n = e.len();
    for i in 1..n {
        let key = value(e, i);
        e.set_annotations([i], BarState::Pivot);
        e.log(format!("Insert array[{i}]={key}"));
        e.delay();

        let mut j = i;
        while j > 0 && value(e, j - 1) > key {
            let from = j - 1;
            e.set_annotations([from, j], BarState::Swapping);
            e.log(format!("Shift array[{from}]={} to array[{j}]", value(e, from)));
            e.delay();
            e.swap(from, j);
            e.set_annotations([from, j], BarState::Default);
            j -= 1;
        }
        e.set_annotations([j], BarState::Default);
        e.set_annotations(0..=i, BarState::Sorted);
        e.delay();
    }
}
