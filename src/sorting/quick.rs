//! Quick sort with a Lomuto partition on the last element.

use super::{release, value, Bar, BarState};
use crate::engine::StepEmitter;

pub(super) fn record(e: &mut StepEmitter<Bar>) {
    if e.len() > 1 {
        sort_range(e, 0, e.len() - 1);
    }
}

fn sort_range(e: &mut StepEmitter<Bar>, low: usize, high: usize) {
    if low >= high {
        return;
    }
    let p = partition(e, low, high);
    e.set_annotations([p], BarState::Sorted);
    if p > low {
        sort_range(e, low, p - 1);
    }
    sort_range(e, p + 1, high);
}

/// Partition `low..=high` around `array[high]`; returns the pivot's final
/// position.
fn partition(e: &mut StepEmitter<Bar>, low: usize, high: usize) -> usize {
    let pivot = value(e, high);
    e.set_annotations([high], BarState::Pivot);
    e.log(format!("Pivot array[{high}]={pivot}"));
    e.delay();

    // next slot for an element <= pivot
    let mut store = low;
    for j in low..high {
        e.set_annotations([j], BarState::Comparing);
        e.log(format!("Compare array[{j}]={} with pivot={pivot}", value(e, j)));
        e.delay();
        if value(e, j) <= pivot {
            if store != j {
                e.set_annotations([store, j], BarState::Swapping);
                e.log(format!("Swap array[{store}] and array[{j}]"));
                e.delay();
                e.swap(store, j);
                e.delay();
                release(e, [store]);
            }
            store += 1;
        }
        release(e, [j]);
    }

    if store != high {
        e.set_annotations([store, high], BarState::Swapping);
        e.log(format!("Place pivot from array[{high}] to array[{store}]"));
        e.delay();
        e.swap(store, high);
        e.delay();
    }
    release(e, [store, high]);
    store
}
