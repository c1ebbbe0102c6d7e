//! Selection sort: each pass moves the minimum of the unsorted tail to its front.

use super::{release, value, Bar, BarState};
use crate::engine::StepEmitter;

pub(super) fn record(e: &mut StepEmitter<Bar>) {
    let n = e.len();
    for i in 0..n {
        let mut min = i;
        e.set_annotations([i], BarState::Pivot);
        e.delay();
        for j in i + 1..n {
            e.set_annotations([j], BarState::Comparing);
            e.log(format!(
                "Comparing array[{j}]={} with current min array[{min}]={}",
                value(e, j),
                value(e, min)
            ));
            e.delay();
            if value(e, j) < value(e, min) {
                if min != i {
                    release(e, [min]);
                }
                min = j;
                e.set_annotations([min], BarState::Pivot);
                e.log(format!("New min at array[{min}]={}", value(e, min)));
                e.delay();
            } else {
                release(e, [j]);
            }
        }
        if min != i {
            e.set_annotations([i, min], BarState::Swapping);
            e.log(format!("Swapping array[{i}] and array[{min}]"));
            e.delay();
            e.swap(i, min);
            e.delay();
        }
        e.set_annotations([i], BarState::Sorted);
        if min != i {
            release(e, [min]);
        }
    }
}
