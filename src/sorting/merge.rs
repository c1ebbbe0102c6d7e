//! Top-down merge sort.
//!
//! The merge order is decided first, by comparing the heads of both halves.
//! Write-back then brings each element into place with one exchange, so
//! every intermediate snapshot is still a permutation of the input. There
//! is one delay per written-back position whether or not an exchange was
//! needed.

use super::{release, value, Bar, BarState};
use crate::engine::StepEmitter;

pub(super) fn record(e: &mut StepEmitter<Bar>) {
    if e.len() > 1 {
        sort_range(e, 0, e.len() - 1);
    }
}

fn sort_range(e: &mut StepEmitter<Bar>, l: usize, r: usize) {
    if l >= r {
        return;
    }
    let m = l + (r - l) / 2;
    sort_range(e, l, m);
    sort_range(e, m + 1, r);
    merge(e, l, m, r);
}

fn merge(e: &mut StepEmitter<Bar>, l: usize, m: usize, r: usize) {
    // `order[k]` is the current position of the element that belongs at `l + k`
    let mut order = Vec::with_capacity(r - l + 1);
    let (mut i, mut j) = (l, m + 1);
    while i <= m && j <= r {
        e.set_annotations([i, j], BarState::Comparing);
        e.log(format!(
            "Comparing array[{i}]={} with array[{j}]={}",
            value(e, i),
            value(e, j)
        ));
        e.delay();
        if value(e, i) <= value(e, j) {
            order.push(i);
            release(e, [i]);
            i += 1;
        } else {
            order.push(j);
            release(e, [j]);
            j += 1;
        }
    }
    if i <= m {
        release(e, [i]);
    }
    if j <= r {
        release(e, [j]);
    }
    order.extend(i..=m);
    order.extend(j..=r);

    // pos[s]: where the element that started at `l + s` is now
    // at[p]: which starting offset currently sits at `l + p`
    let len = r - l + 1;
    let mut pos: Vec<usize> = (0..len).collect();
    let mut at: Vec<usize> = (0..len).collect();
    for (k, &src) in order.iter().enumerate() {
        let current = pos[src - l];
        if current != k {
            e.swap(l + k, l + current);
            let displaced = at[k];
            at[current] = displaced;
            pos[displaced] = current;
            at[k] = src - l;
            pos[src - l] = k;
        }
        e.delay();
    }
}
