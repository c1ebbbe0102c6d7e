//! Depth-first search.
//!
//! Explicit stack of `(cell, next direction)` frames instead of call-stack
//! recursion, so a 64×64 grid cannot overflow the stack. Exploration order
//! is the same as the recursive form.

use super::grid::{GridShape, Node, NodeRole, VisitState};
use super::{Parents, Terminals};
use crate::engine::StepEmitter;

pub(super) fn record(e: &mut StepEmitter<Node>, shape: GridShape, t: Terminals) -> Option<Parents> {
    let mut seen = vec![false; shape.len()];
    let mut parents: Parents = vec![None; shape.len()];
    e.status("DFS: exploring...");

    if enter(e, &mut seen, t, t.start) {
        return Some(parents);
    }
    let mut stack = vec![(t.start, 0usize)];
    while let Some(frame) = stack.last_mut() {
        let (current, tried) = *frame;
        let Some(next) = shape.neighbors(current).nth(tried) else {
            stack.pop();
            continue;
        };
        frame.1 += 1;
        if seen[next] || e.cells()[next].role == NodeRole::Barrier {
            continue;
        }
        parents[next] = Some(current);
        if enter(e, &mut seen, t, next) {
            return Some(parents);
        }
        stack.push((next, 0));
    }
    None
}

/// Visit `index`; returns true if it is the End.
fn enter(e: &mut StepEmitter<Node>, seen: &mut [bool], t: Terminals, index: usize) -> bool {
    if index == t.end {
        return true;
    }
    seen[index] = true;
    if index != t.start {
        e.set_annotations([index], VisitState::Visited);
        e.delay();
    }
    false
}
