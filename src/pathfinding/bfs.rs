//! Breadth-first search over the grid.

use std::collections::VecDeque;

use super::grid::{GridShape, Node, NodeRole, VisitState};
use super::{cell_label, Parents, Terminals};
use crate::engine::StepEmitter;

/// Level-order search. Delays after every dequeue.
pub(super) fn record(e: &mut StepEmitter<Node>, shape: GridShape, t: Terminals) -> Option<Parents> {
    let mut seen = vec![false; shape.len()];
    let mut parents: Parents = vec![None; shape.len()];
    let mut queue = VecDeque::from([t.start]);
    seen[t.start] = true;
    e.status(format!("BFS: enqueued start {}", cell_label(e, t.start)));

    while let Some(current) = queue.pop_front() {
        e.status(format!("Visiting {}", cell_label(e, current)));
        if !e.cells()[current].role.is_terminal() {
            e.set_annotations([current], VisitState::Visited);
        }
        e.delay();
        if current == t.end {
            return Some(parents);
        }
        for next in shape.neighbors(current) {
            if seen[next] || e.cells()[next].role == NodeRole::Barrier {
                continue;
            }
            seen[next] = true;
            parents[next] = Some(current);
            queue.push_back(next);
            e.status(format!("Queued {}", cell_label(e, next)));
        }
    }
    None
}
