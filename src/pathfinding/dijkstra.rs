//! Dijkstra's search over the grid, every move costing one.

use super::frontier::Frontier;
use super::grid::{GridShape, Node, NodeRole, VisitState};
use super::{cell_label, Parents, Terminals};
use crate::engine::StepEmitter;

/// Uniform-cost search with lazy deletion: stale frontier entries are
/// skipped when popped.
pub(super) fn record(e: &mut StepEmitter<Node>, shape: GridShape, t: Terminals) -> Option<Parents> {
    let mut distance = vec![u32::MAX; shape.len()];
    let mut settled = vec![false; shape.len()];
    let mut parents: Parents = vec![None; shape.len()];
    let mut frontier = Frontier::new();

    distance[t.start] = 0;
    frontier.push(t.start, 0);
    e.status("Dijkstra: starting...");

    while let Some(entry) = frontier.pop() {
        let current = entry.index;
        if settled[current] {
            continue;
        }
        settled[current] = true;
        if current != t.start && current != t.end {
            e.set_annotations([current], VisitState::Visited);
            e.delay();
        }
        if current == t.end {
            break;
        }
        let through = distance[current].saturating_add(1);
        for next in shape.neighbors(current) {
            if settled[next] || e.cells()[next].role == NodeRole::Barrier {
                continue;
            }
            if through < distance[next] {
                distance[next] = through;
                parents[next] = Some(current);
                frontier.push(next, through);
                e.log(format!("Relaxed {} with distance {through}", cell_label(e, next)));
            }
        }
    }

    settled[t.end].then_some(parents)
}
