//! Path reconstruction shared by every search.

use super::grid::{Node, VisitState};
use super::{cell_label, Parents, Terminals};
use crate::engine::StepEmitter;

/// Cells from the End back to (excluding) the Start, in Start-to-End order.
#[must_use]
pub fn backtrack(parents: &Parents, t: Terminals) -> Vec<usize> {
    let mut path = Vec::new();
    let mut current = t.end;
    while current != t.start {
        path.push(current);
        match parents.get(current).copied().flatten() {
            Some(parent) => current = parent,
            None => break,
        }
    }
    path.reverse();
    path
}

/// Record the outcome of a search: the highlighted path, or the failure.
pub(super) fn conclude(e: &mut StepEmitter<Node>, parents: Option<Parents>, t: Terminals) {
    let Some(parents) = parents else {
        e.status("No path found.");
        return;
    };
    e.status("End found. Backtracking path...");
    let path = backtrack(&parents, t);
    for &index in path.iter().filter(|&&i| i != t.end) {
        e.set_annotations([index], VisitState::Path);
        e.delay();
        e.status(format!("Path {}", cell_label(e, index)));
    }
    e.status(format!("Completed. Path length: {}", path.len()));
}
