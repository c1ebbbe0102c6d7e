//! Pathfinding engine.
//!
//! Grid search from a Start cell to an End cell with 4-directional, unit
//! cost movement. Barriers are never entered.
//!
//! | Algorithm | Frontier | Shortest path |
//! |-----------|----------|---------------|
//! | BFS       | FIFO queue | yes |
//! | DFS       | stack, neighbors in fixed order | no |
//! | Dijkstra  | min-heap, insertion-order ties | yes |
//!
//! Every search ends the same way: on success the path is walked back from
//! the End through recorded predecessors and each non-terminal cell on it
//! is marked `Path`; otherwise "No path found." is reported.

mod bfs;
mod dfs;
mod dijkstra;
pub mod frontier;
pub mod grid;
mod guard;
pub mod path;
pub mod session;

pub use frontier::Frontier;
pub use grid::{
    apply_tap, find_role, GridDisplay, GridMode, GridShape, Node, NodeRole, VisitState, DIRECTIONS,
};
pub use guard::TerminalGuard;
pub use session::PathfindingSession;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::engine::{Step, StepEmitter};

/// Predecessor of every cell on the search tree.
pub type Parents = Vec<Option<usize>>;

/// Available search algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathfindingAlgorithm {
    /// Breadth-first search.
    Bfs,
    /// Depth-first search.
    Dfs,
    /// Dijkstra's algorithm.
    Dijkstra,
}

impl PathfindingAlgorithm {
    /// All algorithms, in menu order.
    pub const ALL: [Self; 3] = [Self::Bfs, Self::Dfs, Self::Dijkstra];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bfs => "BFS",
            Self::Dfs => "DFS",
            Self::Dijkstra => "Dijkstra's",
        }
    }

    /// Whether the path found is always a shortest one.
    #[must_use]
    pub const fn is_shortest(self) -> bool {
        !matches!(self, Self::Dfs)
    }

    /// Search `cells` (laid out as `shape`) between `terminals` and return
    /// the recorded steps.
    #[must_use]
    pub fn record(self, shape: GridShape, cells: Vec<Node>, terminals: Terminals) -> Vec<Step<Node>> {
        let mut emitter = StepEmitter::new(cells);
        let parents = match self {
            Self::Bfs => bfs::record(&mut emitter, shape, terminals),
            Self::Dfs => dfs::record(&mut emitter, shape, terminals),
            Self::Dijkstra => dijkstra::record(&mut emitter, shape, terminals),
        };
        path::conclude(&mut emitter, parents, terminals);
        emitter.finish().1
    }
}

impl fmt::Display for PathfindingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pathfinding algorithm '{0}' (expected bfs, dfs or dijkstra)")]
pub struct UnknownPathfindingAlgorithm(pub String);

impl FromStr for PathfindingAlgorithm {
    type Err = UnknownPathfindingAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::Bfs),
            "dfs" => Ok(Self::Dfs),
            "dijkstra" | "dijkstra's" => Ok(Self::Dijkstra),
            _ => Err(UnknownPathfindingAlgorithm(s.to_string())),
        }
    }
}

/// Flat indices of the Start and End cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminals {
    /// Start cell.
    pub start: usize,
    /// End cell.
    pub end: usize,
}

impl Terminals {
    /// Find the Start and End in `cells`.
    ///
    /// # Errors
    ///
    /// Names the terminal(s) that are not placed.
    pub fn locate(cells: &[Node]) -> Result<Self, MissingTerminal> {
        match (find_role(cells, NodeRole::Start), find_role(cells, NodeRole::End)) {
            (Some(start), Some(end)) => Ok(Self { start, end }),
            (None, None) => Err(MissingTerminal::Both),
            (None, Some(_)) => Err(MissingTerminal::Start),
            (Some(_), None) => Err(MissingTerminal::End),
        }
    }
}

/// Which terminal is missing before a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MissingTerminal {
    /// Neither is placed.
    #[error("Place a Start and an End first")]
    Both,
    /// No Start.
    #[error("Place a Start first")]
    Start,
    /// No End.
    #[error("Place an End first")]
    End,
}

/// Reset every visit annotation. Returns whether anything changed.
pub fn clear_visits(cells: &mut [Node]) -> bool {
    let mut changed = false;
    for node in cells.iter_mut().filter(|n| n.visit != VisitState::None) {
        node.visit = VisitState::None;
        changed = true;
    }
    changed
}

/// `cell[r][c]` for the node at `index` in the working copy.
fn cell_label(e: &StepEmitter<Node>, index: usize) -> String {
    let node = &e.cells()[index];
    format!("cell[{}][{}]", node.row, node.col)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn manhattan(shape: GridShape, a: usize, b: usize) -> usize {
        let (ar, ac) = shape.coords(a);
        let (br, bc) = shape.coords(b);
        ar.abs_diff(br) + ac.abs_diff(bc)
    }

    fn is_valid_path(shape: GridShape, cells: &[Node], t: Terminals, path: &[usize]) -> bool {
        let mut prev = t.start;
        for &cell in path {
            if !shape.neighbors(prev).any(|n| n == cell) || cells[cell].role == NodeRole::Barrier {
                return false;
            }
            prev = cell;
        }
        prev == t.end
    }

    fn parents_of(algorithm: PathfindingAlgorithm, shape: GridShape, cells: &[Node], t: Terminals) -> Option<Parents> {
        let mut e = StepEmitter::new(cells.to_vec());
        match algorithm {
            PathfindingAlgorithm::Bfs => bfs::record(&mut e, shape, t),
            PathfindingAlgorithm::Dfs => dfs::record(&mut e, shape, t),
            PathfindingAlgorithm::Dijkstra => dijkstra::record(&mut e, shape, t),
        }
    }

    proptest! {
        /// On an open grid, BFS and Dijkstra find Manhattan-length paths.
        #[test]
        fn prop_open_grid_manhattan(rows in 1usize..8, cols in 1usize..8, a in 0usize..64, b in 0usize..64) {
            let shape = GridShape::new(rows, cols);
            let (start, end) = (a % shape.len(), b % shape.len());
            prop_assume!(start != end);
            let mut cells = shape.blank();
            apply_tap(&mut cells, start, GridMode::SetStart);
            apply_tap(&mut cells, end, GridMode::SetEnd);
            let t = Terminals { start, end };
            for algorithm in [PathfindingAlgorithm::Bfs, PathfindingAlgorithm::Dijkstra] {
                let parents = parents_of(algorithm, shape, &cells, t);
                prop_assert!(parents.is_some());
                let path = path::backtrack(&parents.unwrap_or_default(), t);
                prop_assert_eq!(path.len(), manhattan(shape, start, end));
                prop_assert!(is_valid_path(shape, &cells, t, &path));
            }
        }

        /// With random barriers, every search agrees on reachability, every
        /// path found is valid, and BFS/Dijkstra agree on its length.
        #[test]
        fn prop_random_barriers(walls in prop::collection::vec(any::<bool>(), 36)) {
            let shape = GridShape::new(6, 6);
            let mut cells = shape.blank();
            for (i, wall) in walls.iter().enumerate() {
                if *wall && i != 0 && i != 35 {
                    apply_tap(&mut cells, i, GridMode::DrawBarrier);
                }
            }
            apply_tap(&mut cells, 0, GridMode::SetStart);
            apply_tap(&mut cells, 35, GridMode::SetEnd);
            let t = Terminals { start: 0, end: 35 };

            let found: Vec<Option<Vec<usize>>> = PathfindingAlgorithm::ALL
                .iter()
                .map(|&a| parents_of(a, shape, &cells, t).map(|p| path::backtrack(&p, t)))
                .collect();
            let reachable = found[0].is_some();
            for path in &found {
                prop_assert_eq!(path.is_some(), reachable);
                if let Some(path) = path {
                    prop_assert!(is_valid_path(shape, &cells, t, path));
                }
            }
            if let (Some(bfs), Some(dijkstra)) = (&found[0], &found[2]) {
                prop_assert_eq!(bfs.len(), dijkstra.len());
                if let Some(dfs) = &found[1] {
                    prop_assert!(dfs.len() >= bfs.len());
                }
            }
        }
    }
}
