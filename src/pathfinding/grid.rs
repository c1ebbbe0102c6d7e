//! Grid model: node roles, visit annotations, and editing.
//!
//! Nodes are stored row-major in a flat collection so the same snapshot
//! store serves both engines. [`GridShape`] translates between flat
//! indices and `(row, col)` coordinates.

use std::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};

use crate::engine::Cell;

/// Role of a grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeRole {
    /// Walkable.
    #[default]
    Normal,
    /// Search origin.
    Start,
    /// Search target.
    End,
    /// Impassable.
    Barrier,
}

impl NodeRole {
    /// Whether this is the Start or End role.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }
}

/// Visit annotation of a grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisitState {
    /// Not touched by the current run.
    #[default]
    None,
    /// Explored.
    Visited,
    /// On the reconstructed path.
    Path,
}

/// What a tap on the grid does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridMode {
    /// Move the Start to the tapped cell.
    SetStart,
    /// Move the End to the tapped cell.
    SetEnd,
    /// Toggle a barrier on the tapped cell.
    DrawBarrier,
    /// Taps do nothing.
    #[default]
    None,
}

/// One grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    /// Row, from the top.
    pub row: usize,
    /// Column, from the left.
    pub col: usize,
    /// Role.
    pub role: NodeRole,
    /// Visit annotation.
    pub visit: VisitState,
}

impl Node {
    /// A normal, unvisited cell.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            role: NodeRole::Normal,
            visit: VisitState::None,
        }
    }
}

impl Cell for Node {
    type Annotation = VisitState;

    fn annotation(&self) -> VisitState {
        self.visit
    }

    fn set_annotation(&mut self, annotation: VisitState) {
        self.visit = annotation;
    }
}

/// Moves tried from every cell, in order: down, up, right, left.
pub const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridShape {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl GridShape {
    /// Shape with `rows` rows and `cols` columns.
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Number of cells.
    #[must_use]
    pub const fn len(self) -> usize {
        self.rows * self.cols
    }

    /// Whether the grid has no cells.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Flat index of `(row, col)`, or `None` outside the grid.
    #[must_use]
    pub const fn index(self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    /// `(row, col)` of a flat index.
    #[must_use]
    pub const fn coords(self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// In-grid neighbors of `index`, in [`DIRECTIONS`] order.
    pub fn neighbors(self, index: usize) -> impl Iterator<Item = usize> {
        let (row, col) = self.coords(index);
        DIRECTIONS.into_iter().filter_map(move |(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            self.index(r, c)
        })
    }

    /// A fresh grid of normal, unvisited cells.
    #[must_use]
    pub fn blank(self) -> Vec<Node> {
        (0..self.len())
            .map(|i| {
                let (row, col) = self.coords(i);
                Node::new(row, col)
            })
            .collect()
    }
}

/// Index of the first cell holding `role`.
#[must_use]
pub fn find_role(cells: &[Node], role: NodeRole) -> Option<usize> {
    cells.iter().position(|n| n.role == role)
}

/// Apply a tap at `index` under `mode`.
///
/// The tapped cell always ends up unvisited. Most recent assignment wins:
/// a terminal set on a barrier or on the other terminal overwrites it, and
/// a barrier drawn on a terminal removes that terminal.
///
/// Returns false (and changes nothing) for [`GridMode::None`] or an index
/// outside `cells`.
pub fn apply_tap(cells: &mut [Node], index: usize, mode: GridMode) -> bool {
    if index >= cells.len() {
        return false;
    }
    let role = match mode {
        GridMode::None => return false,
        GridMode::SetStart | GridMode::SetEnd => {
            let role = if mode == GridMode::SetStart {
                NodeRole::Start
            } else {
                NodeRole::End
            };
            for node in cells.iter_mut().filter(|n| n.role == role) {
                node.role = NodeRole::Normal;
            }
            role
        }
        GridMode::DrawBarrier => {
            if cells[index].role == NodeRole::Barrier {
                NodeRole::Normal
            } else {
                NodeRole::Barrier
            }
        }
    };
    let node = &mut cells[index];
    node.role = role;
    node.visit = VisitState::None;
    true
}

/// Text rendering, one line per row.
///
/// `S` start, `E` end, `#` barrier, `*` path, `o` visited, `.` empty.
#[derive(Debug, Clone, Copy)]
pub struct GridDisplay<'a> {
    shape: GridShape,
    cells: &'a [Node],
}

impl<'a> GridDisplay<'a> {
    /// Render `cells` laid out as `shape`.
    #[must_use]
    pub const fn new(shape: GridShape, cells: &'a [Node]) -> Self {
        Self { shape, cells }
    }
}

impl fmt::Display for GridDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.cells.iter().enumerate() {
            let glyph = match (node.role, node.visit) {
                (NodeRole::Start, _) => 'S',
                (NodeRole::End, _) => 'E',
                (NodeRole::Barrier, _) => '#',
                (NodeRole::Normal, VisitState::Path) => '*',
                (NodeRole::Normal, VisitState::Visited) => 'o',
                (NodeRole::Normal, VisitState::None) => '.',
            };
            f.write_char(glyph)?;
            if self.shape.cols > 0 && (i + 1) % self.shape.cols == 0 {
                f.write_char('\n')?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHAPE: GridShape = GridShape::new(3, 4);

    #[test]
    fn test_index_roundtrip_and_bounds() {
        assert_eq!(SHAPE.index(2, 3), Some(11));
        assert_eq!(SHAPE.coords(11), (2, 3));
        assert_eq!(SHAPE.index(3, 0), None);
        assert_eq!(SHAPE.index(0, 4), None);
    }

    #[test]
    fn test_neighbor_order() {
        // center cell (1, 1) = 5
        let got: Vec<usize> = SHAPE.neighbors(5).collect();
        assert_eq!(got, vec![9, 1, 6, 4]);
        // corner (0, 0): only down and right
        let got: Vec<usize> = SHAPE.neighbors(0).collect();
        assert_eq!(got, vec![4, 1]);
    }

    #[test]
    fn test_blank_coordinates() {
        let cells = SHAPE.blank();
        assert_eq!(cells.len(), 12);
        assert_eq!((cells[7].row, cells[7].col), (1, 3));
        assert!(cells.iter().all(|n| n.role == NodeRole::Normal));
    }

    #[test]
    fn test_set_start_demotes_previous() {
        let mut cells = SHAPE.blank();
        assert!(apply_tap(&mut cells, 0, GridMode::SetStart));
        assert!(apply_tap(&mut cells, 5, GridMode::SetStart));
        assert_eq!(cells[0].role, NodeRole::Normal);
        assert_eq!(find_role(&cells, NodeRole::Start), Some(5));
    }

    #[test]
    fn test_start_overwrites_end() {
        let mut cells = SHAPE.blank();
        apply_tap(&mut cells, 3, GridMode::SetEnd);
        apply_tap(&mut cells, 3, GridMode::SetStart);
        assert_eq!(cells[3].role, NodeRole::Start);
        assert_eq!(find_role(&cells, NodeRole::End), None);
    }

    #[test]
    fn test_barrier_toggle_and_terminal_removal() {
        let mut cells = SHAPE.blank();
        apply_tap(&mut cells, 2, GridMode::DrawBarrier);
        assert_eq!(cells[2].role, NodeRole::Barrier);
        apply_tap(&mut cells, 2, GridMode::DrawBarrier);
        assert_eq!(cells[2].role, NodeRole::Normal);

        apply_tap(&mut cells, 4, GridMode::SetEnd);
        apply_tap(&mut cells, 4, GridMode::DrawBarrier);
        assert_eq!(cells[4].role, NodeRole::Barrier);
        assert_eq!(find_role(&cells, NodeRole::End), None);
    }

    #[test]
    fn test_tap_resets_visit() {
        let mut cells = SHAPE.blank();
        cells[1].visit = VisitState::Path;
        apply_tap(&mut cells, 1, GridMode::DrawBarrier);
        assert_eq!(cells[1].visit, VisitState::None);
    }

    #[test]
    fn test_tap_rejected() {
        let mut cells = SHAPE.blank();
        assert!(!apply_tap(&mut cells, 1, GridMode::None));
        assert!(!apply_tap(&mut cells, 99, GridMode::SetStart));
        assert_eq!(cells, SHAPE.blank());
    }

    #[test]
    fn test_display() {
        let shape = GridShape::new(2, 3);
        let mut cells = shape.blank();
        apply_tap(&mut cells, 0, GridMode::SetStart);
        apply_tap(&mut cells, 5, GridMode::SetEnd);
        apply_tap(&mut cells, 1, GridMode::DrawBarrier);
        cells[3].visit = VisitState::Path;
        cells[4].visit = VisitState::Visited;
        assert_eq!(GridDisplay::new(shape, &cells).to_string(), "S#.\n*oE\n");
    }
}
