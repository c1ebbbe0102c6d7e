//! Cell model shared by both engines.
//!
//! A cell is one addressable unit of the visualized structure: an array
//! element for sorting, a grid node for pathfinding. Its persistent content
//! (value, role) is owned by the domain; the engine only ever touches the
//! transient annotation.

use std::fmt::Debug;

/// An element of a published collection that carries one annotation.
pub trait Cell: Clone + Debug + PartialEq {
    /// Transient visual/semantic tag (e.g. `Comparing`, `Visited`).
    type Annotation: Copy + Debug + PartialEq + Eq;

    /// Current annotation.
    fn annotation(&self) -> Self::Annotation;

    /// Overwrite the annotation, leaving every other field untouched.
    fn set_annotation(&mut self, annotation: Self::Annotation);
}

/// Overwrite the annotation of every valid position in `positions`.
///
/// Out-of-range positions are skipped. Returns the positions that were
/// actually annotated, in the order given.
pub fn annotate<C: Cell>(
    cells: &mut [C],
    positions: impl IntoIterator<Item = usize>,
    annotation: C::Annotation,
) -> Vec<usize> {
    let mut applied = Vec::new();
    for position in positions {
        if let Some(cell) = cells.get_mut(position) {
            cell.set_annotation(annotation);
            applied.push(position);
        }
    }
    applied
}
