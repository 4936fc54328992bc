use gridwalk_core::{CellGraph, Point};

use crate::Algorithm;

/// Outcome of one unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Work was done; carries the cell that was expanded, if any.
    Continue(Option<usize>),
    /// The goal (or meeting cell) was reached at this index.
    Found(usize),
    /// The frontier ran dry without reaching the goal.
    Exhausted,
}

/// A resumable search over a [`CellGraph`].
///
/// The engine resets the graph's search fields before calling
/// [`begin`](Self::begin); after that the strategy is the only writer of
/// cell costs, parents and search marks until it reports a terminal
/// [`Advance`].
pub trait Strategy {
    fn algorithm(&self) -> Algorithm;

    /// Seed the frontier for a search from `start` to `goal` (flat indices).
    fn begin(&mut self, graph: &mut CellGraph, start: usize, goal: usize);

    /// Perform exactly one pop-expand-push cycle.
    fn advance(&mut self, graph: &mut CellGraph) -> Advance;

    /// Number of cells expanded so far.
    fn expanded(&self) -> usize;

    /// Path from the cell reported by [`Advance::Found`] back to the start,
    /// ordered goal first.
    fn path(&self, graph: &CellGraph, found: usize) -> Vec<Point> {
        trace_parents(graph, graph.point(found))
    }
}

/// Follow `parent` links from `from` until a cell without a parent.
pub(crate) fn trace_parents(graph: &CellGraph, from: Point) -> Vec<Point> {
    let mut path = vec![from];
    let mut cur = from;
    while let Some(parent) = graph.cell(cur).and_then(|c| c.parent) {
        path.push(parent);
        cur = parent;
        // A chain never visits more cells than the graph holds.
        if path.len() > graph.len() {
            break;
        }
    }
    path
}
