use gridwalk_core::{Cell, CellGraph, Point, Visit, distance, heuristic};

use crate::Algorithm;
use crate::frontier::{self, Key, OpenList};
use crate::traits::{Advance, Strategy};

/// A* frontier order: lowest `f`, then lowest `h`.
pub(crate) fn f_then_h(c: &Cell) -> Key {
    (c.f, c.h)
}

/// Seed `idx` as the origin of an informed search toward `target`.
pub(crate) fn seed_informed(
    graph: &mut CellGraph,
    open: &mut OpenList,
    idx: usize,
    target: Point,
    key: fn(&Cell) -> Key,
) {
    let c = graph.cell_at_mut(idx);
    c.g = 0.0;
    c.h = heuristic(c.pos(), target);
    c.f = c.g + c.h;
    let k = key(c);
    frontier::open(graph, idx);
    open.push(idx, k);
}

/// Expand `ci` with the A* relax rule.
///
/// Every non-blocked, non-closed neighbour whose cost improves, or that is
/// not yet queued, gets `parent = ci`, a fresh `g` and `h` toward `target`,
/// and `f = g + h`.
pub(crate) fn relax(
    graph: &mut CellGraph,
    open: &mut OpenList,
    nbuf: &mut Vec<usize>,
    ci: usize,
    target: Point,
    key: fn(&Cell) -> Key,
) {
    let (cur_pos, cur_g) = {
        let c = graph.cell_at(ci);
        (c.pos(), c.g)
    };

    nbuf.clear();
    graph.neighbor_indices(ci, nbuf);

    for &ni in nbuf.iter() {
        let n = graph.cell_at(ni);
        if n.is_blocked() || n.visit == Visit::Closed {
            continue;
        }
        let queued = n.visit == Visit::Open;
        let tentative = cur_g + f64::from(distance(cur_pos, n.pos()));
        if queued && tentative >= n.g {
            continue;
        }

        let n = graph.cell_at_mut(ni);
        n.parent = Some(cur_pos);
        n.g = tentative;
        n.h = heuristic(n.pos(), target);
        n.f = n.g + n.h;
        let k = key(n);
        if !queued {
            frontier::open(graph, ni);
        }
        open.push(ni, k);
    }
}

/// A* search ordered by `(f, h)`.
pub struct AStar {
    open: OpenList,
    nbuf: Vec<usize>,
    goal: usize,
    target: Point,
    expanded: usize,
}

impl AStar {
    pub fn new(len: usize) -> Self {
        Self {
            open: OpenList::new(len),
            nbuf: Vec::with_capacity(8),
            goal: usize::MAX,
            target: Point::ZERO,
            expanded: 0,
        }
    }
}

impl Strategy for AStar {
    fn algorithm(&self) -> Algorithm {
        Algorithm::AStar
    }

    fn begin(&mut self, graph: &mut CellGraph, start: usize, goal: usize) {
        self.open.clear();
        self.goal = goal;
        self.target = graph.point(goal);
        self.expanded = 0;
        seed_informed(graph, &mut self.open, start, self.target, f_then_h);
    }

    fn advance(&mut self, graph: &mut CellGraph) -> Advance {
        let Some(ci) = self.open.pop(|i| f_then_h(graph.cell_at(i))) else {
            return Advance::Exhausted;
        };
        frontier::close(graph, ci);
        self.expanded += 1;

        if ci == self.goal {
            return Advance::Found(ci);
        }

        relax(graph, &mut self.open, &mut self.nbuf, ci, self.target, f_then_h);
        Advance::Continue(Some(ci))
    }

    fn expanded(&self) -> usize {
        self.expanded
    }
}
