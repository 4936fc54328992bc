use gridwalk_core::{Cell, CellGraph, Point, Visit, heuristic};

use crate::Algorithm;
use crate::frontier::{self, Key, OpenList};
use crate::traits::{Advance, Strategy};

fn by_h(c: &Cell) -> Key {
    (c.h, 0.0)
}

/// Greedy best-first search ordered by `h` alone.
///
/// Neighbours are queued once, when first seen; `g` is never accumulated.
pub struct Greedy {
    open: OpenList,
    nbuf: Vec<usize>,
    goal: usize,
    target: Point,
    expanded: usize,
}

impl Greedy {
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

impl Strategy for Greedy {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Greedy
    }

    fn begin(&mut self, graph: &mut CellGraph, start: usize, goal: usize) {
        self.open.clear();
        self.goal = goal;
        self.target = graph.point(goal);
        self.expanded = 0;

        let c = graph.cell_at_mut(start);
        c.g = 0.0;
        c.h = heuristic(c.pos(), self.target);
        let k = by_h(c);
        frontier::open(graph, start);
        self.open.push(start, k);
    }

    fn advance(&mut self, graph: &mut CellGraph) -> Advance {
        let Some(ci) = self.open.pop(|i| by_h(graph.cell_at(i))) else {
            return Advance::Exhausted;
        };
        frontier::close(graph, ci);
        self.expanded += 1;

        if ci == self.goal {
            return Advance::Found(ci);
        }

        let cur_pos = graph.point(ci);
        self.nbuf.clear();
        graph.neighbor_indices(ci, &mut self.nbuf);
        for &ni in self.nbuf.iter() {
            let n = graph.cell_at(ni);
            if n.is_blocked() || n.visit != Visit::Unseen {
                continue;
            }
            let n = graph.cell_at_mut(ni);
            n.parent = Some(cur_pos);
            n.h = heuristic(n.pos(), self.target);
            let k = by_h(n);
            frontier::open(graph, ni);
            self.open.push(ni, k);
        }

        Advance::Continue(Some(ci))
    }

    fn expanded(&self) -> usize {
        self.expanded
    }
}
