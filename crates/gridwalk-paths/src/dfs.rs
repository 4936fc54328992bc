use gridwalk_core::{CellGraph, Visit};

use crate::Algorithm;
use crate::frontier;
use crate::traits::{Advance, Strategy};

/// Depth-first search over a LIFO stack.
///
/// Neighbours are pushed in reverse so the first-listed one is explored
/// first. No optimality guarantee.
pub struct DepthFirst {
    stack: Vec<usize>,
    nbuf: Vec<usize>,
    goal: usize,
    expanded: usize,
}

impl DepthFirst {
    pub fn new(len: usize) -> Self {
        Self {
            stack: Vec::with_capacity(len.min(1024)),
            nbuf: Vec::with_capacity(8),
            goal: usize::MAX,
            expanded: 0,
        }
    }
}

impl Strategy for DepthFirst {
    fn algorithm(&self) -> Algorithm {
        Algorithm::DepthFirst
    }

    fn begin(&mut self, graph: &mut CellGraph, start: usize, goal: usize) {
        self.stack.clear();
        self.goal = goal;
        self.expanded = 0;
        graph.cell_at_mut(start).g = 0.0;
        frontier::open(graph, start);
        self.stack.push(start);
    }

    fn advance(&mut self, graph: &mut CellGraph) -> Advance {
        let Some(ci) = self.stack.pop() else {
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
        for &ni in self.nbuf.iter().rev() {
            let n = graph.cell_at(ni);
            if n.is_blocked() || n.visit != Visit::Unseen {
                continue;
            }
            graph.cell_at_mut(ni).parent = Some(cur_pos);
            frontier::open(graph, ni);
            self.stack.push(ni);
        }

        Advance::Continue(Some(ci))
    }

    fn expanded(&self) -> usize {
        self.expanded
    }
}
