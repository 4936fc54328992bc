use std::collections::VecDeque;

use gridwalk_core::{CellGraph, Visit};

use crate::Algorithm;
use crate::frontier;
use crate::traits::{Advance, Strategy};

/// Breadth-first search over a FIFO queue.
///
/// Costs are not tracked beyond `g(start) = 0`; the path found is minimal
/// in hop count.
pub struct BreadthFirst {
    queue: VecDeque<usize>,
    nbuf: Vec<usize>,
    goal: usize,
    expanded: usize,
}

impl BreadthFirst {
    pub fn new(len: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(len.min(1024)),
            nbuf: Vec::with_capacity(8),
            goal: usize::MAX,
            expanded: 0,
        }
    }
}

impl Strategy for BreadthFirst {
    fn algorithm(&self) -> Algorithm {
        Algorithm::BreadthFirst
    }

    fn begin(&mut self, graph: &mut CellGraph, start: usize, goal: usize) {
        self.queue.clear();
        self.goal = goal;
        self.expanded = 0;
        graph.cell_at_mut(start).g = 0.0;
        frontier::open(graph, start);
        self.queue.push_back(start);
    }

    fn advance(&mut self, graph: &mut CellGraph) -> Advance {
        let Some(ci) = self.queue.pop_front() else {
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
            graph.cell_at_mut(ni).parent = Some(cur_pos);
            frontier::open(graph, ni);
            self.queue.push_back(ni);
        }

        Advance::Continue(Some(ci))
    }

    fn expanded(&self) -> usize {
        self.expanded
    }
}
