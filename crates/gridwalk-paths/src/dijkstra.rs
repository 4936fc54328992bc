use gridwalk_core::distance::CARDINAL_COST;
use gridwalk_core::{Cell, CellGraph, Visit, distance};

use crate::Algorithm;
use crate::frontier::{self, Key, OpenList};
use crate::traits::{Advance, Strategy};

/// Uniform-cost search ordered by `g`.
///
/// Every edge costs [`CARDINAL_COST`], diagonals included, so `g` counts
/// hops. Among equal-hop routes the one with the lowest 10/14 distance wins,
/// both in frontier order and when relaxing a queued neighbour.
pub struct Dijkstra {
    open: OpenList,
    nbuf: Vec<usize>,
    /// 10/14 distance from the start along the current parent chain.
    dist: Vec<f64>,
    goal: usize,
    expanded: usize,
}

impl Dijkstra {
    pub fn new(len: usize) -> Self {
        Self {
            open: OpenList::new(len),
            nbuf: Vec::with_capacity(8),
            dist: vec![f64::INFINITY; len],
            goal: usize::MAX,
            expanded: 0,
        }
    }

    fn key(&self, c: &Cell, idx: usize) -> Key {
        (c.g, self.dist[idx])
    }
}

impl Strategy for Dijkstra {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dijkstra
    }

    fn begin(&mut self, graph: &mut CellGraph, start: usize, goal: usize) {
        self.open.clear();
        self.dist.fill(f64::INFINITY);
        self.goal = goal;
        self.expanded = 0;
        graph.cell_at_mut(start).g = 0.0;
        self.dist[start] = 0.0;
        frontier::open(graph, start);
        self.open.push(start, (0.0, 0.0));
    }

    fn advance(&mut self, graph: &mut CellGraph) -> Advance {
        let dist = &self.dist;
        let Some(ci) = self.open.pop(|i| (graph.cell_at(i).g, dist[i])) else {
            return Advance::Exhausted;
        };
        frontier::close(graph, ci);
        self.expanded += 1;

        if ci == self.goal {
            return Advance::Found(ci);
        }

        let (cur_pos, cur_g) = {
            let c = graph.cell_at(ci);
            (c.pos(), c.g)
        };
        let cur_dist = self.dist[ci];
        let tentative = cur_g + f64::from(CARDINAL_COST);

        self.nbuf.clear();
        graph.neighbor_indices(ci, &mut self.nbuf);
        for &ni in self.nbuf.iter() {
            let n = graph.cell_at(ni);
            if n.is_blocked() || n.visit == Visit::Closed {
                continue;
            }
            let queued = n.visit == Visit::Open;
            let via = cur_dist + f64::from(distance(cur_pos, n.pos()));
            if queued && (tentative > n.g || (tentative == n.g && via >= self.dist[ni])) {
                continue;
            }
            let n = graph.cell_at_mut(ni);
            n.parent = Some(cur_pos);
            n.g = tentative;
            self.dist[ni] = via;
            let k = self.key(graph.cell_at(ni), ni);
            if !queued {
                frontier::open(graph, ni);
            }
            self.open.push(ni, k);
        }

        Advance::Continue(Some(ci))
    }

    fn expanded(&self) -> usize {
        self.expanded
    }
}
