use gridwalk_core::{Cell, CellGraph, Point};

use crate::Algorithm;
use crate::astar::{relax, seed_informed};
use crate::frontier::{self, Key, OpenList};
use crate::traits::{Advance, Strategy};

fn scaled_f(c: &Cell) -> Key {
    (c.f, 0.0)
}

/// A* whose frontier order is biased by a per-cell pheromone multiplier.
///
/// Before every pop each frontier cell's `f` is recomputed as
/// `(g + h) * pheromone`; expanding a cell multiplies its pheromone by the
/// reinforcement factor.
pub struct Swarm {
    open: OpenList,
    nbuf: Vec<usize>,
    pheromone: Vec<f64>,
    reinforcement: f64,
    goal: usize,
    target: Point,
    expanded: usize,
}

impl Swarm {
    pub fn new(len: usize, reinforcement: f64) -> Self {
        Self {
            open: OpenList::new(len),
            nbuf: Vec::with_capacity(8),
            pheromone: vec![1.0; len],
            reinforcement,
            goal: usize::MAX,
            target: Point::ZERO,
            expanded: 0,
        }
    }

    /// Pheromone multiplier of cell `idx`.
    pub fn pheromone(&self, idx: usize) -> f64 {
        self.pheromone[idx]
    }

    fn rescale(&mut self, graph: &mut CellGraph) {
        for idx in self.open.members() {
            let c = graph.cell_at_mut(idx);
            c.f = (c.g + c.h) * self.pheromone[idx];
        }
        self.open.rebuild(|i| scaled_f(graph.cell_at(i)));
    }
}

impl Strategy for Swarm {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Swarm
    }

    fn begin(&mut self, graph: &mut CellGraph, start: usize, goal: usize) {
        self.open.clear();
        self.pheromone.fill(1.0);
        self.goal = goal;
        self.target = graph.point(goal);
        self.expanded = 0;
        seed_informed(graph, &mut self.open, start, self.target, scaled_f);
    }

    fn advance(&mut self, graph: &mut CellGraph) -> Advance {
        if self.open.is_empty() {
            return Advance::Exhausted;
        }
        self.rescale(graph);

        let Some(ci) = self.open.pop(|i| scaled_f(graph.cell_at(i))) else {
            return Advance::Exhausted;
        };
        frontier::close(graph, ci);
        self.expanded += 1;

        if ci == self.goal {
            return Advance::Found(ci);
        }

        self.pheromone[ci] *= self.reinforcement;
        relax(graph, &mut self.open, &mut self.nbuf, ci, self.target, scaled_f);
        Advance::Continue(Some(ci))
    }

    fn expanded(&self) -> usize {
        self.expanded
    }
}
