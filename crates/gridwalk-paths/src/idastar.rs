use gridwalk_core::{CellGraph, Point};

use crate::Algorithm;
use crate::astar::{f_then_h, relax, seed_informed};
use crate::frontier::{self, OpenList};
use crate::traits::{Advance, Strategy};

/// Iterative-deepening A*.
///
/// Runs A* restricted to cells whose `f` is within a threshold. When the
/// cheapest frontier cell lies beyond it the iteration ends, the threshold is
/// raised to that cell's `f` and the search starts over from the start cell
/// on freshly reset search fields. A restart is one step of its own.
pub struct IdaStar {
    open: OpenList,
    nbuf: Vec<usize>,
    start: usize,
    goal: usize,
    target: Point,
    threshold: f64,
    next_threshold: f64,
    restarts: u32,
    max_restarts: u32,
    expanded: usize,
}

impl IdaStar {
    pub fn new(len: usize, max_restarts: u32) -> Self {
        Self {
            open: OpenList::new(len),
            nbuf: Vec::with_capacity(8),
            start: usize::MAX,
            goal: usize::MAX,
            target: Point::ZERO,
            threshold: f64::INFINITY,
            next_threshold: f64::INFINITY,
            restarts: 0,
            max_restarts,
            expanded: 0,
        }
    }

    /// Current `f` bound.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Number of completed iterations that ended by raising the threshold.
    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    fn seed(&mut self, graph: &mut CellGraph) {
        self.open.clear();
        seed_informed(graph, &mut self.open, self.start, self.target, f_then_h);
    }

    fn restart(&mut self, graph: &mut CellGraph) -> Advance {
        if self.restarts >= self.max_restarts {
            log::warn!(
                "IDA* gave up after {} restarts (threshold {})",
                self.restarts,
                self.threshold
            );
            return Advance::Exhausted;
        }
        if self.next_threshold <= self.threshold || self.next_threshold.is_infinite() {
            log::warn!("IDA* threshold stuck at {}", self.threshold);
            return Advance::Exhausted;
        }

        self.threshold = self.next_threshold;
        self.next_threshold = f64::INFINITY;
        self.restarts += 1;
        log::debug!(
            "IDA* restart {}: threshold raised to {}",
            self.restarts,
            self.threshold
        );

        graph.reset_search();
        self.seed(graph);
        Advance::Continue(None)
    }
}

impl Strategy for IdaStar {
    fn algorithm(&self) -> Algorithm {
        Algorithm::IdaStar
    }

    fn begin(&mut self, graph: &mut CellGraph, start: usize, goal: usize) {
        self.start = start;
        self.goal = goal;
        self.target = graph.point(goal);
        self.restarts = 0;
        self.expanded = 0;
        self.next_threshold = f64::INFINITY;
        self.seed(graph);
        self.threshold = graph.cell_at(start).h;
    }

    fn advance(&mut self, graph: &mut CellGraph) -> Advance {
        let Some(ci) = self.open.peek(|i| f_then_h(graph.cell_at(i))) else {
            return Advance::Exhausted;
        };

        let f = graph.cell_at(ci).f;
        if f > self.threshold {
            // Nothing left in the frontier fits under the bound.
            self.next_threshold = self.next_threshold.min(f);
            return self.restart(graph);
        }

        self.open.pop(|i| f_then_h(graph.cell_at(i)));
        frontier::close(graph, ci);
        self.expanded += 1;

        if ci == self.goal {
            return Advance::Found(ci);
        }

        relax(graph, &mut self.open, &mut self.nbuf, ci, self.target, f_then_h);
        Advance::Continue(Some(ci))
    }

    /// Cells expanded over all iterations.
    fn expanded(&self) -> usize {
        self.expanded
    }
}
