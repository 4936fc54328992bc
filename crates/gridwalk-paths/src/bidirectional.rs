use gridwalk_core::{CellGraph, CellStatus, Point, Visit, distance, heuristic};

use crate::Algorithm;
use crate::frontier::{Key, OpenList};
use crate::traits::{Advance, Strategy};

const NO_PARENT: usize = usize::MAX;

#[derive(Clone, Copy, Debug)]
struct SideNode {
    g: f64,
    h: f64,
    f: f64,
    parent: usize,
    visit: Visit,
}

impl Default for SideNode {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            h: f64::INFINITY,
            f: f64::INFINITY,
            parent: NO_PARENT,
            visit: Visit::Unseen,
        }
    }
}

/// One direction of the search: its own costs, parents and frontier.
#[derive(Debug)]
struct Side {
    nodes: Vec<SideNode>,
    open: OpenList,
    target: Point,
    expanded: usize,
    /// Copy this side's bookkeeping into the graph cells.
    mirror: bool,
}

impl Side {
    fn new(len: usize, mirror: bool) -> Self {
        Self {
            nodes: vec![SideNode::default(); len],
            open: OpenList::new(len),
            target: Point::ZERO,
            expanded: 0,
            mirror,
        }
    }

    fn key(&self, idx: usize) -> Key {
        let n = &self.nodes[idx];
        (n.f, n.h)
    }

    fn begin(&mut self, graph: &mut CellGraph, origin: usize, target: usize) {
        self.nodes.fill(SideNode::default());
        self.open.clear();
        self.expanded = 0;
        self.target = graph.point(target);

        let n = &mut self.nodes[origin];
        n.g = 0.0;
        n.h = heuristic(graph.point(origin), self.target);
        n.f = n.h;
        n.visit = Visit::Open;
        self.sync(graph, origin);
        graph.mark_search(origin, CellStatus::Active);
        let k = self.key(origin);
        self.open.push(origin, k);
    }

    fn pop(&mut self) -> Option<usize> {
        let nodes = &self.nodes;
        let ci = self.open.pop(|i| (nodes[i].f, nodes[i].h))?;
        self.nodes[ci].visit = Visit::Closed;
        self.expanded += 1;
        Some(ci)
    }

    fn is_closed(&self, idx: usize) -> bool {
        self.nodes[idx].visit == Visit::Closed
    }

    /// The A* relax rule, with this side's heuristic target.
    fn relax(&mut self, graph: &mut CellGraph, nbuf: &mut Vec<usize>, ci: usize) {
        let cur_pos = graph.point(ci);
        let cur_g = self.nodes[ci].g;

        nbuf.clear();
        graph.neighbor_indices(ci, nbuf);
        for &ni in nbuf.iter() {
            if graph.cell_at(ni).is_blocked() || self.nodes[ni].visit == Visit::Closed {
                continue;
            }
            let np = graph.point(ni);
            let queued = self.nodes[ni].visit == Visit::Open;
            let tentative = cur_g + f64::from(distance(cur_pos, np));
            if queued && tentative >= self.nodes[ni].g {
                continue;
            }

            let n = &mut self.nodes[ni];
            n.parent = ci;
            n.g = tentative;
            n.h = heuristic(np, self.target);
            n.f = n.g + n.h;
            n.visit = Visit::Open;
            self.sync(graph, ni);
            if !queued {
                graph.mark_search(ni, CellStatus::Active);
            }
            let k = self.key(ni);
            self.open.push(ni, k);
        }
    }

    fn sync(&self, graph: &mut CellGraph, idx: usize) {
        if !self.mirror {
            return;
        }
        let n = self.nodes[idx];
        let parent = (n.parent != NO_PARENT).then(|| graph.point(n.parent));
        let c = graph.cell_at_mut(idx);
        c.g = n.g;
        c.h = n.h;
        c.f = n.f;
        c.parent = parent;
        c.visit = n.visit;
    }

    /// Cells from `from` back to this side's origin.
    fn chain(&self, graph: &CellGraph, from: usize) -> Vec<Point> {
        let mut out = vec![graph.point(from)];
        let mut cur = self.nodes[from].parent;
        while cur != NO_PARENT && out.len() <= self.nodes.len() {
            out.push(graph.point(cur));
            cur = self.nodes[cur].parent;
        }
        out
    }
}

/// Two A* searches growing toward each other, one pop each per step.
///
/// The start side heads for the goal and its costs are mirrored into the
/// cells; the goal side heads for the start and keeps its own table. A side
/// meets the other when it pops a cell the other side has already closed.
pub struct Bidirectional {
    forward: Side,
    backward: Side,
    nbuf: Vec<usize>,
}

impl Bidirectional {
    pub fn new(len: usize) -> Self {
        Self {
            forward: Side::new(len, true),
            backward: Side::new(len, false),
            nbuf: Vec::with_capacity(8),
        }
    }
}

impl Strategy for Bidirectional {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Bidirectional
    }

    fn begin(&mut self, graph: &mut CellGraph, start: usize, goal: usize) {
        self.forward.begin(graph, start, goal);
        self.backward.begin(graph, goal, start);
    }

    fn advance(&mut self, graph: &mut CellGraph) -> Advance {
        if self.forward.open.is_empty() || self.backward.open.is_empty() {
            return Advance::Exhausted;
        }

        let Some(ci) = self.forward.pop() else {
            return Advance::Exhausted;
        };
        self.forward.sync(graph, ci);
        graph.mark_search(ci, CellStatus::Closed);
        if self.backward.is_closed(ci) {
            return Advance::Found(ci);
        }
        self.forward.relax(graph, &mut self.nbuf, ci);

        let Some(ci) = self.backward.pop() else {
            return Advance::Exhausted;
        };
        graph.mark_search(ci, CellStatus::Closed);
        if self.forward.is_closed(ci) {
            return Advance::Found(ci);
        }
        self.backward.relax(graph, &mut self.nbuf, ci);

        Advance::Continue(Some(ci))
    }

    fn expanded(&self) -> usize {
        self.forward.expanded + self.backward.expanded
    }

    /// Goal side chain reversed (goal … meeting), then the start side chain
    /// (… start).
    fn path(&self, graph: &CellGraph, found: usize) -> Vec<Point> {
        let mut path = self.backward.chain(graph, found);
        path.reverse();
        path.extend(self.forward.chain(graph, found).into_iter().skip(1));
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(g: &mut CellGraph, from: Point, to: Point) -> Option<(Bidirectional, usize)> {
        let (si, gi) = (g.idx(from).unwrap(), g.idx(to).unwrap());
        let mut s = Bidirectional::new(g.len());
        s.begin(g, si, gi);
        loop {
            match s.advance(g) {
                Advance::Continue(_) => {}
                Advance::Found(i) => return Some((s, i)),
                Advance::Exhausted => return None,
            }
        }
    }

    #[test]
    fn meets_in_the_middle() {
        let mut g = CellGraph::new(9, 1);
        let (s, meet) = solve(&mut g, Point::new(0, 0), Point::new(8, 0)).unwrap();
        let m = g.point(meet);
        assert!(m.x > 0 && m.x < 8);
        let path = s.path(&g, meet);
        let expected: Vec<_> = (0..9).rev().map(|x| Point::new(x, 0)).collect();
        assert_eq!(path, expected);
    }

    #[test]
    fn goal_side_leaves_cell_costs_alone() {
        let mut g = CellGraph::new(9, 1);
        let mut s = Bidirectional::new(g.len());
        s.begin(&mut g, 0, 8);
        s.advance(&mut g);
        // The goal side expanded (8,0) and queued (7,0) but never wrote costs.
        assert!(g.cell(Point::new(7, 0)).unwrap().g.is_infinite());
        assert_eq!(g.status(Point::new(7, 0)), Some(CellStatus::Active));
        assert_eq!(g.cell(Point::new(1, 0)).unwrap().g, 10.0);
    }

    #[test]
    fn goal_side_heuristic_targets_start() {
        let mut g = CellGraph::new(9, 1);
        let mut s = Bidirectional::new(g.len());
        s.begin(&mut g, 0, 8);
        s.advance(&mut g);
        assert_eq!(s.backward.nodes[7].h, 70.0);
        assert_eq!(s.forward.nodes[1].h, 70.0);
    }

    #[test]
    fn walled_off_goal_is_exhausted() {
        let mut g = CellGraph::new(5, 5);
        for y in 0..5 {
            g.set_status(Point::new(2, y), CellStatus::Blocked);
        }
        assert!(solve(&mut g, Point::new(0, 0), Point::new(4, 4)).is_none());
    }
}
