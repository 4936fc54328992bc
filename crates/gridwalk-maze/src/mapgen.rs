//! The [`MazeGen`] generators.
//!
//! Every generator first clears the graph's search state and never changes
//! the status of the `start` and `goal` positions it is given. Obstacle
//! edits go through [`CellGraph::set_status`], so a running search notices
//! them through the graph revision.

use gridwalk_core::{CellGraph, CellStatus, ConfigError, Point, Range};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::MazeKind;

/// Lattice steps used by Prim's algorithm.
const LATTICE: [(i32, i32); 4] = [(-2, 0), (2, 0), (0, -2), (0, 2)];

/// Spiral walking directions: right, down, left, up.
const SPIRAL_DIRS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Parameters of the probabilistic generators.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeConfig {
    /// Chance that Random Obstacles blocks a cell.
    pub density: f64,
    /// Chance that Cellular Automata seeds a cell as blocked.
    pub ca_fill: f64,
    /// Smoothing generations run by Cellular Automata.
    pub ca_generations: usize,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            density: 0.3,
            ca_fill: 0.45,
            ca_generations: 4,
        }
    }
}

/// Maze generator owning its random number generator.
pub struct MazeGen<R: Rng> {
    pub rng: R,
    pub config: MazeConfig,
}

impl MazeGen<StdRng> {
    /// Deterministic generator: the same seed yields the same layouts.
    pub fn from_seed(seed: u64, config: MazeConfig) -> Self {
        Self::with_config(StdRng::seed_from_u64(seed), config)
    }
}

impl<R: Rng> MazeGen<R> {
    /// Create a generator with the default [`MazeConfig`].
    pub fn new(rng: R) -> Self {
        Self::with_config(rng, MazeConfig::default())
    }

    pub fn with_config(rng: R, config: MazeConfig) -> Self {
        Self { rng, config }
    }

    /// Move the graph's endpoints to `start` and `goal`, then lay out a maze
    /// of the given kind around them.
    ///
    /// On error the graph is left untouched.
    pub fn generate(
        &mut self,
        kind: MazeKind,
        graph: &mut CellGraph,
        start: Point,
        goal: Point,
    ) -> Result<(), ConfigError> {
        graph.place_endpoints(start, goal)?;
        match kind {
            MazeKind::RandomObstacles => self.random_obstacles(graph, start, goal),
            MazeKind::RecursiveDivision => self.recursive_division(graph, start, goal),
            MazeKind::Prim => self.prim(graph, start, goal),
            MazeKind::CellularAutomata => self.cellular_automata(graph, start, goal),
            MazeKind::Spiral => self.spiral(graph, start, goal),
        }
        log::debug!(
            "{kind} generated on {}x{}: {} cells blocked",
            graph.width(),
            graph.height(),
            graph.blocked_count()
        );
        Ok(())
    }

    /// Block each cell independently with probability `config.density`.
    pub fn random_obstacles(&mut self, graph: &mut CellGraph, start: Point, goal: Point) {
        graph.reset_search();
        let density = self.config.density;
        for p in graph.bounds() {
            if p == start || p == goal {
                continue;
            }
            let r: f64 = self.rng.random();
            let status = if r < density {
                CellStatus::Blocked
            } else {
                CellStatus::Empty
            };
            graph.set_status(p, status);
        }
    }

    /// Recursive division from an empty grid.
    ///
    /// Each wall spans its whole room at an interior offset and keeps one
    /// passage open. Every empty cell stays reachable from every other.
    pub fn recursive_division(&mut self, graph: &mut CellGraph, start: Point, goal: Point) {
        graph.reset_search();
        fill(graph, CellStatus::Empty, start, goal);
        let horizontal = self.rng.random_bool(0.5);
        let bounds = graph.bounds();
        self.divide(graph, bounds, horizontal, [start, goal]);
    }

    fn divide(&mut self, graph: &mut CellGraph, room: Range, horizontal: bool, keep: [Point; 2]) {
        let (x, y) = (room.min.x, room.min.y);
        let (w, h) = (room.width(), room.height());
        if w < 3 || h < 3 {
            return;
        }

        let wall = if horizontal {
            Point::new(x, y + self.rng.random_range(1..=h - 2))
        } else {
            Point::new(x + self.rng.random_range(1..=w - 2), y)
        };
        let (len, (dx, dy)) = if horizontal { (w, (1, 0)) } else { (h, (0, 1)) };
        let offset = self.rng.random_range(0..len);
        let passage = wall.shift(dx * offset, dy * offset);

        for i in 0..len {
            let p = wall.shift(dx * i, dy * i);
            if p == passage || keep.contains(&p) {
                continue;
            }
            graph.set_status(p, CellStatus::Blocked);
        }

        if horizontal {
            self.divide(graph, Range::with_size(x, y, w, wall.y - y), false, keep);
            self.divide(
                graph,
                Range::with_size(x, wall.y + 1, w, y + h - wall.y - 1),
                false,
                keep,
            );
        } else {
            self.divide(graph, Range::with_size(x, y, wall.x - x, h), true, keep);
            self.divide(
                graph,
                Range::with_size(wall.x + 1, y, x + w - wall.x - 1, h),
                true,
                keep,
            );
        }
    }

    /// Randomized Prim's algorithm on the lattice of cells two steps apart.
    ///
    /// Starts fully blocked and carves a spanning tree from a random
    /// interior cell. Grids narrower or shorter than 3 stay blocked.
    pub fn prim(&mut self, graph: &mut CellGraph, start: Point, goal: Point) {
        graph.reset_search();
        fill(graph, CellStatus::Blocked, start, goal);
        let (w, h) = (graph.width(), graph.height());
        if w < 3 || h < 3 {
            return;
        }
        let keep = [start, goal];

        let interior: Vec<Point> = Range::new(1, 1, w - 1, h - 1)
            .iter()
            .filter(|p| !keep.contains(p))
            .collect();
        let Some(&origin) = interior.choose(&mut self.rng) else {
            return;
        };
        graph.set_status(origin, CellStatus::Empty);

        let mut frontier = lattice_neighbors(graph, origin, |_| true);
        while !frontier.is_empty() {
            let f = frontier.swap_remove(self.rng.random_range(0..frontier.len()));
            if !graph.is_blocked(f) {
                continue;
            }
            let carved = lattice_neighbors(graph, f, |s| s == CellStatus::Empty);
            let Some(&to) = carved.choose(&mut self.rng) else {
                continue;
            };
            let mid = Point::new((f.x + to.x) / 2, (f.y + to.y) / 2);
            for p in [f, mid] {
                if !keep.contains(&p) {
                    graph.set_status(p, CellStatus::Empty);
                }
            }
            frontier.extend(lattice_neighbors(graph, f, |s| s == CellStatus::Blocked));
        }
    }

    /// Random fill smoothed by `config.ca_generations` rounds of a cave rule.
    ///
    /// A blocked cell stays blocked with at least 3 blocked neighbours; an
    /// empty cell becomes blocked with more than 4. Cells outside the grid do
    /// not count.
    pub fn cellular_automata(&mut self, graph: &mut CellGraph, start: Point, goal: Point) {
        graph.reset_search();
        let fill_pct = self.config.ca_fill;
        for p in graph.bounds() {
            if p == start || p == goal {
                continue;
            }
            let r: f64 = self.rng.random();
            let status = if r < fill_pct {
                CellStatus::Blocked
            } else {
                CellStatus::Empty
            };
            graph.set_status(p, status);
        }

        for _ in 0..self.config.ca_generations {
            let snapshot: Vec<bool> = graph.iter().map(|c| c.is_blocked()).collect();
            for p in graph.bounds() {
                if p == start || p == goal {
                    continue;
                }
                let walls = p
                    .neighbors_8()
                    .into_iter()
                    .filter(|&n| graph.idx(n).is_some_and(|i| snapshot[i]))
                    .count();
                let blocked = match graph.idx(p) {
                    Some(i) if snapshot[i] => walls >= 3,
                    _ => walls > 4,
                };
                let status = if blocked {
                    CellStatus::Blocked
                } else {
                    CellStatus::Empty
                };
                graph.set_status(p, status);
            }
        }
    }

    /// An outward rectangular spiral corridor starting at `(W/4, H/4)`.
    ///
    /// Each move carves three cells; the number of moves per arm grows by two
    /// after every second turn. Stops once the walker leaves the grid.
    pub fn spiral(&mut self, graph: &mut CellGraph, start: Point, goal: Point) {
        graph.reset_search();
        fill(graph, CellStatus::Blocked, start, goal);
        let keep = [start, goal];

        let mut pos = Point::new(graph.width() / 4, graph.height() / 4);
        let mut dir = 0;
        let mut moves = 2;
        while graph.contains(pos) {
            let (dx, dy) = SPIRAL_DIRS[dir];
            for _ in 0..moves {
                for i in 0..3 {
                    let p = pos.shift(dx * i, dy * i);
                    if !keep.contains(&p) {
                        graph.set_status(p, CellStatus::Empty);
                    }
                }
                pos = pos.shift(dx * 3, dy * 3);
                if !graph.contains(pos) {
                    break;
                }
            }
            dir = (dir + 1) % SPIRAL_DIRS.len();
            if dir % 2 == 0 {
                moves += 2;
            }
        }
    }
}

/// Set every cell except `start` and `goal` to `status`.
fn fill(graph: &mut CellGraph, status: CellStatus, start: Point, goal: Point) {
    for p in graph.bounds() {
        if p != start && p != goal {
            graph.set_status(p, status);
        }
    }
}

/// In-bounds cells two cardinal steps from `p` whose status passes `pred`.
fn lattice_neighbors(graph: &CellGraph, p: Point, pred: impl Fn(CellStatus) -> bool) -> Vec<Point> {
    LATTICE
        .iter()
        .map(|&(dx, dy)| p.shift(dx, dy))
        .filter(|&n| graph.status(n).is_some_and(&pred))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(w: i32, h: i32) -> (CellGraph, Point, Point) {
        let g = CellGraph::new(w, h);
        let (s, t) = g.corner_endpoints();
        (g, s, t)
    }

    fn assert_endpoints_intact(g: &CellGraph, s: Point, t: Point) {
        assert_eq!(g.status(s), Some(CellStatus::Start));
        assert_eq!(g.status(t), Some(CellStatus::Target));
        assert_eq!(g.iter().filter(|c| c.is_target()).count(), 1);
        assert_eq!(g.iter().filter(|c| c.status() == CellStatus::Start).count(), 1);
    }

    #[test]
    fn full_density_blocks_everything_else() {
        let (mut g, s, t) = graph(20, 20);
        let cfg = MazeConfig {
            density: 1.0,
            ..MazeConfig::default()
        };
        let mut mg = MazeGen::from_seed(7, cfg);
        mg.generate(MazeKind::RandomObstacles, &mut g, s, t).unwrap();
        assert_eq!(g.blocked_count(), 398);
        assert_endpoints_intact(&g, s, t);

        mg.config.density = 0.0;
        mg.generate(MazeKind::RandomObstacles, &mut g, s, t).unwrap();
        assert_eq!(g.blocked_count(), 0);
    }

    #[test]
    fn same_seed_same_layout() {
        let layout = |seed| {
            let (mut g, s, t) = graph(30, 20);
            let mut mg = MazeGen::from_seed(seed, MazeConfig::default());
            mg.generate(MazeKind::CellularAutomata, &mut g, s, t).unwrap();
            g.iter().map(|c| c.status()).collect::<Vec<_>>()
        };
        assert_eq!(layout(42), layout(42));
    }

    #[test]
    fn recursive_division_keeps_endpoints_connected() {
        for seed in 0..32 {
            for (w, h) in [(10, 10), (40, 30), (7, 13)] {
                let (mut g, s, t) = graph(w, h);
                let mut mg = MazeGen::from_seed(seed, MazeConfig::default());
                mg.generate(MazeKind::RecursiveDivision, &mut g, s, t).unwrap();
                assert!(g.blocked_count() > 0, "seed {seed} on {w}x{h}");
                assert!(g.connected(s, t), "seed {seed} on {w}x{h}");
                assert_endpoints_intact(&g, s, t);
            }
        }
    }

    #[test]
    fn prim_carves_one_tree() {
        for seed in 0..16 {
            let (mut g, s, t) = graph(21, 15);
            let mut mg = MazeGen::from_seed(seed, MazeConfig::default());
            mg.generate(MazeKind::Prim, &mut g, s, t).unwrap();
            assert_endpoints_intact(&g, s, t);

            let empty: Vec<Point> = g
                .iter()
                .filter(|c| c.status() == CellStatus::Empty)
                .map(|c| c.pos())
                .collect();
            assert!(empty.len() > 1);
            let reach = g.reachable(empty[0]);
            assert!(empty.iter().all(|&p| reach[g.idx(p).unwrap()]));
        }
    }

    #[test]
    fn prim_on_thin_grid_stays_blocked() {
        let mut g = CellGraph::new(2, 5);
        let (s, t) = (Point::new(0, 0), Point::new(1, 4));
        let mut mg = MazeGen::from_seed(1, MazeConfig::default());
        mg.generate(MazeKind::Prim, &mut g, s, t).unwrap();
        assert_eq!(g.blocked_count(), 8);
    }

    #[test]
    fn cellular_automata_extremes() {
        let (mut g, s, t) = graph(10, 10);
        let mut mg = MazeGen::from_seed(
            3,
            MazeConfig {
                ca_fill: 1.0,
                ..MazeConfig::default()
            },
        );
        mg.generate(MazeKind::CellularAutomata, &mut g, s, t).unwrap();
        assert_eq!(g.blocked_count(), 98);

        mg.config.ca_fill = 0.0;
        mg.generate(MazeKind::CellularAutomata, &mut g, s, t).unwrap();
        assert_eq!(g.blocked_count(), 0);
    }

    #[test]
    fn spiral_layout() {
        let (mut g, s, t) = graph(40, 30);
        let mut mg = MazeGen::from_seed(0, MazeConfig::default());
        mg.generate(MazeKind::Spiral, &mut g, s, t).unwrap();
        for (x, y) in [(10, 7), (12, 7), (15, 7), (16, 9), (16, 12)] {
            assert_eq!(g.status(Point::new(x, y)), Some(CellStatus::Empty), "({x}, {y})");
        }
        assert!(g.is_blocked(Point::new(11, 8)));
        assert!(g.is_blocked(Point::new(0, 29)));
        assert_endpoints_intact(&g, s, t);
    }

    #[test]
    fn generation_clears_search_state() {
        let (mut g, s, t) = graph(12, 12);
        g.place_endpoints(s, t).unwrap();
        let i = g.idx(Point::new(5, 5)).unwrap();
        g.cell_at_mut(i).g = 3.0;
        g.mark_search(i, CellStatus::Closed);
        let mut mg = MazeGen::from_seed(9, MazeConfig::default());
        for kind in MazeKind::ALL {
            mg.generate(kind, &mut g, s, t).unwrap();
            assert!(g.iter().all(|c| !c.status().is_search_mark()), "{kind}");
            assert!(g.iter().all(|c| c.g.is_infinite()), "{kind}");
            assert_endpoints_intact(&g, s, t);
        }
    }

    #[test]
    fn invalid_endpoints_leave_graph_alone() {
        let (mut g, s, t) = graph(10, 10);
        let mut mg = MazeGen::from_seed(5, MazeConfig::default());
        mg.generate(MazeKind::RandomObstacles, &mut g, s, t).unwrap();
        let before: Vec<_> = g.iter().map(|c| c.status()).collect();
        let err = mg.generate(MazeKind::Spiral, &mut g, Point::new(10, 0), t);
        assert!(matches!(err, Err(ConfigError::OutOfBounds { .. })));
        let err = mg.generate(MazeKind::Spiral, &mut g, t, t);
        assert_eq!(err, Err(ConfigError::CoincidentEndpoints(t)));
        let after: Vec<_> = g.iter().map(|c| c.status()).collect();
        assert_eq!(before, after);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let cfg = MazeConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: MazeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
