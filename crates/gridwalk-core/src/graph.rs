//! The [`CellGraph`]: a fixed-size grid of [`Cell`]s with precomputed
//! 8-directional adjacency.

use crate::cell::{Cell, CellStatus};
use crate::error::ConfigError;
use crate::geom::{Point, Range};

/// Grid dimensions and initial endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    pub width: i32,
    pub height: i32,
    pub start: Point,
    pub goal: Point,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 30,
            start: Point::new(2, 2),
            goal: Point::new(38, 28),
        }
    }
}

/// A fixed-size grid of cells.
///
/// Cells are stored row-major. Each cell's neighbour list is computed once
/// in [`new`](Self::new); blocking a cell never removes edges, searches
/// simply refuse to step onto blocked cells.
///
/// Once [`place_endpoints`](Self::place_endpoints) has been called, exactly
/// one cell has status [`CellStatus::Start`] and exactly one cell has
/// `is_target` set.
#[derive(Debug, Clone)]
pub struct CellGraph {
    bounds: Range,
    width: usize,
    cells: Vec<Cell>,
    start: Option<Point>,
    goal: Option<Point>,
    revision: u64,
}

impl CellGraph {
    /// Build a `width` × `height` graph of empty cells.
    ///
    /// Non-positive dimensions produce an empty graph.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::with_size(0, 0, width, height);
        let cells = bounds
            .iter()
            .map(|p| {
                let neighbors = p
                    .neighbors_8()
                    .into_iter()
                    .filter(|&n| bounds.contains(n))
                    .collect();
                Cell::new(p, neighbors)
            })
            .collect();
        Self {
            bounds,
            width: bounds.width() as usize,
            cells,
            start: None,
            goal: None,
            revision: 0,
        }
    }

    /// Build a graph from `config` and place its endpoints.
    pub fn from_config(config: &GridConfig) -> Result<Self, ConfigError> {
        let mut graph = Self::new(config.width, config.height);
        graph.place_endpoints(config.start, config.goal)?;
        Ok(graph)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Convert a `Point` to a flat index. Returns `None` if out of bounds.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width + p.x as usize)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        Point::new((idx % self.width) as i32, (idx / self.width) as i32)
    }

    #[inline]
    pub fn cell(&self, p: Point) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// Cell at flat index `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn cell_at(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    /// Mutable cell at flat index `idx`, for search bookkeeping. Status and
    /// the target flag are read-only here; see [`set_status`](Self::set_status)
    /// and [`place_endpoints`](Self::place_endpoints).
    #[inline]
    pub fn cell_at_mut(&mut self, idx: usize) -> &mut Cell {
        &mut self.cells[idx]
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Status of the cell at `p`, if in bounds.
    #[inline]
    pub fn status(&self, p: Point) -> Option<CellStatus> {
        self.cell(p).map(|c| c.status)
    }

    #[inline]
    pub fn is_blocked(&self, p: Point) -> bool {
        self.cell(p).is_some_and(Cell::is_blocked)
    }

    /// Append the indices of the neighbours of cell `idx` to `buf`.
    /// The caller clears `buf` before calling.
    pub fn neighbor_indices(&self, idx: usize, buf: &mut Vec<usize>) {
        for &n in self.cells[idx].neighbors() {
            buf.push(n.y as usize * self.width + n.x as usize);
        }
    }

    /// Start position, once endpoints have been placed.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// Goal position, once endpoints have been placed.
    #[inline]
    pub fn goal(&self) -> Option<Point> {
        self.goal
    }

    #[inline]
    pub fn is_endpoint(&self, p: Point) -> bool {
        self.start == Some(p) || self.goal == Some(p)
    }

    /// Counter bumped by every structural edit: blocking or unblocking a
    /// cell, or moving an endpoint. Search marks do not change it.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Set the status of the cell at `p`.
    ///
    /// Returns `true` if the cell changed. Out-of-bounds positions, unchanged
    /// statuses, endpoint cells and the endpoint statuses themselves are
    /// no-ops: endpoints move through [`place_endpoints`](Self::place_endpoints).
    pub fn set_status(&mut self, p: Point, status: CellStatus) -> bool {
        if status.is_endpoint() || self.is_endpoint(p) {
            return false;
        }
        let Some(i) = self.idx(p) else {
            return false;
        };
        let old = self.cells[i].status;
        if old == status {
            return false;
        }
        if old == CellStatus::Blocked || status == CellStatus::Blocked {
            self.revision += 1;
        }
        self.cells[i].status = status;
        true
    }

    /// Paint a search-only status (`Active`, `Closed`, `Path`) on cell `idx`.
    ///
    /// Endpoint and blocked cells keep their status. Returns `true` if the
    /// cell changed.
    pub fn mark_search(&mut self, idx: usize, status: CellStatus) -> bool {
        let cell = &mut self.cells[idx];
        if !status.is_search_mark()
            || cell.status.is_endpoint()
            || cell.status == CellStatus::Blocked
            || cell.status == status
        {
            return false;
        }
        cell.status = status;
        true
    }

    /// Paint `path` onto the grid, leaving endpoints untouched.
    pub fn mark_path(&mut self, path: &[Point]) {
        for &p in path {
            if let Some(i) = self.idx(p) {
                self.mark_search(i, CellStatus::Path);
            }
        }
    }

    /// Reset parent, costs and visit flag of the cell at `p`.
    pub fn reset_search_fields(&mut self, p: Point) {
        if let Some(i) = self.idx(p) {
            self.cells[i].reset_search_fields();
        }
    }

    /// Reset every cell's search fields and revert search marks to `Empty`.
    pub fn reset_search(&mut self) {
        for cell in &mut self.cells {
            cell.reset_search_fields();
            if cell.status.is_search_mark() {
                cell.status = CellStatus::Empty;
            }
        }
    }

    /// Turn every blocked cell back into an empty one.
    pub fn clear_obstacles(&mut self) {
        self.reset_search();
        for cell in &mut self.cells {
            if cell.status == CellStatus::Blocked {
                cell.status = CellStatus::Empty;
                self.revision += 1;
            }
        }
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_blocked()).count()
    }

    /// Move the endpoints to `start` and `goal`.
    ///
    /// Old endpoint cells become empty; the new ones take the `Start` and
    /// `Target` statuses even if they were blocked. On error nothing changes.
    pub fn place_endpoints(&mut self, start: Point, goal: Point) -> Result<(), ConfigError> {
        let (si, gi) = self.check_endpoints(start, goal)?;
        self.reset_search();
        for old in [self.start.take(), self.goal.take()].into_iter().flatten() {
            if let Some(i) = self.idx(old) {
                let cell = &mut self.cells[i];
                cell.status = CellStatus::Empty;
                cell.is_target = false;
            }
        }
        self.cells[si].status = CellStatus::Start;
        let goal_cell = &mut self.cells[gi];
        goal_cell.status = CellStatus::Target;
        goal_cell.is_target = true;
        self.start = Some(start);
        self.goal = Some(goal);
        self.revision += 1;
        log::debug!("endpoints placed: start {start}, goal {goal}");
        Ok(())
    }

    /// Validate a start/goal pair, returning their indices.
    pub fn check_endpoints(&self, start: Point, goal: Point) -> Result<(usize, usize), ConfigError> {
        let si = self.idx(start).ok_or(ConfigError::OutOfBounds {
            pos: start,
            size: self.size(),
        })?;
        let gi = self.idx(goal).ok_or(ConfigError::OutOfBounds {
            pos: goal,
            size: self.size(),
        })?;
        if si == gi {
            return Err(ConfigError::CoincidentEndpoints(start));
        }
        Ok((si, gi))
    }

    /// Endpoints two cells in from opposite corners, as used before
    /// generating a maze. Clamped into the grid for very small sizes.
    pub fn corner_endpoints(&self) -> (Point, Point) {
        let clamp = |v: i32, hi: i32| v.clamp(0, (hi - 1).max(0));
        let (w, h) = (self.width(), self.height());
        (
            Point::new(clamp(2, w), clamp(2, h)),
            Point::new(clamp(w - 3, w), clamp(h - 3, h)),
        )
    }

    /// Flood-fill the non-blocked cells 8-connected to `from`.
    ///
    /// Returns a per-index reachability mask; all `false` if `from` is out of
    /// bounds or blocked.
    pub fn reachable(&self, from: Point) -> Vec<bool> {
        let mut seen = vec![false; self.cells.len()];
        let Some(si) = self.idx(from) else {
            return seen;
        };
        if self.cells[si].is_blocked() {
            return seen;
        }

        let mut stack = vec![si];
        let mut nbuf = Vec::with_capacity(8);
        seen[si] = true;
        while let Some(ci) = stack.pop() {
            nbuf.clear();
            self.neighbor_indices(ci, &mut nbuf);
            for &ni in &nbuf {
                if !seen[ni] && !self.cells[ni].is_blocked() {
                    seen[ni] = true;
                    stack.push(ni);
                }
            }
        }
        seen
    }

    /// Whether `a` and `b` are joined by a path of non-blocked cells.
    pub fn connected(&self, a: Point, b: Point) -> bool {
        match self.idx(b) {
            Some(bi) => self.reachable(a)[bi],
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Visit;

    #[test]
    fn build_computes_neighbors() {
        let g = CellGraph::new(4, 3);
        assert_eq!(g.len(), 12);
        assert_eq!(g.cell(Point::new(0, 0)).unwrap().neighbors().len(), 3);
        assert_eq!(g.cell(Point::new(1, 0)).unwrap().neighbors().len(), 5);
        assert_eq!(g.cell(Point::new(1, 1)).unwrap().neighbors().len(), 8);
        assert!(g.iter().all(|c| c.status == CellStatus::Empty && c.g.is_infinite()));
    }

    #[test]
    fn adjacency_is_symmetric() {
        let g = CellGraph::new(5, 4);
        for c in g.iter() {
            for &n in c.neighbors() {
                assert!(g.cell(n).unwrap().neighbors().contains(&c.pos()));
            }
        }
    }

    #[test]
    fn empty_dimensions() {
        let g = CellGraph::new(0, 7);
        assert!(g.is_empty());
        assert_eq!(g.idx(Point::ZERO), None);
        let g = CellGraph::new(-3, -3);
        assert!(g.is_empty());
    }

    #[test]
    fn idx_point_round_trip() {
        let g = CellGraph::new(7, 5);
        for p in g.bounds() {
            assert_eq!(g.point(g.idx(p).unwrap()), p);
        }
        assert_eq!(g.idx(Point::new(7, 0)), None);
        assert_eq!(g.idx(Point::new(0, -1)), None);
    }

    #[test]
    fn set_status_reports_changes() {
        let mut g = CellGraph::new(3, 3);
        let p = Point::new(1, 1);
        let rev = g.revision();
        assert!(g.set_status(p, CellStatus::Blocked));
        assert!(!g.set_status(p, CellStatus::Blocked));
        assert!(g.revision() > rev);
        assert!(!g.set_status(Point::new(9, 9), CellStatus::Blocked));
        assert!(!g.set_status(p, CellStatus::Start));
    }

    #[test]
    fn search_marks_do_not_bump_revision() {
        let mut g = CellGraph::new(3, 3);
        let rev = g.revision();
        assert!(g.set_status(Point::new(0, 1), CellStatus::Active));
        assert!(g.mark_search(0, CellStatus::Closed));
        assert_eq!(g.revision(), rev);
    }

    #[test]
    fn bookkeeping_writes_leave_status_alone() {
        let mut g = CellGraph::from_config(&GridConfig {
            width: 4,
            height: 4,
            start: Point::new(0, 0),
            goal: Point::new(3, 3),
        })
        .unwrap();
        let rev = g.revision();
        let c = g.cell_at_mut(5);
        c.g = 20.0;
        c.parent = Some(Point::new(0, 0));
        c.visit = Visit::Closed;
        assert_eq!(g.revision(), rev);
        assert_eq!(g.cell_at(5).status(), CellStatus::Empty);

        assert!(g.set_status(Point::new(1, 1), CellStatus::Blocked));
        assert_eq!(g.cell_at(5).status(), CellStatus::Blocked);
        assert!(g.revision() > rev);
        let targets: Vec<_> = g.iter().filter(|c| c.is_target()).map(|c| c.pos()).collect();
        assert_eq!(targets, vec![Point::new(3, 3)]);
    }

    #[test]
    fn reset_keeps_status_and_target() {
        let mut g = CellGraph::from_config(&GridConfig {
            width: 4,
            height: 4,
            start: Point::new(0, 0),
            goal: Point::new(3, 3),
        })
        .unwrap();
        g.set_status(Point::new(1, 1), CellStatus::Blocked);
        for i in 0..g.len() {
            let c = g.cell_at_mut(i);
            c.g = 3.0;
            c.h = 4.0;
            c.f = 7.0;
            c.parent = Some(Point::ZERO);
            c.visit = Visit::Closed;
        }
        let before: Vec<_> = g.iter().map(|c| (c.status, c.is_target)).collect();
        for p in g.bounds() {
            g.reset_search_fields(p);
        }
        for (c, (status, target)) in g.iter().zip(before) {
            assert!(c.g.is_infinite() && c.h.is_infinite() && c.f.is_infinite());
            assert_eq!(c.parent, None);
            assert_eq!(c.visit, Visit::Unseen);
            assert_eq!(c.status, status);
            assert_eq!(c.is_target, target);
        }
    }

    #[test]
    fn reset_search_clears_marks_only() {
        let mut g = CellGraph::new(3, 1);
        g.set_status(Point::new(0, 0), CellStatus::Blocked);
        g.set_status(Point::new(1, 0), CellStatus::Closed);
        g.set_status(Point::new(2, 0), CellStatus::Path);
        g.reset_search();
        assert_eq!(g.status(Point::new(0, 0)), Some(CellStatus::Blocked));
        assert_eq!(g.status(Point::new(1, 0)), Some(CellStatus::Empty));
        assert_eq!(g.status(Point::new(2, 0)), Some(CellStatus::Empty));
    }

    #[test]
    fn relocating_endpoints_keeps_single_target() {
        let mut g = CellGraph::from_config(&GridConfig::default()).unwrap();
        g.set_status(Point::new(10, 10), CellStatus::Blocked);
        g.place_endpoints(Point::new(5, 5), Point::new(10, 10)).unwrap();
        assert_eq!(g.iter().filter(|c| c.is_target).count(), 1);
        assert_eq!(g.iter().filter(|c| c.status == CellStatus::Start).count(), 1);
        assert_eq!(g.status(Point::new(2, 2)), Some(CellStatus::Empty));
        assert_eq!(g.status(Point::new(10, 10)), Some(CellStatus::Target));
        assert!(g.cell(Point::new(10, 10)).unwrap().is_target);
        assert_eq!(g.start(), Some(Point::new(5, 5)));
        assert_eq!(g.goal(), Some(Point::new(10, 10)));
    }

    #[test]
    fn invalid_endpoints_leave_graph_untouched() {
        let mut g = CellGraph::from_config(&GridConfig::default()).unwrap();
        let rev = g.revision();
        let err = g.place_endpoints(Point::new(50, 0), Point::new(1, 1));
        assert!(matches!(err, Err(ConfigError::OutOfBounds { .. })));
        let err = g.place_endpoints(Point::new(1, 1), Point::new(1, 1));
        assert_eq!(err, Err(ConfigError::CoincidentEndpoints(Point::new(1, 1))));
        assert_eq!(g.revision(), rev);
        assert_eq!(g.start(), Some(Point::new(2, 2)));
    }

    #[test]
    fn endpoint_cells_resist_edits() {
        let mut g = CellGraph::from_config(&GridConfig::default()).unwrap();
        assert!(!g.set_status(Point::new(2, 2), CellStatus::Blocked));
        let gi = g.idx(Point::new(38, 28)).unwrap();
        assert!(!g.mark_search(gi, CellStatus::Closed));
        assert_eq!(g.status(Point::new(38, 28)), Some(CellStatus::Target));
    }

    #[test]
    fn flood_fill_respects_walls() {
        let mut g = CellGraph::new(5, 5);
        for y in 0..5 {
            g.set_status(Point::new(2, y), CellStatus::Blocked);
        }
        assert!(!g.connected(Point::new(0, 0), Point::new(4, 4)));
        g.set_status(Point::new(2, 2), CellStatus::Empty);
        assert!(g.connected(Point::new(0, 0), Point::new(4, 4)));
        assert!(!g.connected(Point::new(0, 0), Point::new(9, 9)));
    }

    #[test]
    fn clear_obstacles_unblocks() {
        let mut g = CellGraph::new(3, 3);
        g.set_status(Point::new(1, 1), CellStatus::Blocked);
        g.set_status(Point::new(2, 1), CellStatus::Blocked);
        assert_eq!(g.blocked_count(), 2);
        g.clear_obstacles();
        assert_eq!(g.blocked_count(), 0);
    }

    #[test]
    fn corner_endpoints_default_grid() {
        let g = CellGraph::new(40, 30);
        assert_eq!(g.corner_endpoints(), (Point::new(2, 2), Point::new(37, 27)));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_config_round_trip() {
        let cfg = GridConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: GridConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn status_round_trip() {
        let json = serde_json::to_string(&CellStatus::Blocked).unwrap();
        let back: CellStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CellStatus::Blocked);
    }
}
