//! The [`Cell`] type: one grid position with its display status and the
//! per-search bookkeeping written by the search engine.

use std::fmt;

use crate::geom::Point;

/// Display status of a cell.
///
/// `Active` marks frontier cells and `Closed` expanded ones; both are
/// search-only and reverted to `Empty` by [`CellGraph::reset_search`].
///
/// [`CellGraph::reset_search`]: crate::CellGraph::reset_search
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellStatus {
    #[default]
    Empty,
    Blocked,
    Start,
    Target,
    Active,
    Closed,
    Path,
}

impl CellStatus {
    /// Whether the status only exists while a search is shown.
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(self, Self::Active | Self::Closed | Self::Path)
    }

    /// Whether the status belongs to one of the two endpoints.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::Target)
    }

    /// One-character glyph used by text renderers.
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Blocked => '#',
            Self::Start => 'S',
            Self::Target => 'G',
            Self::Active => 'o',
            Self::Closed => 'x',
            Self::Path => '*',
        }
    }
}

impl fmt::Display for CellStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Empty => "empty",
            Self::Blocked => "blocked",
            Self::Start => "start",
            Self::Target => "target",
            Self::Active => "active",
            Self::Closed => "closed",
            Self::Path => "path",
        };
        f.write_str(s)
    }
}

/// Search membership of a cell: not discovered, in the frontier, or
/// already expanded.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visit {
    #[default]
    Unseen,
    Open,
    Closed,
}

/// A single grid cell.
///
/// Position and neighbour list are fixed at graph construction. Status and
/// the target flag change only through [`CellGraph`](crate::CellGraph);
/// the public fields are search bookkeeping. Costs start at positive
/// infinity and are only meaningful for the search that wrote them.
///
/// ```compile_fail
/// use gridwalk_core::{CellGraph, CellStatus};
///
/// let mut graph = CellGraph::new(3, 3);
/// graph.cell_at_mut(4).status = CellStatus::Blocked;
/// ```
#[derive(Clone, Debug)]
pub struct Cell {
    pos: Point,
    neighbors: Vec<Point>,
    pub(crate) status: CellStatus,
    pub(crate) is_target: bool,
    pub parent: Option<Point>,
    pub g: f64,
    pub h: f64,
    pub f: f64,
    pub visit: Visit,
}

impl Cell {
    pub(crate) fn new(pos: Point, neighbors: Vec<Point>) -> Self {
        Self {
            pos,
            neighbors,
            status: CellStatus::Empty,
            is_target: false,
            parent: None,
            g: f64::INFINITY,
            h: f64::INFINITY,
            f: f64::INFINITY,
            visit: Visit::Unseen,
        }
    }

    /// Grid coordinate of the cell.
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// In-bounds 8-neighbours, in [`Point::neighbors_8`] order.
    #[inline]
    pub fn neighbors(&self) -> &[Point] {
        &self.neighbors
    }

    #[inline]
    pub fn status(&self) -> CellStatus {
        self.status
    }

    /// Whether this is the goal cell.
    #[inline]
    pub fn is_target(&self) -> bool {
        self.is_target
    }

    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.status == CellStatus::Blocked
    }

    /// Restore parent, costs and visit flag. Status and target flag are kept.
    pub fn reset_search_fields(&mut self) {
        self.parent = None;
        self.g = f64::INFINITY;
        self.h = f64::INFINITY;
        self.f = f64::INFINITY;
        self.visit = Visit::Unseen;
    }
}
