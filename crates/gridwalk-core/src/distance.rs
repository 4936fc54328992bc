//! Integer distances on the 8-connected grid.

use crate::geom::Point;

/// Cost of a horizontal or vertical step.
pub const CARDINAL_COST: u32 = 10;

/// Cost of a diagonal step (≈ 10·√2).
pub const DIAGONAL_COST: u32 = 14;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Edge weight between two adjacent cells: 14 when both coordinates change,
/// 10 otherwise.
#[inline]
pub fn distance(a: Point, b: Point) -> u32 {
    if (a.x - b.x).abs() == 1 && (a.y - b.y).abs() == 1 {
        DIAGONAL_COST
    } else {
        CARDINAL_COST
    }
}

/// Heuristic estimate used by the informed searches: Manhattan distance
/// scaled to step cost.
///
/// Not admissible under diagonal movement (it overestimates diagonal runs).
#[inline]
pub fn heuristic(from: Point, to: Point) -> f64 {
    f64::from(manhattan(from, to)) * f64::from(CARDINAL_COST)
}
