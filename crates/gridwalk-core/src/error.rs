use std::fmt;

use crate::geom::Point;

/// Errors raised when endpoints do not describe a valid search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A position lies outside the grid.
    OutOfBounds { pos: Point, size: Point },
    /// Start and goal are the same cell.
    CoincidentEndpoints(Point),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos, size } => write!(
                f,
                "invalid configuration: {pos} is outside the {}x{} grid",
                size.x, size.y
            ),
            Self::CoincidentEndpoints(p) => {
                write!(f, "invalid configuration: start and goal are both {p}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
