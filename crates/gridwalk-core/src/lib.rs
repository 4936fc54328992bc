//! **gridwalk-core** — the cell graph shared by the gridwalk search engine
//! and maze generators.
//!
//! This crate provides geometry primitives, the [`Cell`] model with its
//! display status and search bookkeeping, and the fixed-size [`CellGraph`]
//! with precomputed 8-directional adjacency.

pub mod cell;
pub mod distance;
mod error;
pub mod geom;
pub mod graph;

pub use cell::{Cell, CellStatus, Visit};
pub use distance::{distance, heuristic, manhattan};
pub use error::ConfigError;
pub use geom::{Point, Range};
pub use graph::{CellGraph, GridConfig};
