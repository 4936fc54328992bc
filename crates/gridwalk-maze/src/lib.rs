//! Obstacle layouts for a gridwalk [`CellGraph`](gridwalk_core::CellGraph).
//!
//! [`MazeGen`] owns a random number generator and offers five generators:
//! - **Random Obstacles**: an independent coin flip per cell.
//! - **Recursive Division**: walls with one passage each, splitting the grid
//!   into ever smaller rooms. The only layout that always keeps start and
//!   goal connected.
//! - **Prim's Algorithm**: a randomized spanning tree carved on a lattice
//!   of every other cell.
//! - **Cellular Automata**: random noise smoothed into caves.
//! - **Spiral**: a fixed outward spiral corridor.
//!
//! No generator ever changes the status of the start or goal cell.

mod kind;
mod mapgen;

pub use kind::{MazeKind, ParseMazeError};
pub use mapgen::{MazeConfig, MazeGen};
