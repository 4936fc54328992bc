//! Incremental pathfinding over a [`CellGraph`](gridwalk_core::CellGraph).
//!
//! Every strategy is a resumable state machine that performs exactly one
//! pop-expand-push cycle per [`SearchEngine::step`], so a driver can pace,
//! render or abandon a search between any two steps:
//!
//! - **A\***, ordered by `(f, h)`
//! - **Dijkstra**, ordered by `g` with a flat edge weight
//! - **Breadth-first** and **depth-first** over a queue and a stack
//! - **Greedy best-first**, ordered by `h`
//! - **Bidirectional** A* from both ends, meeting in the middle
//! - **IDA\***, A* under a rising `f` threshold
//! - **Swarm**, A* biased by per-cell pheromone
//!
//! Strategies write their costs, parents and search marks straight into the
//! graph's cells, which is what a presentation layer reads after each step.
//! The strategy types implement [`Strategy`] and can also be driven without
//! the engine.
//!
//! # Lifecycle
//!
//! | Call | State afterwards |
//! |---|---|
//! | [`SearchEngine::start`] | [`SearchState::Running`] |
//! | [`SearchEngine::step`] | `Running`, [`SearchState::Succeeded`] or [`SearchState::Exhausted`] |
//! | [`SearchEngine::cancel`], or a graph edit seen by `step` | [`SearchState::Idle`] |

mod algorithm;
mod astar;
mod bfs;
mod bidirectional;
mod config;
mod dfs;
mod dijkstra;
mod engine;
mod error;
mod frontier;
mod greedy;
mod idastar;
mod swarm;
mod traits;

pub use algorithm::{Algorithm, Category, ParseAlgorithmError};
pub use astar::AStar;
pub use bfs::BreadthFirst;
pub use bidirectional::Bidirectional;
pub use config::SearchConfig;
pub use dfs::DepthFirst;
pub use dijkstra::Dijkstra;
pub use engine::{SearchEngine, SearchState, SearchStats, StepResult, path_cost};
pub use error::SearchError;
pub use greedy::Greedy;
pub use idastar::IdaStar;
pub use swarm::Swarm;
pub use traits::{Advance, Strategy};
