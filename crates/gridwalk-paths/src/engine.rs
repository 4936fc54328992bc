use std::fmt;

use gridwalk_core::{CellGraph, Point, distance};

use crate::astar::AStar;
use crate::bfs::BreadthFirst;
use crate::bidirectional::Bidirectional;
use crate::dfs::DepthFirst;
use crate::dijkstra::Dijkstra;
use crate::greedy::Greedy;
use crate::idastar::IdaStar;
use crate::swarm::Swarm;
use crate::traits::{Advance, Strategy};
use crate::{Algorithm, SearchConfig, SearchError};

/// Lifecycle of a [`SearchEngine`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SearchState {
    #[default]
    Idle,
    Running,
    Succeeded,
    Exhausted,
}

impl SearchState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Exhausted)
    }
}

/// What a single [`SearchEngine::step`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepResult {
    /// Cell expanded by this step. On success, the goal (or the meeting
    /// cell for bidirectional search).
    pub current: Option<Point>,
    pub terminal: bool,
    pub succeeded: bool,
}

/// Counters for the running or last finished search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// `step` calls that did work.
    pub steps: usize,
    /// Cells moved into a closed set.
    pub expanded: usize,
    /// Cells on the found path, endpoints included.
    pub path_len: usize,
}

/// Drives one search at a time over a borrowed [`CellGraph`].
///
/// ```
/// use gridwalk_core::{CellGraph, Point};
/// use gridwalk_paths::{Algorithm, SearchEngine};
///
/// let mut graph = CellGraph::new(5, 5);
/// let mut engine = SearchEngine::default();
/// engine
///     .start(&mut graph, Algorithm::AStar, Point::new(0, 0), Point::new(4, 4))
///     .unwrap();
/// while !engine.step(&mut graph).terminal {}
/// let path = engine.reconstruct_path(&graph).unwrap();
/// assert_eq!(gridwalk_paths::path_cost(&path), 56);
/// ```
pub struct SearchEngine {
    config: SearchConfig,
    strategy: Option<Box<dyn Strategy>>,
    state: SearchState,
    last: StepResult,
    path: Option<Vec<Point>>,
    revision: u64,
    stats: SearchStats,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchEngine")
            .field("algorithm", &self.algorithm())
            .field("state", &self.state)
            .field("last", &self.last)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            strategy: None,
            state: SearchState::Idle,
            last: StepResult::default(),
            path: None,
            revision: 0,
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Algorithm of the current or last search.
    pub fn algorithm(&self) -> Option<Algorithm> {
        self.strategy.as_ref().map(|s| s.algorithm())
    }

    /// Result of the most recent step.
    pub fn last(&self) -> StepResult {
        self.last
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Begin a new search, discarding any previous one.
    ///
    /// Both positions are validated before the graph is touched; on error
    /// neither the engine nor the graph changes.
    pub fn start(
        &mut self,
        graph: &mut CellGraph,
        algorithm: Algorithm,
        start: Point,
        goal: Point,
    ) -> Result<(), SearchError> {
        let (si, gi) = graph.check_endpoints(start, goal)?;

        graph.reset_search();
        let mut strategy = self.build(algorithm, graph.len());
        strategy.begin(graph, si, gi);

        self.strategy = Some(strategy);
        self.state = SearchState::Running;
        self.last = StepResult::default();
        self.path = None;
        self.revision = graph.revision();
        self.stats = SearchStats::default();
        log::debug!("{algorithm} started: {start} -> {goal}");
        Ok(())
    }

    fn build(&self, algorithm: Algorithm, len: usize) -> Box<dyn Strategy> {
        match algorithm {
            Algorithm::AStar => Box::new(AStar::new(len)),
            Algorithm::Dijkstra => Box::new(Dijkstra::new(len)),
            Algorithm::BreadthFirst => Box::new(BreadthFirst::new(len)),
            Algorithm::DepthFirst => Box::new(DepthFirst::new(len)),
            Algorithm::Greedy => Box::new(Greedy::new(len)),
            Algorithm::Bidirectional => Box::new(Bidirectional::new(len)),
            Algorithm::IdaStar => Box::new(IdaStar::new(len, self.config.ida_max_restarts)),
            Algorithm::Swarm => Box::new(Swarm::new(len, self.config.swarm_reinforcement)),
        }
    }

    /// Perform one unit of work.
    ///
    /// Idle engines return the default result. If the graph was edited
    /// since [`start`](Self::start), the search is cancelled, running or
    /// finished, and the idle result returned. Otherwise a terminal engine
    /// returns its terminal result again without doing anything.
    pub fn step(&mut self, graph: &mut CellGraph) -> StepResult {
        if self.state == SearchState::Idle {
            return StepResult::default();
        }
        if graph.revision() != self.revision {
            log::debug!("graph edited since search start, discarding search state");
            self.cancel(graph);
            return StepResult::default();
        }
        if self.state.is_terminal() {
            return self.last;
        }
        let Some(strategy) = self.strategy.as_mut() else {
            self.state = SearchState::Idle;
            return StepResult::default();
        };

        let advance = strategy.advance(graph);
        self.stats.steps += 1;
        self.stats.expanded = strategy.expanded();

        let result = match advance {
            Advance::Continue(ci) => StepResult {
                current: ci.map(|i| graph.point(i)),
                terminal: false,
                succeeded: false,
            },
            Advance::Found(i) => {
                let path = strategy.path(graph, i);
                self.stats.path_len = path.len();
                self.path = Some(path);
                self.state = SearchState::Succeeded;
                log::debug!(
                    "{} succeeded after {} steps ({} cells expanded, path of {})",
                    strategy.algorithm(),
                    self.stats.steps,
                    self.stats.expanded,
                    self.stats.path_len
                );
                StepResult {
                    current: Some(graph.point(i)),
                    terminal: true,
                    succeeded: true,
                }
            }
            Advance::Exhausted => {
                self.state = SearchState::Exhausted;
                log::debug!(
                    "{} exhausted after {} steps ({} cells expanded)",
                    strategy.algorithm(),
                    self.stats.steps,
                    self.stats.expanded
                );
                StepResult {
                    current: None,
                    terminal: true,
                    succeeded: false,
                }
            }
        };
        log::trace!("step {}: {result:?}", self.stats.steps);
        self.last = result;
        result
    }

    /// Positions from the goal back to the start, if the last search
    /// succeeded on `graph` as it is now.
    pub fn reconstruct_path(&self, graph: &CellGraph) -> Option<Vec<Point>> {
        if self.state != SearchState::Succeeded || graph.revision() != self.revision {
            return None;
        }
        self.path.clone()
    }

    /// Drop the current search and clear the graph's search fields.
    pub fn cancel(&mut self, graph: &mut CellGraph) {
        self.strategy = None;
        self.state = SearchState::Idle;
        self.last = StepResult::default();
        self.path = None;
        self.stats = SearchStats::default();
        graph.reset_search();
    }
}

/// Sum of 10/14 edge costs along `path`.
pub fn path_cost(path: &[Point]) -> u32 {
    path.windows(2).map(|w| distance(w[0], w[1])).sum()
}
