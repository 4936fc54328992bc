//! Shared pieces of the `gridwalk` terminal demo: scenario setup, logging
//! and rendering.

pub mod logging;
pub mod render;

use gridwalk_core::{CellGraph, ConfigError};
use gridwalk_maze::{MazeConfig, MazeGen, MazeKind};

/// Grid, optional maze and seed for one demo run.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub width: i32,
    pub height: i32,
    pub maze: Option<MazeKind>,
    pub maze_config: MazeConfig,
    pub seed: u64,
}

impl Scenario {
    /// Build the graph with endpoints two cells in from opposite corners,
    /// then lay out the maze, if any.
    pub fn build(&self) -> Result<CellGraph, ConfigError> {
        let mut graph = CellGraph::new(self.width, self.height);
        let (start, goal) = graph.corner_endpoints();
        match self.maze {
            Some(kind) => {
                let mut mg = MazeGen::from_seed(self.seed, self.maze_config);
                mg.generate(kind, &mut graph, start, goal)?;
                if !graph.connected(start, goal) {
                    log::warn!("{kind} left {start} and {goal} disconnected (seed {})", self.seed);
                }
            }
            None => graph.place_endpoints(start, goal)?,
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_core::Point;

    fn scenario(maze: Option<MazeKind>) -> Scenario {
        Scenario {
            width: 40,
            height: 30,
            maze,
            maze_config: MazeConfig::default(),
            seed: 17,
        }
    }

    #[test]
    fn open_grid_has_corner_endpoints() {
        let g = scenario(None).build().unwrap();
        assert_eq!(g.start(), Some(Point::new(2, 2)));
        assert_eq!(g.goal(), Some(Point::new(37, 27)));
        assert_eq!(g.blocked_count(), 0);
    }

    #[test]
    fn maze_is_reproducible() {
        let a = scenario(Some(MazeKind::RecursiveDivision)).build().unwrap();
        let b = scenario(Some(MazeKind::RecursiveDivision)).build().unwrap();
        assert!(a.iter().zip(b.iter()).all(|(x, y)| x.status() == y.status()));
        assert!(a.blocked_count() > 0);
    }

    #[test]
    fn tiny_grid_is_rejected() {
        let mut s = scenario(None);
        s.width = 1;
        s.height = 1;
        assert!(matches!(s.build(), Err(ConfigError::CoincidentEndpoints(_))));
    }
}
