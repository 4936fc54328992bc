use std::fmt;
use std::str::FromStr;

/// The eight search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    AStar,
    Dijkstra,
    BreadthFirst,
    DepthFirst,
    Greedy,
    Bidirectional,
    IdaStar,
    Swarm,
}

/// Grouping used when presenting algorithms to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Basic,
    Advanced,
    Heuristic,
}

impl Algorithm {
    pub const ALL: [Algorithm; 8] = [
        Self::AStar,
        Self::Dijkstra,
        Self::BreadthFirst,
        Self::DepthFirst,
        Self::Greedy,
        Self::Bidirectional,
        Self::IdaStar,
        Self::Swarm,
    ];

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::AStar => "A* Search",
            Self::Dijkstra => "Dijkstra's Algorithm",
            Self::BreadthFirst => "Breadth-First Search",
            Self::DepthFirst => "Depth-First Search",
            Self::Greedy => "Greedy Best-First",
            Self::Bidirectional => "Bidirectional Search",
            Self::IdaStar => "IDA* Search",
            Self::Swarm => "Swarm Algorithm",
        }
    }

    /// Short identifier accepted by [`FromStr`].
    pub const fn slug(self) -> &'static str {
        match self {
            Self::AStar => "astar",
            Self::Dijkstra => "dijkstra",
            Self::BreadthFirst => "bfs",
            Self::DepthFirst => "dfs",
            Self::Greedy => "greedy",
            Self::Bidirectional => "bidirectional",
            Self::IdaStar => "idastar",
            Self::Swarm => "swarm",
        }
    }

    pub const fn category(self) -> Category {
        match self {
            Self::AStar | Self::Dijkstra | Self::BreadthFirst | Self::DepthFirst | Self::Greedy => {
                Category::Basic
            }
            Self::Bidirectional | Self::IdaStar => Category::Advanced,
            Self::Swarm => Category::Heuristic,
        }
    }

    /// Whether the strategy guarantees a minimum-cost path on a grid
    /// without obstacles.
    pub const fn is_optimal_on_open_grid(self) -> bool {
        matches!(self, Self::AStar | Self::Dijkstra | Self::IdaStar)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError(pub String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown algorithm \u{201c}{}\u{201d} (expected one of:", self.0)?;
        for a in Algorithm::ALL {
            write!(f, " {}", a.slug())?;
        }
        f.write_str(")")
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' ' | '\''))
            .flat_map(char::to_lowercase)
            .collect();
        let algo = match key.as_str() {
            "astar" | "a*" | "a*search" => Self::AStar,
            "dijkstra" | "dijkstras" | "dijkstrasalgorithm" => Self::Dijkstra,
            "bfs" | "breadthfirst" | "breadthfirstsearch" => Self::BreadthFirst,
            "dfs" | "depthfirst" | "depthfirstsearch" => Self::DepthFirst,
            "greedy" | "greedybestfirst" | "bestfirst" => Self::Greedy,
            "bidirectional" | "bidi" | "bidirectionalsearch" => Self::Bidirectional,
            "idastar" | "ida*" | "ida" | "ida*search" => Self::IdaStar,
            "swarm" | "swarmalgorithm" => Self::Swarm,
            _ => return Err(ParseAlgorithmError(s.to_string())),
        };
        Ok(algo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_and_names_parse() {
        for a in Algorithm::ALL {
            assert_eq!(a.slug().parse::<Algorithm>(), Ok(a));
            assert_eq!(a.name().parse::<Algorithm>(), Ok(a));
        }
    }

    #[test]
    fn aliases_parse() {
        assert_eq!("A*".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert_eq!("IDA*".parse::<Algorithm>(), Ok(Algorithm::IdaStar));
        assert_eq!("Breadth_First".parse::<Algorithm>(), Ok(Algorithm::BreadthFirst));
        assert!("jps".parse::<Algorithm>().is_err());
    }

    #[test]
    fn categories() {
        let basic = Algorithm::ALL
            .iter()
            .filter(|a| a.category() == Category::Basic)
            .count();
        assert_eq!(basic, 5);
        assert_eq!(Algorithm::Swarm.category(), Category::Heuristic);
        assert_eq!(Algorithm::IdaStar.category(), Category::Advanced);
    }
}
