use std::fmt;
use std::str::FromStr;

/// The five maze generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MazeKind {
    RandomObstacles,
    RecursiveDivision,
    Prim,
    CellularAutomata,
    Spiral,
}

impl MazeKind {
    pub const ALL: [MazeKind; 5] = [
        Self::RandomObstacles,
        Self::RecursiveDivision,
        Self::Prim,
        Self::CellularAutomata,
        Self::Spiral,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::RandomObstacles => "Random Obstacles",
            Self::RecursiveDivision => "Recursive Division",
            Self::Prim => "Prim's Algorithm",
            Self::CellularAutomata => "Cellular Automata",
            Self::Spiral => "Spiral Maze",
        }
    }

    /// Short identifier accepted by [`FromStr`].
    pub const fn slug(self) -> &'static str {
        match self {
            Self::RandomObstacles => "random",
            Self::RecursiveDivision => "division",
            Self::Prim => "prim",
            Self::CellularAutomata => "cellular",
            Self::Spiral => "spiral",
        }
    }

    /// Whether the layout always leaves start and goal connected.
    pub const fn guarantees_connectivity(self) -> bool {
        matches!(self, Self::RecursiveDivision)
    }
}

impl fmt::Display for MazeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown maze name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMazeError(pub String);

impl fmt::Display for ParseMazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown maze \u{201c}{}\u{201d} (expected one of:", self.0)?;
        for k in MazeKind::ALL {
            write!(f, " {}", k.slug())?;
        }
        f.write_str(")")
    }
}

impl std::error::Error for ParseMazeError {}

impl FromStr for MazeKind {
    type Err = ParseMazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' ' | '\''))
            .flat_map(char::to_lowercase)
            .collect();
        let kind = match key.as_str() {
            "random" | "randomobstacles" | "obstacles" => Self::RandomObstacles,
            "division" | "recursivedivision" => Self::RecursiveDivision,
            "prim" | "prims" | "primsalgorithm" => Self::Prim,
            "cellular" | "cellularautomata" | "caves" => Self::CellularAutomata,
            "spiral" | "spiralmaze" => Self::Spiral,
            _ => return Err(ParseMazeError(s.to_string())),
        };
        Ok(kind)
    }
}
