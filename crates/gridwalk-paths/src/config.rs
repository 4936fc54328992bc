/// Tunables for the search strategies.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// How many times IDA* may raise its threshold before giving up.
    pub ida_max_restarts: u32,
    /// Factor applied to a cell's pheromone each time Swarm expands it.
    pub swarm_reinforcement: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            ida_max_restarts: 256,
            swarm_reinforcement: 1.1,
        }
    }
}
