//! Engine configuration.

use std::time::Duration;

use crate::eval::HeuristicKind;
use crate::level::Level;
use crate::types::Depth;

/// Settings for a [`Player`](crate::player::Player).
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    /// Heuristic search depth in plies.
    pub search_depth: Depth,
    /// Run the endgame solver once this many or fewer squares are empty.
    pub endgame_empties: u32,
    /// Number of transposition table slots.
    pub tt_capacity: usize,
    /// Node ceiling for one solver run.
    pub solver_max_nodes: u64,
    /// Wall-clock ceiling for one solver run.
    pub solver_time_limit: Option<Duration>,
    pub heuristic: HeuristicKind,
}

impl EngineOptions {
    /// Options at a strength preset, other settings left at their defaults.
    #[must_use]
    pub fn from_level(level: Level) -> Self {
        EngineOptions {
            search_depth: level.search_depth,
            endgame_empties: level.endgame_empties,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_search_depth(mut self, depth: Depth) -> Self {
        self.search_depth = depth;
        self
    }

    /// Set the empty-square threshold; 0 disables the solver.
    #[must_use]
    pub fn with_endgame_empties(mut self, empties: u32) -> Self {
        self.endgame_empties = empties;
        self
    }

    #[must_use]
    pub fn with_tt_capacity(mut self, capacity: usize) -> Self {
        self.tt_capacity = capacity;
        self
    }

    /// Bound each solver run by node count and, optionally, wall-clock time.
    #[must_use]
    pub fn with_solver_limits(mut self, max_nodes: u64, time_limit: Option<Duration>) -> Self {
        self.solver_max_nodes = max_nodes;
        self.solver_time_limit = time_limit;
        self
    }

    #[must_use]
    pub fn with_heuristic(mut self, heuristic: HeuristicKind) -> Self {
        self.heuristic = heuristic;
        self
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            search_depth: 4,
            endgame_empties: 10,
            tt_capacity: 1 << 20,
            solver_max_nodes: 20_000_000,
            solver_time_limit: Some(Duration::from_secs(10)),
            heuristic: HeuristicKind::default(),
        }
    }
}
