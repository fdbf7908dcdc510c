//! Node and wall-clock limits for the endgame solver.

use std::time::{Duration, Instant};

/// How often, in nodes, the wall clock is consulted.
const TIME_CHECK_INTERVAL: u64 = 1024;

/// Resource ceiling for one solver run.
///
/// Passed by `&mut` through the recursion. Once exhausted it stays exhausted.
#[derive(Debug, Clone)]
pub struct SolveBudget {
    max_nodes: u64,
    time_limit: Option<Duration>,
    started: Instant,
    nodes: u64,
    exhausted: bool,
}

impl SolveBudget {
    /// Creates a budget starting now.
    ///
    /// # Arguments
    ///
    /// * `max_nodes` - Maximum number of nodes to visit
    /// * `time_limit` - Optional wall-clock ceiling
    pub fn new(max_nodes: u64, time_limit: Option<Duration>) -> Self {
        SolveBudget {
            max_nodes,
            time_limit,
            started: Instant::now(),
            nodes: 0,
            exhausted: false,
        }
    }

    /// A budget that never runs out.
    pub fn unlimited() -> Self {
        Self::new(u64::MAX, None)
    }

    /// Accounts for one node.
    ///
    /// # Returns
    ///
    /// `false` once the node ceiling is passed or the time limit has elapsed.
    #[inline]
    pub fn tick(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        self.nodes += 1;
        if self.nodes > self.max_nodes {
            self.exhausted = true;
        } else if self.nodes % TIME_CHECK_INTERVAL == 0
            && let Some(limit) = self.time_limit
            && self.started.elapsed() >= limit
        {
            self.exhausted = true;
        }
        !self.exhausted
    }

    /// Nodes accounted for so far.
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    #[inline]
    pub fn max_nodes(&self) -> u64 {
        self.max_nodes
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_ceiling() {
        let mut budget = SolveBudget::new(3, None);
        assert!(budget.tick());
        assert!(budget.tick());
        assert!(budget.tick());
        assert!(!budget.tick());
        assert!(budget.is_exhausted());
        assert!(!budget.tick());
        assert_eq!(budget.nodes(), 4);
    }

    #[test]
    fn test_zero_budget() {
        let mut budget = SolveBudget::new(0, None);
        assert!(!budget.tick());
    }

    #[test]
    fn test_time_limit() {
        let mut budget = SolveBudget::new(u64::MAX, Some(Duration::ZERO));
        // The clock is only read every TIME_CHECK_INTERVAL nodes.
        for _ in 1..TIME_CHECK_INTERVAL {
            assert!(budget.tick());
        }
        assert!(!budget.tick());
    }

    #[test]
    fn test_unlimited() {
        let mut budget = SolveBudget::unlimited();
        assert!((0..10_000).all(|_| budget.tick()));
        assert_eq!(budget.max_nodes(), u64::MAX);
    }
}
