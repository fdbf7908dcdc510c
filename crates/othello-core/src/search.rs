//! Game-tree search: heuristic negamax for the midgame and an exhaustive
//! prover for the endgame.

pub mod endgame;
pub mod midgame;
pub mod search_context;
pub mod search_result;
pub mod solve_budget;

pub use endgame::{EndgameOutcome, EndgameSolver, SolvedLine, SolvedNode};
pub use midgame::SearchTree;
pub use search_result::SearchResult;
pub use solve_budget::SolveBudget;
