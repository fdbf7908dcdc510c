//! Search result types.

use crate::move_list::Move;
use crate::types::{Depth, Scoref};

/// Result of a search operation.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// Score of the chosen move for the side to move. `None` when the move was
    /// forced and nothing was searched.
    pub score: Option<Scoref>,
    pub best_move: Move,
    pub n_nodes: u64,
    /// Expected continuation, starting with `best_move`.
    pub pv_line: Vec<Move>,
    pub depth: Depth,
}

impl SearchResult {
    /// Creates a result for the only available move.
    pub fn forced(mv: Move) -> Self {
        Self {
            score: None,
            best_move: mv,
            n_nodes: 0,
            pv_line: vec![mv],
            depth: 0,
        }
    }
}
