//! Move-generation node counting.

use crate::board::Board;
use crate::disc::Side;
use crate::move_list::Move;

/// Executes a perft run starting from the standard initial position.
///
/// # Arguments
///
/// * `depth` - Number of plies to expand from the initial position. A depth of
///   `1` counts the immediate legal moves; larger values walk the tree
///   recursively.
///
/// # Returns
///
/// The total node count the search visits from the initial position.
pub fn perft_root(depth: u32) -> u64 {
    perft(&Board::new(), Side::Black, depth)
}

/// Counts leaf nodes below `board` with `side` to move.
///
/// A forced pass does not consume depth and a finished game counts as a
/// single leaf.
pub fn perft(board: &Board, side: Side, depth: u32) -> u64 {
    let moves = board.legal_moves(side);
    if moves.is_empty() {
        if !board.has_moves(side.opposite()) {
            return 1;
        }
        let mut next = board.clone();
        next.do_move(Move::pass(side));
        return perft(&next, side.opposite(), depth);
    }
    if depth <= 1 {
        return moves.count() as u64;
    }

    let mut nodes = 0;
    for mv in board.possible_moves(side).iter() {
        let mut next = board.clone();
        next.do_move(mv);
        nodes += perft(&next, side.opposite(), depth - 1);
    }
    nodes
}
