//! Midgame search algorithms: negamax alpha-beta and principal variation
//! search over heuristic leaf scores.

use arrayvec::ArrayVec;
use log::debug;

use crate::board::Board;
use crate::constants::{MAX_PLY, MAX_SEARCH_DEPTH, ORDERING_MIN_DEPTH, ORDERING_SCAN_DEPTH, PVS_WINDOW, SCORE_INF};
use crate::disc::Side;
use crate::eval::Heuristic;
use crate::move_list::{MAX_MOVES, Move, MoveList};
use crate::search::search_context::SearchContext;
use crate::search::search_result::SearchResult;
use crate::transposition_table::TranspositionTable;
use crate::types::{Depth, Scoref};

/// Returns a copy of `board` with `mv` applied.
#[inline]
fn child_board(board: &Board, mv: Move) -> Board {
    let mut child = board.clone();
    child.do_move(mv);
    child
}

/// Upper edge of the null window above `alpha`.
///
/// The width grows with the score so the window stays open in f32 even at
/// game-end magnitudes.
#[inline]
fn null_window_edge(alpha: Scoref) -> Scoref {
    alpha + PVS_WINDOW.max(alpha.abs() * 4.0 * Scoref::EPSILON)
}

/// Negamax search over one heuristic, optionally backed by a transposition
/// table that supplies move-ordering hints.
pub struct SearchTree<'a, H: Heuristic + ?Sized> {
    heuristic: &'a H,
    tt: Option<&'a mut TranspositionTable>,
    ctx: SearchContext,
}

impl<'a, H: Heuristic + ?Sized> SearchTree<'a, H> {
    /// Creates a search tree without a transposition table.
    pub fn new(heuristic: &'a H) -> Self {
        SearchTree {
            heuristic,
            tt: None,
            ctx: SearchContext::new(),
        }
    }

    /// Creates a search tree that reads and fills `tt`.
    pub fn with_table(heuristic: &'a H, tt: &'a mut TranspositionTable) -> Self {
        SearchTree {
            heuristic,
            tt: Some(tt),
            ctx: SearchContext::new(),
        }
    }

    /// Total nodes visited by this tree so far.
    #[inline]
    pub fn n_nodes(&self) -> u64 {
        self.ctx.n_nodes
    }

    /// Plain fail-hard negamax alpha-beta search.
    ///
    /// # Arguments
    ///
    /// * `board` - Position to search
    /// * `side` - Side to move
    /// * `depth` - Remaining plies; a pass consumes one
    /// * `alpha` - Lower bound of the window
    /// * `beta` - Upper bound of the window
    ///
    /// # Returns
    ///
    /// The score for `side`, clamped to at least `alpha`.
    pub fn search_ab(
        &mut self,
        board: &Board,
        side: Side,
        depth: Depth,
        mut alpha: Scoref,
        beta: Scoref,
    ) -> Scoref {
        self.ctx.increment_nodes();
        if depth == 0 {
            return self.heuristic.score(board, side);
        }

        for mv in board.possible_moves(side).iter() {
            let child = child_board(board, mv);
            let score = -self.search_ab(&child, side.opposite(), depth - 1, -beta, -alpha);
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }
        alpha
    }

    /// Principal variation search.
    ///
    /// The first move is searched with the full window and the rest with a
    /// null window, re-searching any move that lands strictly inside
    /// `(alpha, beta)`. Returns the same value as [`SearchTree::search_ab`]
    /// for the same window.
    ///
    /// # Arguments
    ///
    /// * `board` - Position to search
    /// * `side` - Side to move
    /// * `depth` - Remaining plies; a pass consumes one
    /// * `alpha` - Lower bound of the window
    /// * `beta` - Upper bound of the window
    ///
    /// # Returns
    ///
    /// The score for `side`, clamped to at least `alpha`.
    pub fn search_pvs(
        &mut self,
        board: &Board,
        side: Side,
        depth: Depth,
        mut alpha: Scoref,
        beta: Scoref,
    ) -> Scoref {
        self.ctx.increment_nodes();
        self.ctx.clear_pv();
        // The PV stack holds MAX_PLY plies below the root.
        let depth = depth.min((MAX_PLY - self.ctx.ply()) as Depth);
        if depth == 0 {
            return self.heuristic.score(board, side);
        }

        let mut moves = board.possible_moves(side);
        self.order_moves(board, side, depth, &mut moves);

        let opponent = side.opposite();
        let mut best_move = moves.first().unwrap_or(Move::pass(side));
        let mut best_score = -SCORE_INF;

        for (i, mv) in moves.iter().enumerate() {
            let child = child_board(board, mv);
            self.ctx.update();
            let score = if i == 0 {
                -self.search_pvs(&child, opponent, depth - 1, -beta, -alpha)
            } else {
                let probe = -self.search_pvs(&child, opponent, depth - 1, -null_window_edge(alpha), -alpha);
                if alpha < probe && probe < beta {
                    -self.search_pvs(&child, opponent, depth - 1, -beta, -alpha)
                } else {
                    probe
                }
            };
            self.ctx.undo();

            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            if score > alpha {
                alpha = score;
                self.ctx.update_pv(mv);
            }
            if alpha >= beta {
                break;
            }
        }

        if let Some(tt) = self.tt.as_deref_mut() {
            tt.store(board.hash(), depth, best_move);
        }
        alpha
    }

    /// Orders `moves` best-first.
    ///
    /// Deep nodes sort by a shallow full-window scan of each child. A
    /// transposition table hint for this exact position then goes first.
    fn order_moves(&mut self, board: &Board, side: Side, depth: Depth, moves: &mut MoveList) {
        if depth > ORDERING_MIN_DEPTH && moves.count() > 1 {
            let keys: ArrayVec<Scoref, MAX_MOVES> = moves
                .iter()
                .map(|mv| {
                    let child = child_board(board, mv);
                    // Opponent's view, so ascending puts our best first.
                    self.search_ab(&child, side.opposite(), ORDERING_SCAN_DEPTH, -SCORE_INF, SCORE_INF)
                })
                .collect();
            moves.sort_by_key_ascending(&keys);
        }

        if let Some(tt) = self.tt.as_deref()
            && let Some(hint) = tt.best_move(board.hash(), side)
        {
            moves.move_to_front(hint);
        }
    }

    /// Picks the move to play.
    ///
    /// A single legal move (or a forced pass) is returned without searching.
    /// Otherwise each child is searched with a full window to `depth - 1` and
    /// the highest score wins, the earlier move on ties.
    ///
    /// # Arguments
    ///
    /// * `board` - Current position
    /// * `side` - Side to move
    /// * `depth` - Search depth in plies, clamped to `1..=MAX_SEARCH_DEPTH`
    ///
    /// # Returns
    ///
    /// The chosen move with its score, node count and principal variation.
    pub fn get_best_choice(&mut self, board: &Board, side: Side, depth: Depth) -> SearchResult {
        let moves = board.possible_moves(side);
        let first = moves.first().unwrap_or(Move::pass(side));
        if moves.count() == 1 {
            return SearchResult::forced(first);
        }

        let depth = depth.clamp(1, MAX_SEARCH_DEPTH);
        let start_nodes = self.ctx.n_nodes;
        self.ctx.clear_pv();

        let mut best: Option<(Move, Scoref)> = None;
        for mv in moves.iter() {
            let child = child_board(board, mv);
            self.ctx.update();
            let score = -self.search_pvs(&child, side.opposite(), depth - 1, -SCORE_INF, SCORE_INF);
            self.ctx.undo();

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((mv, score));
                self.ctx.update_pv(mv);
            }
        }

        let (best_move, score) = best.unwrap_or((first, 0.0));
        let n_nodes = self.ctx.n_nodes - start_nodes;
        debug!(
            "search depth {depth}: {best_move:?} score {score:.4} nodes {n_nodes} pv {}",
            self.ctx
                .pv()
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        );

        SearchResult {
            score: Some(score),
            best_move,
            n_nodes,
            pv_line: self.ctx.pv().to_vec(),
            depth,
        }
    }
}
