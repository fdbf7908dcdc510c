//! Game-long driver that picks a move per turn.
//!
//! A `Player` keeps its own copy of the game board, a transposition table that
//! lives for the whole game and, once the endgame solver has proven a win, the
//! solved line it follows until the end.

use log::{debug, warn};

use crate::board::Board;
use crate::disc::Side;
use crate::eval::Evaluator;
use crate::move_list::Move;
use crate::options::EngineOptions;
use crate::search::endgame::{EndgameOutcome, EndgameSolver, SolvedLine};
use crate::search::midgame::SearchTree;
use crate::search::solve_budget::SolveBudget;
use crate::transposition_table::TranspositionTable;

/// One side of a game.
pub struct Player {
    board: Board,
    side: Side,
    to_move: Side,
    options: EngineOptions,
    evaluator: Evaluator,
    table: TranspositionTable,
    solved: Option<SolvedLine>,
}

impl Player {
    /// Creates a player for `side` at the standard starting position.
    pub fn new(side: Side, options: EngineOptions) -> Self {
        Self::with_board(Board::new(), side, Side::Black, options)
    }

    /// Creates a player joining a game in progress.
    ///
    /// # Arguments
    ///
    /// * `board` - Current position
    /// * `side` - Side this player plays
    /// * `to_move` - Side whose turn it is on `board`
    /// * `options` - Engine settings
    pub fn with_board(board: Board, side: Side, to_move: Side, options: EngineOptions) -> Self {
        Player {
            board,
            side,
            to_move,
            evaluator: Evaluator::from_kind(options.heuristic),
            table: TranspositionTable::new(options.tt_capacity),
            options,
            solved: None,
        }
    }

    /// Replaces the evaluator, e.g. with tuned weights.
    #[must_use]
    pub fn with_evaluator(mut self, evaluator: Evaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Returns `true` while the player is following a proven win.
    pub fn has_solved_line(&self) -> bool {
        self.solved.is_some()
    }

    /// Processes the opponent's move and returns ours.
    ///
    /// # Arguments
    ///
    /// * `opponent_move` - The opponent's last move. `None` if the opponent
    ///   passed or if this is the first move of the game.
    /// * `ms_left` - Time left for the whole game in milliseconds, -1 for no
    ///   limit. Advisory only: the search is bounded by depth.
    ///
    /// # Returns
    ///
    /// The move played, a pass if we have no legal placement.
    pub fn do_move(&mut self, opponent_move: Option<Move>, ms_left: i32) -> Move {
        let opponent = self.side.opposite();
        if self.to_move == opponent {
            let mv = opponent_move.unwrap_or(Move::pass(opponent));
            if mv.is_pass() && self.board.has_moves(opponent) {
                // Still applied so the board matches the referee's.
                warn!("{opponent} passed with legal moves available");
            }
            self.apply(mv);
        } else if let Some(mv) = opponent_move {
            warn!("ignoring {mv:?}: it is {}'s turn", self.side);
        }

        if self.solved.is_none() && self.board.empty_count() <= self.options.endgame_empties {
            self.solved = self.solve();
        }

        let mv = match self.solved.as_ref().and_then(SolvedLine::our_move) {
            Some(mv) => mv,
            None => {
                let mut tree = SearchTree::with_table(&self.evaluator, &mut self.table);
                let result = tree.get_best_choice(&self.board, self.side, self.options.search_depth);
                debug!(
                    "{} plays {} ({:?} score {:?}, {} nodes, {ms_left} ms left)",
                    self.side,
                    result.best_move,
                    self.evaluator.kind(),
                    result.score,
                    result.n_nodes
                );
                result.best_move
            }
        };

        self.apply(mv);
        mv
    }

    /// Plays `mv` on the game board and keeps the solved line in step.
    fn apply(&mut self, mv: Move) {
        if mv.side() != self.to_move {
            warn!("ignoring {mv:?}: it is {}'s turn", self.to_move);
            return;
        }
        if !self.board.do_move(mv) {
            warn!("ignoring illegal move {mv:?}");
            return;
        }
        self.to_move = self.to_move.opposite();

        if let Some(line) = self.solved.take() {
            self.solved = line.advance(mv);
            if self.solved.is_none() {
                warn!("{mv:?} left the solved line, falling back to search");
            }
        }
    }

    fn solve(&self) -> Option<SolvedLine> {
        let mut budget = SolveBudget::new(self.options.solver_max_nodes, self.options.solver_time_limit);
        match EndgameSolver::new().solve(&self.board, self.side, self.side, &mut budget) {
            EndgameOutcome::Proven(line) => Some(line),
            EndgameOutcome::Unproven | EndgameOutcome::Aborted => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::Square;

    fn quick() -> EngineOptions {
        EngineOptions::default()
            .with_search_depth(2)
            .with_endgame_empties(6)
            .with_tt_capacity(1 << 12)
    }

    #[test]
    fn test_first_move_is_legal() {
        let mut black = Player::new(Side::Black, quick());
        let mv = black.do_move(None, -1);
        assert_eq!(mv.side(), Side::Black);
        assert!(Board::new().check_move(mv));
        assert_eq!(black.board().count(Side::Black), 4);
    }

    #[test]
    fn test_white_applies_opening() {
        let mut white = Player::new(Side::White, quick());
        let opening = Move::at(Square::D3, Side::Black);
        let reply = white.do_move(Some(opening), -1);
        assert_eq!(reply.side(), Side::White);

        let mut expected = Board::new();
        assert!(expected.do_move(opening));
        assert!(expected.do_move(reply));
        assert_eq!(white.board(), &expected);
    }

    #[test]
    fn test_self_play() {
        let mut players = [Player::new(Side::Black, quick()), Player::new(Side::White, quick())];
        let mut last = None;
        let mut turn = Side::Black;
        for _ in 0..200 {
            let player = &mut players[turn.index()];
            let mv = player.do_move(last, -1);
            assert_eq!(mv.side(), turn);
            last = Some(mv);
            if player.board().is_done() {
                break;
            }
            turn = turn.opposite();
        }

        let [black, white] = &players;
        let finished = if turn == Side::Black { black } else { white };
        assert!(finished.board().is_done());

        let waiting = if turn == Side::Black { white } else { black };
        let mut other = waiting.board().clone();
        assert!(other.do_move(last.unwrap()));
        assert_eq!(&other, finished.board());
    }

    #[test]
    fn test_opponent_pass_with_moves_is_followed() {
        let mut white = Player::new(Side::White, quick());
        let reply = white.do_move(None, -1);
        assert_eq!(reply.side(), Side::White);

        let mut expected = Board::new();
        assert!(expected.do_move(Move::pass(Side::Black)));
        assert!(expected.do_move(reply));
        assert_eq!(white.board(), &expected);
        assert_eq!(white.board().count(Side::White), 4);
    }

    #[test]
    fn test_follows_solved_line() {
        // Black to move at g8 takes the last white disc.
        let board: Board = format!("{}XXXXXO--", "X".repeat(56)).parse().unwrap();
        let mut black = Player::with_board(board, Side::Black, Side::Black, quick());
        let mv = black.do_move(None, -1);
        assert_eq!(mv, Move::at(Square::G8, Side::Black));
        assert!(black.has_solved_line());
        assert!(black.board().is_done());
    }
}
