//! Exhaustive endgame solver.
//!
//! Proves whether one side can force a win from a position, keeping the
//! proof as a strategy tree: at our plies the single winning move, at the
//! opponent's plies every reply. The tree then dictates our moves for the
//! rest of the game as long as the opponent stays inside it.

use std::fmt;

use log::debug;

use crate::board::Board;
use crate::disc::Side;
use crate::eval::{Heuristic, Outcome};
use crate::move_list::Move;
use crate::search::solve_budget::SolveBudget;

/// One move of a proof tree and the proven continuations after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolvedNode {
    pub mv: Move,
    /// Empty once the game is over. A single entry when the next move is
    /// ours, one entry per legal reply otherwise.
    pub replies: Vec<SolvedNode>,
}

/// A proven forced win, tracked from the current position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolvedLine {
    our_side: Side,
    to_move: Side,
    next: Vec<SolvedNode>,
}

impl SolvedLine {
    /// The side the line wins for.
    pub fn our_side(&self) -> Side {
        self.our_side
    }

    /// The side whose move comes next.
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Returns the winning move if it is our turn.
    pub fn our_move(&self) -> Option<Move> {
        if self.to_move != self.our_side {
            return None;
        }
        self.next.first().map(|node| node.mv)
    }

    /// Returns `true` once the game is over along the line.
    pub fn is_finished(&self) -> bool {
        self.next.is_empty()
    }

    /// Descends past `mv`.
    ///
    /// # Returns
    ///
    /// The line after `mv`, or `None` when `mv` leaves the proven tree.
    pub fn advance(self, mv: Move) -> Option<SolvedLine> {
        let node = self.next.into_iter().find(|node| node.mv == mv)?;
        Some(SolvedLine {
            our_side: self.our_side,
            to_move: self.to_move.opposite(),
            next: node.replies,
        })
    }

    /// Plays the principal line (our witness, the first listed reply) from
    /// `board` to the end of the game.
    ///
    /// # Returns
    ///
    /// The final position.
    pub fn replay(&self, board: &Board) -> Board {
        let mut board = board.clone();
        let mut next = &self.next;
        while let Some(node) = next.first() {
            board.do_move(node.mv);
            next = &node.replies;
        }
        board
    }
}

/// Result of a solver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndgameOutcome {
    /// A forced win exists; the line proves it.
    Proven(SolvedLine),
    /// Every line was explored and none forces a win.
    Unproven,
    /// The budget ran out before the search finished.
    Aborted,
}

impl EndgameOutcome {
    /// +1 for a proven win, -1 otherwise.
    pub fn value(&self) -> i32 {
        match self {
            EndgameOutcome::Proven(_) => 1,
            EndgameOutcome::Unproven | EndgameOutcome::Aborted => -1,
        }
    }

    pub fn is_proven(&self) -> bool {
        matches!(self, EndgameOutcome::Proven(_))
    }
}

impl fmt::Display for EndgameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndgameOutcome::Proven(_) => write!(f, "proven"),
            EndgameOutcome::Unproven => write!(f, "unproven"),
            EndgameOutcome::Aborted => write!(f, "aborted"),
        }
    }
}

enum Proof {
    Win(Vec<SolvedNode>),
    NoWin,
    Aborted,
}

/// Exhaustive win prover.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndgameSolver {
    judge: Outcome,
}

impl EndgameSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Searches for a forced win for `our_side`.
    ///
    /// # Arguments
    ///
    /// * `board` - Current position
    /// * `our_side` - Side that must win
    /// * `side_to_move` - Side whose turn it is
    /// * `budget` - Node and time ceiling, shared with the caller
    ///
    /// # Returns
    ///
    /// The outcome. Only a strictly winning final count counts as a win.
    pub fn solve(
        &self,
        board: &Board,
        our_side: Side,
        side_to_move: Side,
        budget: &mut SolveBudget,
    ) -> EndgameOutcome {
        let outcome = match self.prove(board, our_side, side_to_move, budget) {
            Proof::Win(next) => EndgameOutcome::Proven(SolvedLine {
                our_side,
                to_move: side_to_move,
                next,
            }),
            Proof::NoWin => EndgameOutcome::Unproven,
            Proof::Aborted => EndgameOutcome::Aborted,
        };
        debug!(
            "endgame solve for {our_side} at {} empties: {outcome} ({} nodes, {:?})",
            board.empty_count(),
            budget.nodes(),
            budget.elapsed()
        );
        outcome
    }

    fn prove(&self, board: &Board, our_side: Side, to_move: Side, budget: &mut SolveBudget) -> Proof {
        if !budget.tick() {
            return Proof::Aborted;
        }
        if board.is_done() {
            return if self.judge.score(board, our_side) > 0.0 {
                Proof::Win(Vec::new())
            } else {
                Proof::NoWin
            };
        }

        let moves = board.possible_moves(to_move);
        if to_move == our_side {
            for mv in moves.iter() {
                let mut child = board.clone();
                child.do_move(mv);
                match self.prove(&child, our_side, to_move.opposite(), budget) {
                    Proof::Win(replies) => return Proof::Win(vec![SolvedNode { mv, replies }]),
                    Proof::NoWin => {}
                    Proof::Aborted => return Proof::Aborted,
                }
            }
            Proof::NoWin
        } else {
            let mut proven = Vec::with_capacity(moves.count());
            for mv in moves.iter() {
                let mut child = board.clone();
                child.do_move(mv);
                match self.prove(&child, our_side, to_move.opposite(), budget) {
                    Proof::Win(replies) => proven.push(SolvedNode { mv, replies }),
                    Proof::NoWin => return Proof::NoWin,
                    Proof::Aborted => return Proof::Aborted,
                }
            }
            Proof::Win(proven)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::Square;

    /// Black to move at g8, which takes the last white disc.
    fn two_empties() -> Board {
        format!("{}XXXXXO--", "X".repeat(56)).parse().unwrap()
    }

    #[test]
    fn test_two_empties_win() {
        let board = two_empties();
        let outcome = EndgameSolver::new().solve(&board, Side::Black, Side::Black, &mut SolveBudget::unlimited());
        assert_eq!(outcome.value(), 1);
        let EndgameOutcome::Proven(line) = outcome else {
            panic!("expected a proof");
        };
        assert_eq!(line.our_move(), Some(Move::at(Square::G8, Side::Black)));
        let end = line.replay(&board);
        assert!(end.is_done());
        assert!(end.count(Side::Black) > end.count(Side::White));
    }

    #[test]
    fn test_losing_side_is_unproven() {
        let board = two_empties();
        let outcome = EndgameSolver::new().solve(&board, Side::White, Side::White, &mut SolveBudget::unlimited());
        assert_eq!(outcome, EndgameOutcome::Unproven);
        assert_eq!(outcome.value(), -1);
    }

    #[test]
    fn test_draw_is_not_a_win() {
        let board: Board = format!("{}{}", "X".repeat(32), "O".repeat(32)).parse().unwrap();
        let solver = EndgameSolver::new();
        for side in Side::ALL {
            assert_eq!(
                solver.solve(&board, side, side, &mut SolveBudget::unlimited()),
                EndgameOutcome::Unproven
            );
        }
    }

    #[test]
    fn test_zero_budget_aborts() {
        let outcome = EndgameSolver::new().solve(&two_empties(), Side::Black, Side::Black, &mut SolveBudget::new(0, None));
        assert_eq!(outcome, EndgameOutcome::Aborted);
        assert_eq!(outcome.value(), -1);
    }

    #[test]
    fn test_line_tracking() {
        let board = two_empties();
        let EndgameOutcome::Proven(line) =
            EndgameSolver::new().solve(&board, Side::Black, Side::Black, &mut SolveBudget::unlimited())
        else {
            panic!("expected a proof");
        };
        assert_eq!(line.to_move(), Side::Black);
        let mv = line.our_move().unwrap();
        let line = line.advance(mv).unwrap();
        // Game over after g8: white has nothing left.
        assert!(line.is_finished());
        assert_eq!(line.our_move(), None);

        let again = EndgameSolver::new().solve(&board, Side::Black, Side::Black, &mut SolveBudget::unlimited());
        let EndgameOutcome::Proven(again) = again else {
            panic!("expected a proof");
        };
        assert!(again.advance(Move::at(Square::H8, Side::Black)).is_none());
    }
}
