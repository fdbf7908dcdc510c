//! Static position evaluation.
//!
//! Every evaluator scores a board from the point of view of one side, so the
//! negamax search can negate scores between plies.

mod linear;

pub use linear::{LinearHeuristic, NUM_PHASED_WEIGHTS, PhasedHeuristic};

use crate::board::Board;
use crate::disc::Side;
use crate::types::Scoref;

/// Number of position features fed to the linear evaluators.
pub const NUM_FEATURES: usize = 5;

/// Scores positions for the search.
pub trait Heuristic {
    /// Evaluates `board` for `side`. Higher is better for `side`.
    fn score(&self, board: &Board, side: Side) -> Scoref;
}

impl<H: Heuristic + ?Sized> Heuristic for &H {
    #[inline]
    fn score(&self, board: &Board, side: Side) -> Scoref {
        (**self).score(board, side)
    }
}

/// Disc, mobility, stability and frontier differences plus parity (+1 when
/// the parity flag favours `side`).
pub fn features(board: &Board, side: Side) -> [f32; NUM_FEATURES] {
    let other = side.opposite();
    let diff = |a: u32, b: u32| a as f32 - b as f32;
    [
        diff(board.count(side), board.count(other)),
        diff(board.count_moves(side), board.count_moves(other)),
        diff(board.count_stable(side), board.count_stable(other)),
        diff(board.frontier_size(side), board.frontier_size(other)),
        if board.parity() == side { 1.0 } else { -1.0 },
    ]
}

/// +1, 0 or -1 by comparing disc counts.
#[inline]
fn outcome(board: &Board, side: Side) -> Scoref {
    match board.count(side).cmp(&board.count(side.opposite())) {
        std::cmp::Ordering::Greater => 1.0,
        std::cmp::Ordering::Equal => 0.0,
        std::cmp::Ordering::Less => -1.0,
    }
}

/// Plain disc difference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PieceDifference;

impl Heuristic for PieceDifference {
    #[inline]
    fn score(&self, board: &Board, side: Side) -> Scoref {
        board.count(side) as f32 - board.count(side.opposite()) as f32
    }
}

/// Sign of the disc difference. Used to judge finished games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome;

impl Heuristic for Outcome {
    #[inline]
    fn score(&self, board: &Board, side: Side) -> Scoref {
        outcome(board, side)
    }
}

/// Fixed hand-weighted combination of the position features.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Handmade;

impl Handmade {
    const PIECES: f32 = 0.5;
    const MOBILITY: f32 = 2.0;
    const STABILITY: f32 = 7.0;
    const FRONTIER: f32 = -1.0;
    const PARITY: f32 = 2.0;
    const GAME_END: f32 = 100000.0;
}

impl Heuristic for Handmade {
    fn score(&self, board: &Board, side: Side) -> Scoref {
        let [pieces, mobility, stability, frontier, parity] = features(board, side);
        let mut value = pieces * Self::PIECES
            + mobility * Self::MOBILITY
            + stability * Self::STABILITY
            + frontier * Self::FRONTIER
            + parity * Self::PARITY;

        if !board.has_moves(side) && !board.has_moves(side.opposite()) {
            value += if pieces > 0.0 {
                Self::GAME_END
            } else {
                -Self::GAME_END
            };
        }
        value
    }
}

/// Selects an evaluator by name, e.g. from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeuristicKind {
    PieceDifference,
    #[default]
    Handmade,
    Linear,
    Phased,
}

/// Closed set of evaluators usable by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluator {
    PieceDifference(PieceDifference),
    Handmade(Handmade),
    Linear(LinearHeuristic),
    Phased(PhasedHeuristic),
}

impl Evaluator {
    /// Builds the evaluator of the given kind with its default weights.
    pub fn from_kind(kind: HeuristicKind) -> Evaluator {
        match kind {
            HeuristicKind::PieceDifference => Evaluator::PieceDifference(PieceDifference),
            HeuristicKind::Handmade => Evaluator::Handmade(Handmade),
            HeuristicKind::Linear => Evaluator::Linear(LinearHeuristic::default()),
            HeuristicKind::Phased => Evaluator::Phased(PhasedHeuristic::default()),
        }
    }

    pub fn kind(&self) -> HeuristicKind {
        match self {
            Evaluator::PieceDifference(_) => HeuristicKind::PieceDifference,
            Evaluator::Handmade(_) => HeuristicKind::Handmade,
            Evaluator::Linear(_) => HeuristicKind::Linear,
            Evaluator::Phased(_) => HeuristicKind::Phased,
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator::from_kind(HeuristicKind::default())
    }
}

impl Heuristic for Evaluator {
    #[inline]
    fn score(&self, board: &Board, side: Side) -> Scoref {
        match self {
            Evaluator::PieceDifference(h) => h.score(board, side),
            Evaluator::Handmade(h) => h.score(board, side),
            Evaluator::Linear(h) => h.score(board, side),
            Evaluator::Phased(h) => h.score(board, side),
        }
    }
}

impl From<LinearHeuristic> for Evaluator {
    fn from(h: LinearHeuristic) -> Self {
        Evaluator::Linear(h)
    }
}

impl From<PhasedHeuristic> for Evaluator {
    fn from(h: PhasedHeuristic) -> Self {
        Evaluator::Phased(h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_list::Move;
    use crate::square::Square;

    #[test]
    fn test_start_position_features() {
        let board = Board::new();
        // Symmetric position; parity starts with white.
        assert_eq!(features(&board, Side::Black), [0.0, 0.0, 0.0, 0.0, -1.0]);
        assert_eq!(features(&board, Side::White), [0.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(Handmade.score(&board, Side::White), 2.0);
    }

    #[test]
    fn test_piece_difference() {
        let mut board = Board::new();
        board.do_move(Move::at(Square::D3, Side::Black));
        assert_eq!(PieceDifference.score(&board, Side::Black), 3.0);
        assert_eq!(PieceDifference.score(&board, Side::White), -3.0);
        assert_eq!(Outcome.score(&board, Side::White), -1.0);
    }

    #[test]
    fn test_handmade_game_end_bonus() {
        let board: Board = format!("{}{}", "X".repeat(30), "O".repeat(34)).parse().unwrap();
        assert!(Handmade.score(&board, Side::White) > 50000.0);
        assert!(Handmade.score(&board, Side::Black) < -50000.0);
        let draw: Board = format!("{}{}", "X".repeat(32), "O".repeat(32)).parse().unwrap();
        assert_eq!(Outcome.score(&draw, Side::Black), 0.0);
    }

    #[test]
    fn test_evaluator_dispatch() {
        let board = Board::new();
        for kind in [
            HeuristicKind::PieceDifference,
            HeuristicKind::Handmade,
            HeuristicKind::Linear,
            HeuristicKind::Phased,
        ] {
            let eval = Evaluator::from_kind(kind);
            assert_eq!(eval.kind(), kind);
            assert!(eval.score(&board, Side::Black).is_finite());
        }
        let by_ref: &dyn Heuristic = &Handmade;
        assert_eq!(by_ref.score(&board, Side::White), Handmade.score(&board, Side::White));
    }
}
