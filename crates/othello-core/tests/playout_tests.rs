use othello_core::board::Board;
use othello_core::disc::Side;
use othello_core::move_list::Move;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Random games keep the incremental hash equal to a full recomputation,
    /// never overlap the two sides, never lose a disc, only offer empty
    /// squares and never count more stable discs than a side owns.
    #[test]
    fn random_playout_invariants(choices in prop::collection::vec(any::<u8>(), 80)) {
        let mut board = Board::new();
        let mut side = Side::Black;
        for choice in choices {
            if board.is_done() {
                break;
            }
            let moves = board.possible_moves(side);
            let mv = moves.as_slice()[choice as usize % moves.count()];
            for offered in moves.iter() {
                prop_assert!(offered.square().is_none_or(|sq| !board.occupied().contains(sq)));
            }
            prop_assert!((board.legal_moves(side) & board.occupied()).is_empty());
            let before = board.count(Side::Black) + board.count(Side::White);
            prop_assert!(board.do_move(mv));

            prop_assert!((board.pieces(Side::Black) & board.pieces(Side::White)).is_empty());
            prop_assert_eq!(board.hash(), board.compute_hash());
            let after = board.count(Side::Black) + board.count(Side::White);
            prop_assert_eq!(after, before + u32::from(!mv.is_pass()));
            prop_assert_eq!(board.empty_count(), 64 - after);
            for owner in Side::ALL {
                prop_assert!(board.count_stable(owner) <= board.count(owner));
            }
            side = side.opposite();
        }
    }

    /// Passing twice restores the parity and never touches the discs.
    #[test]
    fn double_pass_is_identity(choices in prop::collection::vec(any::<u8>(), 0..20)) {
        let mut board = Board::new();
        let mut side = Side::Black;
        for choice in choices {
            if board.is_done() {
                break;
            }
            let moves = board.possible_moves(side);
            board.do_move(moves.as_slice()[choice as usize % moves.count()]);
            side = side.opposite();
        }
        let mut passed = board.clone();
        passed.do_move(Move::pass(side));
        prop_assert_ne!(passed.parity(), board.parity());
        passed.do_move(Move::pass(side.opposite()));
        prop_assert_eq!(passed, board);
    }
}
