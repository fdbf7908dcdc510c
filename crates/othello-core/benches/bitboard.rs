use criterion::{Criterion, criterion_group, criterion_main};
use othello_core::board::Board;
use othello_core::disc::Side;
use othello_core::move_list::Move;
use othello_core::square::Square;
use std::hint::black_box;

fn midgame() -> Board {
    let mut board = Board::new();
    for (sq, side) in [
        (Square::F5, Side::Black),
        (Square::D6, Side::White),
        (Square::C3, Side::Black),
        (Square::D3, Side::White),
        (Square::C4, Side::Black),
        (Square::F4, Side::White),
    ] {
        board.do_move(Move::at(sq, side));
    }
    board
}

fn bench_legal_moves(c: &mut Criterion) {
    let board = midgame();

    // Each iteration works on a fresh clone so the move cache starts cold.
    c.bench_function("board_legal_moves", |b| {
        b.iter(|| black_box(board.clone()).legal_moves(black_box(Side::Black)))
    });
}

fn bench_do_move(c: &mut Criterion) {
    let board = midgame();
    let mv = board.possible_moves(Side::Black).first().unwrap_or(Move::pass(Side::Black));

    c.bench_function("board_do_move", |b| {
        b.iter(|| {
            let mut child = board.clone();
            child.do_move(black_box(mv));
            child
        })
    });
}

fn bench_count_stable(c: &mut Criterion) {
    let board: Board = "XXXXXXXXXOOOOOOX-XOXOOOX--XXOOOX---XXOOX----XOOX-----OOX------OX"
        .parse()
        .unwrap_or_default();

    c.bench_function("board_count_stable", |b| {
        b.iter(|| black_box(&board).count_stable(black_box(Side::Black)))
    });
}

fn bench_frontier(c: &mut Criterion) {
    let board = midgame();

    c.bench_function("board_frontier_size", |b| {
        b.iter(|| black_box(&board).frontier_size(black_box(Side::White)))
    });
}

criterion_group!(
    benches,
    bench_legal_moves,
    bench_do_move,
    bench_count_stable,
    bench_frontier
);
criterion_main!(benches);
