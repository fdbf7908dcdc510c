//! Stability detection module
//!
//! A disc is stable once no sequence of moves can flip it. The analysis works
//! per line axis: a disc is safe along an axis if it sits on the board edge
//! across that axis, on a completely filled line of that axis, or next to a
//! disc already stable on every axis.

use crate::bitboard::{Bitboard, EDGE_MASK};
use crate::direction::Direction;

/// Top and bottom rows, safe along columns.
const COLUMN_EDGES: u64 = 0xff000000000000ff;

/// Left and right columns, safe along rows.
const ROW_EDGES: u64 = 0x8181818181818181;

/// The four line axes, each named by one of its two directions.
const AXES: [Direction; 4] = [
    Direction::NorthWest,
    Direction::North,
    Direction::NorthEast,
    Direction::East,
];

/// Collects every completely occupied line of one axis.
///
/// # Arguments
///
/// * `occupied` - All discs on the board
/// * `first` - The first line of the axis
/// * `lines` - Number of lines on the axis
/// * `next` - Steps from one line to the next
///
/// # Returns
///
/// The union of the full lines.
fn full_lines(occupied: u64, first: u64, lines: usize, next: impl Fn(u64) -> u64) -> u64 {
    let mut line = first;
    let mut full = 0;
    for _ in 0..lines {
        if line & occupied == line {
            full |= line;
        }
        line = next(line);
    }
    full
}

/// Per-axis seeds: edges plus every full line of that axis.
fn seed_axes(occupied: u64) -> [u64; 4] {
    use Direction::*;

    // a8 alone, then each diagonal running towards h1.
    let diag = full_lines(occupied, 0x80, 15, |l| North.shift(l) | East.shift(l));
    // Column a, then the following columns.
    let cols = full_lines(occupied, 0x8080808080808080, 8, |l| East.shift(l));
    // a1 alone, then each anti-diagonal running towards h8.
    let anti = full_lines(occupied, 0x8000000000000000, 15, |l| {
        South.shift(l) | East.shift(l)
    });
    // Row 1, then the following rows.
    let rows = full_lines(occupied, 0xff00000000000000, 8, |l| South.shift(l));

    [
        EDGE_MASK | diag,
        COLUMN_EDGES | cols,
        EDGE_MASK | anti,
        ROW_EDGES | rows,
    ]
}

/// Counts the stable discs of one side.
///
/// # Arguments
///
/// * `own` - Discs of the side being evaluated
/// * `occupied` - Discs of both sides
///
/// # Returns
///
/// The number of discs stable on all four axes.
pub fn count_stable(own: Bitboard, occupied: Bitboard) -> u32 {
    let own = own.bits();
    let mut partial = seed_axes(occupied.bits()).map(|seed| own & seed);
    let mut stable = partial.iter().fold(!0, |acc, &p| acc & p);

    loop {
        for (axis, dir) in partial.iter_mut().zip(AXES) {
            *axis |= own & (dir.shift(stable) | dir.opposite().shift(stable));
        }
        let next = partial.iter().fold(!0, |acc, &p| acc & p);
        if next == stable {
            break;
        }
        stable = next;
    }
    stable.count_ones()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::Square;

    fn bb(squares: &[Square]) -> Bitboard {
        squares.iter().copied().collect()
    }

    #[test]
    fn test_empty_and_start() {
        assert_eq!(count_stable(Bitboard::EMPTY, Bitboard::EMPTY), 0);
        let black = bb(&[Square::E4, Square::D5]);
        let all = black | bb(&[Square::D4, Square::E5]);
        assert_eq!(count_stable(black, all), 0);
    }

    #[test]
    fn test_corner_is_stable() {
        for corner in [Square::A1, Square::H1, Square::A8, Square::H8] {
            let own = bb(&[corner]);
            assert_eq!(count_stable(own, own), 1, "corner {corner}");
        }
    }

    #[test]
    fn test_growth_from_corner() {
        // b1 and a2 grow from a1. b2 can still be flanked along c1-a3.
        let own = bb(&[Square::A1, Square::B1, Square::A2, Square::B2]);
        assert_eq!(count_stable(own, own), 3);
        let own = own | bb(&[Square::C1]);
        assert_eq!(count_stable(own, own), 5);
        // A lone edge disc with empty neighbours along the edge is not stable.
        let edge = bb(&[Square::D1]);
        assert_eq!(count_stable(edge, edge), 0);
    }

    #[test]
    fn test_full_board() {
        assert_eq!(count_stable(Bitboard::FULL, Bitboard::FULL), 64);
        let half = Bitboard::new(0xffffffff00000000);
        assert_eq!(count_stable(half, Bitboard::FULL), 32);
    }

    #[test]
    fn test_full_edge_row() {
        let row: Bitboard = (0..8).filter_map(|x| Square::from_xy(x, 0)).collect();
        let other = bb(&[Square::D4, Square::E5]);
        assert_eq!(count_stable(row, row | other), 8);
    }
}
