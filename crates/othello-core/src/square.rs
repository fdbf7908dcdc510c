use std::fmt;
use std::str::FromStr;

use crate::constants::{BOARD_SIZE, BOARD_SQUARES};
use crate::error::SquareError;

/// Represents a square on the board, ranging from A1 to H8.
///
/// Files (columns, `x`) are labeled A-H and ranks (rows, `y`) 1-8. Squares
/// are numbered in row-major order:
///
/// ```text
///   A B C D E F G H
/// 1 00 01 02 03 04 05 06 07
/// 2 08 09 10 11 12 13 14 15
/// 3 16 17 18 19 20 21 22 23
/// 4 24 25 26 27 28 29 30 31
/// 5 32 33 34 35 36 37 38 39
/// 6 40 41 42 43 44 45 46 47
/// 7 48 49 50 51 52 53 54 55
/// 8 56 57 58 59 60 61 62 63
/// ```
///
/// The bitboard layout is reversed: square `(x, y)` owns bit
/// `(7 - x) + 8 * (7 - y)`, so A1 is the most significant bit and H8 the
/// least significant one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
#[rustfmt::skip]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    /// Returns a `u64` with the single bit of this square set.
    ///
    /// A1 returns 0x8000000000000000, H8 returns 0x1.
    #[inline]
    pub const fn bitboard(self) -> u64 {
        1 << self.bit_index()
    }

    /// Returns the bit position of this square (0-63).
    #[inline]
    pub const fn bit_index(self) -> u32 {
        63 - self as u32
    }

    /// Returns the row-major index of the square (0-63).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Converts a row-major index into a `Square` without bounds checking.
    ///
    /// # Arguments
    ///
    /// * `index` - Row-major index, must be below 64.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `index` >= 64.
    #[inline]
    pub fn from_usize_unchecked(index: usize) -> Square {
        debug_assert!(
            index < BOARD_SQUARES,
            "Index out of bounds for Square enum. index: {index:?}"
        );
        unsafe { std::mem::transmute(index as u8) }
    }

    /// Safely converts a row-major index into a `Square`.
    ///
    /// # Returns
    ///
    /// `Some(Square)` if the index is below 64, `None` otherwise.
    #[inline]
    pub fn from_usize(index: usize) -> Option<Square> {
        (index < BOARD_SQUARES).then(|| Square::from_usize_unchecked(index))
    }

    /// Converts a bit position (0-63) into the square that owns it.
    #[inline]
    pub fn from_bit_index(bit: u32) -> Square {
        debug_assert!(bit < 64);
        Square::from_usize_unchecked(63 - bit as usize)
    }

    /// Creates a `Square` from board coordinates.
    ///
    /// # Arguments
    ///
    /// * `x` - Column, 0 for file A.
    /// * `y` - Row, 0 for rank 1.
    ///
    /// # Returns
    ///
    /// `None` if either coordinate is off the board.
    #[inline]
    pub fn from_xy(x: i32, y: i32) -> Option<Square> {
        let size = BOARD_SIZE as i32;
        if (0..size).contains(&x) && (0..size).contains(&y) {
            Some(Square::from_usize_unchecked((y * size + x) as usize))
        } else {
            None
        }
    }

    /// Column of this square (0-7).
    #[inline]
    pub const fn x(self) -> u8 {
        self as u8 % BOARD_SIZE as u8
    }

    /// Row of this square (0-7).
    #[inline]
    pub const fn y(self) -> u8 {
        self as u8 / BOARD_SIZE as u8
    }

    /// Returns an iterator over all 64 squares in row-major order.
    #[inline]
    pub fn iter() -> impl Iterator<Item = Square> {
        (0..BOARD_SQUARES).map(Square::from_usize_unchecked)
    }
}

impl FromStr for Square {
    type Err = SquareError;

    /// Parses a square in algebraic notation (e.g. "a1", "H8").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let (Some(file_char), Some(rank_char), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(SquareError::InvalidFormat);
        };

        let file = file_char.to_ascii_lowercase();
        if !('a'..='h').contains(&file) {
            return Err(SquareError::InvalidFile(file_char));
        }
        if !('1'..='8').contains(&rank_char) {
            return Err(SquareError::InvalidRank(rank_char));
        }

        let x = file as u8 - b'a';
        let y = rank_char as u8 - b'1';
        Ok(Square::from_usize_unchecked(
            y as usize * BOARD_SIZE + x as usize,
        ))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (self.x() + b'a') as char;
        let rank = (self.y() + b'1') as char;
        write!(f, "{file}{rank}")
    }
}
