//! Bitboard operations and types.
//!
//! This module provides a [`Bitboard`] type that represents a 64-square board
//! using a single `u64`. The layout is reversed relative to the square index:
//! A1 is bit 63 and H8 is bit 0.

use crate::direction::Direction;
use crate::square::Square;

/// Bitboard mask representing the four corner squares (A1, H1, A8, H8).
pub const CORNER_MASK: u64 = 0x8100000000000081;

/// Bitboard mask of every edge square.
pub const EDGE_MASK: u64 = 0xff818181818181ff;

/// Newtype wrapper for a 64-bit bitboard (bit 63 = A1, bit 0 = H8).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Bitboard(u64);

impl Bitboard {
    /// A bitboard with no square set.
    pub const EMPTY: Bitboard = Bitboard(0);

    /// A bitboard with every square set.
    pub const FULL: Bitboard = Bitboard(u64::MAX);

    /// Creates a new bitboard from raw bits.
    ///
    /// # Arguments
    ///
    /// * `bits` - Raw 64-bit value where each bit represents a square.
    ///
    /// # Returns
    ///
    /// A new `Bitboard` wrapping the given bits.
    #[inline(always)]
    pub const fn new(bits: u64) -> Self {
        Bitboard(bits)
    }

    /// Returns the raw 64-bit value.
    #[inline(always)]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Creates a bitboard with a single bit set at the given square.
    #[inline(always)]
    pub const fn from_square(sq: Square) -> Self {
        Bitboard(sq.bitboard())
    }

    /// Returns a new bitboard with the bit at the given square set.
    #[inline(always)]
    pub const fn set(self, sq: Square) -> Self {
        Bitboard(self.0 | sq.bitboard())
    }

    /// Returns a new bitboard with the bit at the given square removed.
    #[inline(always)]
    pub const fn remove(self, sq: Square) -> Self {
        Bitboard(self.0 & !sq.bitboard())
    }

    /// Checks if the bitboard contains the bit at the given square.
    ///
    /// # Arguments
    ///
    /// * `sq` - The square to check.
    ///
    /// # Returns
    ///
    /// `true` if the specified square's bit is set, `false` otherwise.
    #[inline(always)]
    pub const fn contains(self, sq: Square) -> bool {
        self.0 & sq.bitboard() != 0
    }

    /// Checks if the bitboard has no bits set.
    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of set bits (population count).
    ///
    /// # Returns
    ///
    /// The number of bits set in the bitboard (0-64).
    #[inline(always)]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Moves every set square one step along `dir`, dropping squares that
    /// fall off the board.
    #[inline(always)]
    pub const fn shift(self, dir: Direction) -> Self {
        Bitboard(dir.shift(self.0))
    }

    /// Returns every square adjacent to at least one square of this bitboard.
    #[inline]
    pub fn neighbours(self) -> Self {
        Direction::ALL
            .iter()
            .fold(Bitboard::EMPTY, |acc, &dir| acc | self.shift(dir))
    }

    /// Removes and returns the first square in row-major order.
    ///
    /// # Returns
    ///
    /// A tuple of the square and the bitboard without it. The bitboard must not
    /// be empty.
    #[inline(always)]
    pub fn pop_first(self) -> (Square, Self) {
        debug_assert!(self.0 != 0);
        let sq = Square::from_usize_unchecked(self.0.leading_zeros() as usize);
        (sq, self.remove(sq))
    }

    /// Returns only the corner squares.
    #[inline(always)]
    pub const fn corners(self) -> Self {
        Bitboard(self.0 & CORNER_MASK)
    }

    /// Returns an iterator over the set squares in row-major order.
    #[inline(always)]
    pub fn iter(self) -> BitboardIterator {
        BitboardIterator::new(self)
    }
}

// Operator trait implementations

impl std::ops::BitAnd for Bitboard {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl std::ops::BitOr for Bitboard {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl std::ops::BitXor for Bitboard {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl std::ops::Not for Bitboard {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

impl std::ops::BitAndAssign for Bitboard {
    #[inline(always)]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl std::ops::BitOrAssign for Bitboard {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitXorAssign for Bitboard {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

// Conversion trait implementations

impl From<u64> for Bitboard {
    #[inline(always)]
    fn from(bits: u64) -> Self {
        Bitboard(bits)
    }
}

impl From<Bitboard> for u64 {
    #[inline(always)]
    fn from(bb: Bitboard) -> Self {
        bb.0
    }
}

impl From<Square> for Bitboard {
    #[inline(always)]
    fn from(sq: Square) -> Self {
        Bitboard::from_square(sq)
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIterator;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        BitboardIterator::new(self)
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        iter.into_iter().fold(Bitboard::EMPTY, Bitboard::set)
    }
}

impl std::fmt::Display for Bitboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, sq) in Square::iter().enumerate() {
            write!(f, "{}", if self.contains(sq) { '1' } else { '.' })?;
            if i % 8 == 7 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// An iterator that yields each set square of a bitboard in row-major order.
pub struct BitboardIterator {
    bitboard: Bitboard,
}

impl BitboardIterator {
    /// Creates a new `BitboardIterator`.
    ///
    /// # Arguments
    ///
    /// * `bitboard` - The bitboard to iterate over.
    #[inline(always)]
    pub fn new(bitboard: Bitboard) -> BitboardIterator {
        BitboardIterator { bitboard }
    }
}

impl Iterator for BitboardIterator {
    type Item = Square;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.bitboard.is_empty() {
            return None;
        }

        let (square, rest) = self.bitboard.pop_first();
        self.bitboard = rest;
        Some(square)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bitboard.count() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitboardIterator {}
