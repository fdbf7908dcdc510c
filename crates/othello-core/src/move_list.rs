//! Moves and fixed-capacity move lists.

use std::fmt;
use std::slice;

use arrayvec::ArrayVec;

use crate::disc::Side;
use crate::error::MoveError;
use crate::square::Square;

/// Maximum number of moves possible in an Othello position.
pub const MAX_MOVES: usize = 34;

const COORD_MASK: u8 = 0b111;
const Y_SHIFT: u8 = 3;
const SIDE_BIT: u8 = 1 << 6;
const PASS_BIT: u8 = 1 << 7;

/// A move packed into one byte.
///
/// Bits 0-2 hold `x`, bits 3-5 hold `y`, bit 6 the side (set for white) and
/// bit 7 marks a pass. A pass carries no coordinates; it still records which
/// side passed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move(u8);

impl Move {
    /// Creates a placement at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if a coordinate is 8 or more.
    #[inline]
    pub const fn new(x: u8, y: u8, side: Side) -> Move {
        debug_assert!(x < 8 && y < 8);
        Move(x | (y << Y_SHIFT) | Self::side_bits(side))
    }

    /// Creates a placement from signed coordinates, rejecting anything off the board.
    ///
    /// # Returns
    ///
    /// * `Ok(Move)` for coordinates within 0-7.
    /// * `Err(MoveError::OutOfRange)` otherwise.
    pub fn try_new(x: i32, y: i32, side: Side) -> Result<Move, MoveError> {
        match Square::from_xy(x, y) {
            Some(sq) => Ok(Move::at(sq, side)),
            None => Err(MoveError::OutOfRange { x, y }),
        }
    }

    /// Creates a placement on `sq`.
    #[inline]
    pub const fn at(sq: Square, side: Side) -> Move {
        Move::new(sq.x(), sq.y(), side)
    }

    /// Creates a pass for `side`.
    #[inline]
    pub const fn pass(side: Side) -> Move {
        Move(PASS_BIT | Self::side_bits(side))
    }

    #[inline]
    const fn side_bits(side: Side) -> u8 {
        match side {
            Side::Black => 0,
            Side::White => SIDE_BIT,
        }
    }

    #[inline]
    pub const fn is_pass(self) -> bool {
        self.0 & PASS_BIT != 0
    }

    #[inline]
    pub const fn side(self) -> Side {
        if self.0 & SIDE_BIT != 0 { Side::White } else { Side::Black }
    }

    /// Column of the placement. Meaningless for a pass.
    #[inline]
    pub const fn x(self) -> u8 {
        self.0 & COORD_MASK
    }

    /// Row of the placement. Meaningless for a pass.
    #[inline]
    pub const fn y(self) -> u8 {
        (self.0 >> Y_SHIFT) & COORD_MASK
    }

    /// Returns the target square, or `None` for a pass.
    #[inline]
    pub fn square(self) -> Option<Square> {
        if self.is_pass() {
            None
        } else {
            Some(Square::from_usize_unchecked(
                self.y() as usize * 8 + self.x() as usize,
            ))
        }
    }

    /// Returns the packed byte.
    #[inline]
    pub const fn to_bits(self) -> u8 {
        self.0
    }

    /// Rebuilds a move from its packed byte.
    #[inline]
    pub const fn from_bits(bits: u8) -> Move {
        if bits & PASS_BIT != 0 {
            Move(bits & (PASS_BIT | SIDE_BIT))
        } else {
            Move(bits)
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.square() {
            Some(sq) => write!(f, "{sq}"),
            None => write!(f, "pass"),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{self}", self.side().to_char())
    }
}

/// Fixed-capacity list of moves for one position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: ArrayVec<Move, MAX_MOVES>,
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList {
            moves: ArrayVec::new(),
        }
    }

    /// Appends a move.
    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!(self.moves.len() < self.moves.capacity());
        self.moves.push(mv);
    }

    /// Returns the number of moves in the list.
    #[inline]
    pub fn count(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn first(&self) -> Option<Move> {
        self.moves.first().copied()
    }

    #[inline]
    pub fn contains(&self, mv: Move) -> bool {
        self.moves.contains(&mv)
    }

    /// Returns an iterator over the moves in their current order.
    #[inline]
    pub fn iter(&self) -> std::iter::Copied<slice::Iter<'_, Move>> {
        self.moves.iter().copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Moves `mv` to the front, keeping the relative order of the others.
    ///
    /// # Returns
    ///
    /// `true` if the move was present.
    pub fn move_to_front(&mut self, mv: Move) -> bool {
        match self.moves.iter().position(|&m| m == mv) {
            Some(pos) => {
                self.moves[..=pos].rotate_right(1);
                true
            }
            None => false,
        }
    }

    /// Reorders the list by ascending key. Equal keys keep their order.
    pub fn sort_by_key_ascending(&mut self, keys: &[f32]) {
        debug_assert_eq!(keys.len(), self.moves.len());
        let mut keyed: ArrayVec<(f32, Move), MAX_MOVES> =
            keys.iter().copied().zip(self.moves.iter().copied()).collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        for (slot, (_, mv)) in self.moves.iter_mut().zip(keyed) {
            *slot = mv;
        }
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = Move;
    type IntoIter = std::iter::Copied<slice::Iter<'a, Move>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        MoveList {
            moves: iter.into_iter().collect(),
        }
    }
}
