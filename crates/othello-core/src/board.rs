//! Othello board representation using bitboards.

use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

use log::trace;

use crate::bitboard::Bitboard;
use crate::constants::{BOARD_SQUARES, MAX_FLIP_RUN};
use crate::direction::Direction;
use crate::disc::{Disc, Side};
use crate::error::BoardParseError;
use crate::move_list::{Move, MoveList};
use crate::square::Square;
use crate::stability;
use crate::zobrist;

/// Legal placements of one side, in aggregate and split by capture direction.
///
/// `by_direction[d]` holds the squares from which a ray in direction `d`
/// captures at least one disc.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct MoveMasks {
    all: Bitboard,
    by_direction: [Bitboard; 8],
}

/// Represents an Othello position.
///
/// The board keeps one occupancy mask per side, a running Zobrist hash and a
/// parity flag that flips on every pass. Legal moves are computed lazily per
/// side and cached until the next successful move, so read-only queries take
/// `&self`.
#[derive(Debug, Clone)]
pub struct Board {
    pieces: [Bitboard; 2],
    hash: u64,
    parity: Side,
    moves: [Cell<Option<MoveMasks>>; 2],
}

impl Default for Board {
    /// Creates a board with the standard starting position.
    ///
    /// The initial position has:
    /// - Black discs on D5 and E4
    /// - White discs on D4 and E5
    fn default() -> Self {
        Board {
            pieces: [
                Bitboard::from_square(Square::E4) | Bitboard::from_square(Square::D5),
                Bitboard::from_square(Square::D4) | Bitboard::from_square(Square::E5),
            ],
            hash: zobrist::tables().start_position(),
            parity: Side::White,
            moves: Default::default(),
        }
    }
}

impl Board {
    /// Creates a new `Board` with the standard starting position.
    pub fn new() -> Board {
        Default::default()
    }

    /// Creates a board with no discs on it.
    pub fn empty() -> Board {
        Board {
            pieces: [Bitboard::EMPTY; 2],
            hash: 0,
            parity: Side::White,
            moves: Default::default(),
        }
    }

    /// Creates a board from a row-major grid of discs (x varies fastest).
    ///
    /// # Arguments
    ///
    /// * `grid` - Contents of the 64 squares, A1 first.
    ///
    /// # Returns
    ///
    /// A board holding exactly the given discs, with the default parity.
    pub fn from_grid(grid: &[Disc; BOARD_SQUARES]) -> Board {
        let mut board = Board::empty();
        board.set_board(grid);
        board
    }

    /// Replaces every disc on the board with the contents of `grid`.
    ///
    /// The hash is recomputed from scratch and both move caches are dropped.
    /// Parity is left unchanged.
    pub fn set_board(&mut self, grid: &[Disc; BOARD_SQUARES]) {
        let mut pieces = [Bitboard::EMPTY; 2];
        for (sq, disc) in Square::iter().zip(grid) {
            if let Some(side) = disc.side() {
                pieces[side.index()] = pieces[side.index()].set(sq);
            }
        }
        self.pieces = pieces;
        self.hash = self.compute_hash();
        self.invalidate_moves();
    }

    /// Returns the discs owned by `side`.
    #[inline(always)]
    pub fn pieces(&self, side: Side) -> Bitboard {
        self.pieces[side.index()]
    }

    /// Returns every occupied square.
    #[inline(always)]
    pub fn occupied(&self) -> Bitboard {
        self.pieces[0] | self.pieces[1]
    }

    /// Returns every empty square.
    #[inline(always)]
    pub fn empty_squares(&self) -> Bitboard {
        !self.occupied()
    }

    /// Gets the disc at a specific square.
    pub fn disc_at(&self, sq: Square) -> Disc {
        if self.pieces[Side::Black.index()].contains(sq) {
            Disc::Black
        } else if self.pieces[Side::White.index()].contains(sq) {
            Disc::White
        } else {
            Disc::Empty
        }
    }

    /// Returns the incrementally maintained position hash.
    #[inline(always)]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Recomputes the position hash from the occupancy masks.
    ///
    /// # Returns
    ///
    /// The XOR of the piece keys of every occupied square. Always equal to
    /// [`Board::hash`] on a consistent board.
    pub fn compute_hash(&self) -> u64 {
        let zobrist = zobrist::tables();
        Side::ALL.iter().fold(0, |hash, &side| {
            self.pieces(side)
                .iter()
                .fold(hash, |h, sq| h ^ zobrist.piece(sq, side))
        })
    }

    /// Returns the move-parity flag. It starts as white and flips on every pass.
    #[inline(always)]
    pub fn parity(&self) -> Side {
        self.parity
    }

    #[inline]
    fn invalidate_moves(&mut self) {
        for cache in &self.moves {
            cache.set(None);
        }
    }

    #[inline]
    fn move_masks(&self, side: Side) -> MoveMasks {
        let cache = &self.moves[side.index()];
        if let Some(masks) = cache.get() {
            return masks;
        }
        let masks = self.calc_moves(side);
        cache.set(Some(masks));
        masks
    }

    /// Computes the legal placements of `side`.
    ///
    /// For each direction, runs of opponent discs adjacent to our discs are
    /// extended outward one step at a time; an empty square reached this way
    /// captures back along the opposite direction.
    fn calc_moves(&self, side: Side) -> MoveMasks {
        let own = self.pieces(side);
        let opp = self.pieces(side.opposite());
        let empty = self.empty_squares();

        let mut masks = MoveMasks::default();
        for dir in Direction::ALL {
            let mut candidates = opp & own.shift(dir);
            while !candidates.is_empty() {
                let targets = empty & candidates.shift(dir);
                masks.by_direction[dir.opposite().index()] |= targets;
                masks.all |= targets;
                candidates = opp & candidates.shift(dir);
            }
        }
        masks
    }

    /// Returns the squares where `side` may legally place a disc.
    #[inline]
    pub fn legal_moves(&self, side: Side) -> Bitboard {
        self.move_masks(side).all
    }

    /// Lists the legal moves of `side` in row-major order.
    ///
    /// # Returns
    ///
    /// The placements, or a single pass for `side` when it has none.
    pub fn possible_moves(&self, side: Side) -> MoveList {
        let legal = self.legal_moves(side);
        if legal.is_empty() {
            return [Move::pass(side)].into_iter().collect();
        }
        legal.iter().map(|sq| Move::at(sq, side)).collect()
    }

    /// Checks whether a placement is legal. A pass is never reported as legal.
    #[inline]
    pub fn check_move(&self, mv: Move) -> bool {
        match mv.square() {
            Some(sq) => self.legal_moves(mv.side()).contains(sq),
            None => false,
        }
    }

    /// Applies a move to the board.
    ///
    /// A pass only flips the parity flag. An illegal placement leaves the
    /// board untouched.
    ///
    /// # Arguments
    ///
    /// * `mv` - The move to play, carrying the side that plays it.
    ///
    /// # Returns
    ///
    /// `true` if the move was applied, `false` if it was rejected.
    pub fn do_move(&mut self, mv: Move) -> bool {
        if mv.is_pass() {
            self.parity = self.parity.opposite();
            return true;
        }
        let Some(sq) = mv.square().filter(|_| self.check_move(mv)) else {
            trace!("rejected illegal move {mv:?}");
            return false;
        };

        let side = mv.side();
        let captures = self.move_masks(side).by_direction;
        let zobrist = zobrist::tables();
        let origin = Bitboard::from_square(sq);

        let mut own = self.pieces(side) | origin;
        let mut opp = self.pieces(side.opposite());
        let mut hash = self.hash ^ zobrist.piece(sq, side);

        for dir in Direction::ALL {
            if (captures[dir.index()] & origin).is_empty() {
                continue;
            }
            let mut target = origin.shift(dir);
            let mut len = 0;
            while !target.is_empty() && (target & own).is_empty() {
                own |= target;
                opp ^= target;
                len += 1;
                target = target.shift(dir);
            }
            debug_assert!((1..=MAX_FLIP_RUN).contains(&len));
            hash ^= zobrist.flip(sq, dir, len);
        }

        self.pieces[side.index()] = own;
        self.pieces[side.opposite().index()] = opp;
        self.hash = hash;
        self.invalidate_moves();
        true
    }

    /// Checks if `side` has at least one legal placement.
    #[inline]
    pub fn has_moves(&self, side: Side) -> bool {
        !self.legal_moves(side).is_empty()
    }

    /// Returns the number of legal placements of `side`.
    #[inline]
    pub fn count_moves(&self, side: Side) -> u32 {
        self.legal_moves(side).count()
    }

    /// Returns the number of discs owned by `side`.
    #[inline(always)]
    pub fn count(&self, side: Side) -> u32 {
        self.pieces(side).count()
    }

    /// Returns the number of empty squares.
    #[inline(always)]
    pub fn empty_count(&self) -> u32 {
        self.empty_squares().count()
    }

    /// Checks if the game is over: the board is full or neither side can move.
    pub fn is_done(&self) -> bool {
        self.empty_squares().is_empty()
            || (!self.has_moves(Side::Black) && !self.has_moves(Side::White))
    }

    /// Returns the number of discs of `side` that can never be flipped again,
    /// as far as the line analysis can prove.
    #[inline]
    pub fn count_stable(&self, side: Side) -> u32 {
        stability::count_stable(self.pieces(side), self.occupied())
    }

    /// Returns the number of discs of `side` touching at least one empty square.
    #[inline]
    pub fn frontier_size(&self, side: Side) -> u32 {
        (self.pieces(side) & self.empty_squares().neighbours()).count()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.pieces == other.pieces && self.hash == other.hash && self.parity == other.parity
    }
}

impl Eq for Board {}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses 64 square characters in row-major order, A1 first.
    ///
    /// Whitespace is ignored, so the output of `Display` parses back.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut grid = [Disc::Empty; BOARD_SQUARES];
        let mut n = 0;
        for ch in s.chars().filter(|c| !c.is_whitespace()) {
            let disc = Disc::from_char(ch).ok_or(BoardParseError::InvalidChar { index: n, ch })?;
            if let Some(slot) = grid.get_mut(n) {
                *slot = disc;
            }
            n += 1;
        }
        if n != BOARD_SQUARES {
            return Err(BoardParseError::InvalidLength(n));
        }
        Ok(Board::from_grid(&grid))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, sq) in Square::iter().enumerate() {
            write!(f, "{}", self.disc_at(sq).to_char())?;
            if i % 8 == 7 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
