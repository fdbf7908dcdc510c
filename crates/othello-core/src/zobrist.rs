//! Zobrist hashing tables.
//!
//! A position hash is the XOR of one random key per occupied square and
//! colour. Flipping a run of discs toggles both colour keys of every square in
//! the run, so the combined XOR for each (square, direction, run length) is
//! precomputed and a move updates the hash with one lookup per captured ray.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{BOARD_SQUARES, MAX_FLIP_RUN, ZOBRIST_SEED};
use crate::direction::Direction;
use crate::disc::Side;
use crate::square::Square;

static ZOBRIST: OnceLock<ZobristTables> = OnceLock::new();

/// Precomputed hash keys, built once from a fixed seed.
pub struct ZobristTables {
    /// Key per side and square.
    piece: [[u64; BOARD_SQUARES]; 2],
    /// Combined flip key per start square, direction and run length - 1.
    /// Runs that would reach the board edge hold 0 since they can never occur.
    flip: [[[u64; MAX_FLIP_RUN]; 8]; BOARD_SQUARES],
    /// Hash of the standard starting position.
    start: u64,
}

impl ZobristTables {
    fn new() -> ZobristTables {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut piece = [[0u64; BOARD_SQUARES]; 2];
        for side_keys in piece.iter_mut() {
            for key in side_keys.iter_mut() {
                *key = rng.random::<u64>();
            }
        }

        let toggle = |sq: Square| {
            piece[Side::Black.index()][sq.index()] ^ piece[Side::White.index()][sq.index()]
        };

        let mut flip = [[[0u64; MAX_FLIP_RUN]; 8]; BOARD_SQUARES];
        for origin in Square::iter() {
            for dir in Direction::ALL {
                let (dx, dy) = dir.delta();
                let (mut x, mut y) = (origin.x() as i32, origin.y() as i32);
                let mut acc = 0u64;
                for len in 0..MAX_FLIP_RUN {
                    x += dx;
                    y += dy;
                    // A flipped run must be closed by a disc on the far side.
                    let (Some(sq), Some(_)) = (Square::from_xy(x, y), Square::from_xy(x + dx, y + dy))
                    else {
                        break;
                    };
                    acc ^= toggle(sq);
                    flip[origin.index()][dir.index()][len] = acc;
                }
            }
        }

        let start = [
            (Square::D4, Side::White),
            (Square::E4, Side::Black),
            (Square::D5, Side::Black),
            (Square::E5, Side::White),
        ]
        .iter()
        .fold(0, |h, &(sq, side)| h ^ piece[side.index()][sq.index()]);

        ZobristTables { piece, flip, start }
    }

    /// Key of a single disc.
    #[inline]
    pub fn piece(&self, sq: Square, side: Side) -> u64 {
        self.piece[side.index()][sq.index()]
    }

    /// Combined key toggling `len` discs starting next to `origin` along `dir`.
    ///
    /// # Arguments
    ///
    /// * `origin` - The square the move was played on.
    /// * `dir` - Direction of the captured ray.
    /// * `len` - Number of flipped discs, 1 to 6.
    ///
    /// # Returns
    ///
    /// The XOR key, or 0 for a run that cannot occur on the board.
    #[inline]
    pub fn flip(&self, origin: Square, dir: Direction, len: usize) -> u64 {
        debug_assert!((1..=MAX_FLIP_RUN).contains(&len));
        self.flip[origin.index()][dir.index()][len - 1]
    }

    /// Hash of the standard starting position.
    #[inline]
    pub fn start_position(&self) -> u64 {
        self.start
    }
}

/// Returns the global Zobrist tables, building them on first use.
#[inline]
pub fn tables() -> &'static ZobristTables {
    ZOBRIST.get_or_init(ZobristTables::new)
}

/// Builds the Zobrist tables eagerly.
pub fn init() {
    tables();
}
