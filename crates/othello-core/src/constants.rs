//! Global constants

use crate::types::{Depth, Scoref};

/// Number of squares on the board.
pub const BOARD_SQUARES: usize = 64;

/// Side length of the board.
pub const BOARD_SIZE: usize = 8;

/// Maximum number of plies tracked by the principal-variation table.
pub const MAX_PLY: usize = 64;

/// Deepest search accepted by the search tree.
pub const MAX_SEARCH_DEPTH: Depth = MAX_PLY as Depth - 1;

/// Infinity score for search windows.
pub const SCORE_INF: Scoref = f32::MAX;

/// Minimum width of the null window used by principal variation search.
pub const PVS_WINDOW: Scoref = 0.0001;

/// Remaining depth above which moves are pre-sorted by a shallow scan.
pub const ORDERING_MIN_DEPTH: Depth = 4;

/// Depth of the scan used to pre-sort moves.
pub const ORDERING_SCAN_DEPTH: Depth = 1;

/// Seed for the Zobrist tables, fixed so hashes are reproducible.
pub const ZOBRIST_SEED: u64 = 1337;

/// Longest run of discs a single ray can flip.
pub const MAX_FLIP_RUN: usize = 6;
