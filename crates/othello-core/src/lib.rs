pub mod bitboard;
pub mod board;
pub mod constants;
pub mod direction;
pub mod disc;
pub mod error;
pub mod eval;
pub mod level;
pub mod move_list;
pub mod options;
pub mod perft;
pub mod player;
pub mod search;
pub mod square;
mod stability;
pub mod transposition_table;
pub mod types;
pub mod zobrist;

/// Builds the shared lookup tables up front. Optional: they are otherwise
/// built on first use.
pub fn init() {
    zobrist::init();
}
