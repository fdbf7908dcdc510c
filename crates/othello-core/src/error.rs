//! Error types for the fallible parts of the public API.
//!
//! The search itself never fails: illegal moves are ignored and an exhausted
//! solver budget is an ordinary outcome. Errors only arise when callers hand
//! the crate malformed external data.

use thiserror::Error;

/// Errors produced when parsing a square in algebraic notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Input was not exactly two characters.
    #[error("invalid square format: must be 2 characters (e.g. 'a1')")]
    InvalidFormat,
    /// File character outside `a-h`.
    #[error("invalid file '{0}': must be a-h or A-H")]
    InvalidFile(char),
    /// Rank character outside `1-8`.
    #[error("invalid rank '{0}': must be 1-8")]
    InvalidRank(char),
}

/// Errors produced when building a [`Move`](crate::move_list::Move) from raw coordinates.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("coordinates ({x}, {y}) are outside the 8x8 board")]
    OutOfRange { x: i32, y: i32 },
}

/// Errors produced when parsing a textual board layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardParseError {
    #[error("expected 64 squares, found {0}")]
    InvalidLength(usize),
    #[error("unexpected character '{ch}' at square {index}")]
    InvalidChar { index: usize, ch: char },
}

/// Errors produced when building or updating heuristic weights.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeightsError {
    #[error("weight dimension mismatch: expected {expected}, got {actual}")]
    Length { expected: usize, actual: usize },
    #[error("weight {index} is not finite: {value}")]
    NonFinite { index: usize, value: f32 },
}
