use std::fmt;
use std::ops::Not;

/// One of the two players.
///
/// Black moves first in a standard game. The discriminant doubles as the index
/// into per-side tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    Black = 0,
    White = 1,
}

impl Side {
    /// Both sides, in index order.
    pub const ALL: [Side; 2] = [Side::Black, Side::White];

    /// Returns the other side.
    #[inline]
    pub const fn opposite(self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    /// Returns the index of this side into per-side tables (0 or 1).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Builds a side from its table index.
    ///
    /// # Arguments
    ///
    /// * `index` - 0 for black, anything else for white.
    #[inline]
    pub const fn from_index(index: usize) -> Side {
        if index == 0 { Side::Black } else { Side::White }
    }

    /// Converts the side to the character used for its discs.
    ///
    /// # Returns
    ///
    /// * `'X'` for `Side::Black`
    /// * `'O'` for `Side::White`
    pub fn to_char(self) -> char {
        Disc::from(self).to_char()
    }
}

impl Not for Side {
    type Output = Side;

    #[inline]
    fn not(self) -> Side {
        self.opposite()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Black => write!(f, "black"),
            Side::White => write!(f, "white"),
        }
    }
}

/// Represents a disc in the game.
///
/// The `Disc` enum has three variants:
///
/// * `Empty` - Represents an empty spot on the board.
/// * `Black` - Represents a black disc.
/// * `White` - Represents a white disc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disc {
    #[default]
    Empty,
    Black,
    White,
}

impl Disc {
    /// Converts the disc to its corresponding character representation.
    ///
    /// # Returns
    ///
    /// * `'-'` for `Disc::Empty`
    /// * `'X'` for `Disc::Black`
    /// * `'O'` for `Disc::White`
    pub fn to_char(self) -> char {
        match self {
            Disc::Empty => '-',
            Disc::Black => 'X',
            Disc::White => 'O',
        }
    }

    /// Parses a disc from its character form.
    ///
    /// Accepts `X`, `B` or `*` for black, `O` or `W` for white (either case)
    /// and `-` or `.` for empty.
    pub fn from_char(c: char) -> Option<Disc> {
        match c {
            '-' | '.' => Some(Disc::Empty),
            'X' | 'x' | '*' | 'B' | 'b' => Some(Disc::Black),
            'O' | 'o' | 'W' | 'w' => Some(Disc::White),
            _ => None,
        }
    }

    /// Returns the owner of this disc, or `None` for an empty square.
    pub fn side(self) -> Option<Side> {
        match self {
            Disc::Empty => None,
            Disc::Black => Some(Side::Black),
            Disc::White => Some(Side::White),
        }
    }
}

impl From<Side> for Disc {
    fn from(side: Side) -> Disc {
        match side {
            Side::Black => Disc::Black,
            Side::White => Disc::White,
        }
    }
}
