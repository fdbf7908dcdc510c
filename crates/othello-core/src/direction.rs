//! The eight compass directions and the masked bit shifts that move a set of
//! squares one step along them.

/// Clears the bits that would wrap from column H into column A.
pub const LEFT_MASK: u64 = 0xfefefefefefefefe;

/// Clears the bits that would wrap from column A into column H.
pub const RIGHT_MASK: u64 = 0x7f7f7f7f7f7f7f7f;

/// A compass direction on the board.
///
/// North decreases `y`, east increases `x`. The discriminant order is fixed:
/// the direction at index `i + 4` is the opposite of the one at index `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    NorthWest = 0,
    North = 1,
    NorthEast = 2,
    East = 3,
    SouthEast = 4,
    South = 5,
    SouthWest = 6,
    West = 7,
}

impl Direction {
    /// All directions in index order.
    pub const ALL: [Direction; 8] = [
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the direction pointing the other way.
    #[inline]
    pub const fn opposite(self) -> Direction {
        Direction::ALL[(self as usize + 4) % 8]
    }

    /// Returns the `(dx, dy)` step of this direction.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::NorthWest => (-1, -1),
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Moves every set bit one square along this direction.
    ///
    /// Bits that would leave the board, or wrap around to the other edge,
    /// are dropped.
    ///
    /// # Arguments
    ///
    /// * `bits` - Raw bitboard in the reversed layout (A1 is bit 63).
    ///
    /// # Returns
    ///
    /// The shifted bitboard.
    #[inline(always)]
    pub const fn shift(self, bits: u64) -> u64 {
        match self {
            Direction::NorthWest => (bits << 9) & LEFT_MASK,
            Direction::North => bits << 8,
            Direction::NorthEast => (bits << 7) & RIGHT_MASK,
            Direction::East => (bits >> 1) & RIGHT_MASK,
            Direction::SouthEast => (bits >> 9) & RIGHT_MASK,
            Direction::South => bits >> 8,
            Direction::SouthWest => (bits >> 7) & LEFT_MASK,
            Direction::West => (bits << 1) & LEFT_MASK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::Square;

    #[test]
    fn test_opposite() {
        for dir in Direction::ALL {
            assert_ne!(dir.opposite(), dir);
            assert_eq!(dir.opposite().opposite(), dir);
            let (dx, dy) = dir.delta();
            assert_eq!(dir.opposite().delta(), (-dx, -dy));
        }
    }

    #[test]
    fn test_shift_matches_delta() {
        for sq in Square::iter() {
            for dir in Direction::ALL {
                let (dx, dy) = dir.delta();
                let expected = Square::from_xy(sq.x() as i32 + dx, sq.y() as i32 + dy)
                    .map_or(0, Square::bitboard);
                assert_eq!(
                    dir.shift(sq.bitboard()),
                    expected,
                    "shift of {sq} towards {dir:?}"
                );
            }
        }
    }
}
