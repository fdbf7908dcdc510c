//! Strength levels: search depth and endgame solver threshold.

use crate::types::Depth;

/// A strength preset.
///
/// Each level defines:
/// - The heuristic search depth used until the endgame
/// - The number of empty squares at or below which the exhaustive solver runs
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Level {
    /// Midgame search depth in plies.
    pub search_depth: Depth,
    /// Empty-square count at which the endgame solver takes over.
    pub endgame_empties: u32,
}

impl Level {
    /// Heuristic search only; the solver never runs.
    pub const fn heuristic_only(search_depth: Depth) -> Self {
        Level {
            search_depth,
            endgame_empties: 0,
        }
    }
}

/// Retrieves the preset for a strength index.
///
/// # Arguments
///
/// * `lv` - The level index, 0 being the weakest.
///
/// # Returns
///
/// `None` if `lv` is past the strongest level.
pub fn get_level(lv: usize) -> Option<Level> {
    LEVELS.get(lv).copied()
}

/// Number of available levels.
pub const NUM_LEVELS: usize = LEVELS.len();

#[rustfmt::skip]
const LEVELS: [Level; 10] = [
    Level { search_depth: 1, endgame_empties:  0 },
    Level { search_depth: 2, endgame_empties:  4 },
    Level { search_depth: 3, endgame_empties:  6 },
    Level { search_depth: 4, endgame_empties:  8 },
    Level { search_depth: 4, endgame_empties: 10 },
    Level { search_depth: 5, endgame_empties: 10 },
    Level { search_depth: 6, endgame_empties: 11 },
    Level { search_depth: 7, endgame_empties: 12 },
    Level { search_depth: 8, endgame_empties: 12 },
    Level { search_depth: 9, endgame_empties: 13 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_level_valid_range() {
        for (i, &expected) in LEVELS.iter().enumerate() {
            assert_eq!(get_level(i), Some(expected));
        }
        assert_eq!(get_level(NUM_LEVELS), None);
    }

    #[test]
    fn test_level_progression() {
        for i in 0..NUM_LEVELS - 1 {
            let current = get_level(i).unwrap();
            let next = get_level(i + 1).unwrap();
            assert!(next.search_depth >= current.search_depth);
            assert!(next.endgame_empties >= current.endgame_empties);
        }
    }

    #[test]
    fn test_heuristic_only() {
        let level = Level::heuristic_only(5);
        assert_eq!(level.search_depth, 5);
        assert_eq!(level.endgame_empties, 0);
    }
}
