//! Fixed-capacity transposition table remembering the best move per position.

use aligned_vec::{AVec, ConstAlign};

use crate::disc::Side;
use crate::move_list::Move;
use crate::types::Depth;

/// Cache-line alignment of the entry storage.
const TT_ALIGN: usize = 64;

/// Minimum depth advantage a new result needs to replace an occupied slot.
const REPLACE_MARGIN: i32 = 2;

/// A single entry in the transposition table.
///
/// A depth of zero marks an empty slot; searches never store depth-zero
/// results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TTEntry {
    /// Full position hash for verification
    pub hash: u64,
    /// Remaining search depth the move was found at
    pub depth: i8,
    /// Best move found for the position
    pub best_move: Move,
}

impl TTEntry {
    /// Checks if the slot holds a stored result.
    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.depth != 0
    }
}

/// Direct-mapped table indexed by `hash % capacity`.
pub struct TranspositionTable {
    entries: AVec<TTEntry, ConstAlign<TT_ALIGN>>,
}

impl TranspositionTable {
    /// Creates a table with `capacity` zeroed slots (at least one).
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of slots.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        TranspositionTable {
            entries: AVec::from_iter(TT_ALIGN, (0..capacity).map(|_| TTEntry::default())),
        }
    }

    /// Returns the number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash % self.entries.len() as u64) as usize
    }

    /// Clears all entries in the transposition table.
    pub fn clear(&mut self) {
        self.entries.fill(TTEntry::default());
    }

    /// Returns the entry stored for exactly this hash.
    ///
    /// # Returns
    ///
    /// `None` for an empty slot or a slot owned by a different position.
    #[inline]
    pub fn probe(&self, hash: u64) -> Option<&TTEntry> {
        let entry = &self.entries[self.index(hash)];
        (entry.is_occupied() && entry.hash == hash).then_some(entry)
    }

    /// Returns the stored best move for this position if it belongs to `side`.
    #[inline]
    pub fn best_move(&self, hash: u64, side: Side) -> Option<Move> {
        self.probe(hash)
            .map(|entry| entry.best_move)
            .filter(|mv| mv.side() == side)
    }

    /// Stores a search result.
    ///
    /// The slot is written when it is empty or when its depth is more than
    /// two plies shallower than `depth`. Otherwise the old entry stays, even
    /// if it belongs to another position.
    ///
    /// # Arguments
    ///
    /// * `hash` - Position hash
    /// * `depth` - Remaining depth of the search that produced `best_move`
    /// * `best_move` - The move to remember
    ///
    /// # Returns
    ///
    /// `true` if the entry was written.
    pub fn store(&mut self, hash: u64, depth: Depth, best_move: Move) -> bool {
        if depth == 0 {
            return false;
        }
        let depth = depth.min(i8::MAX as Depth) as i8;
        let index = self.index(hash);
        let slot = &mut self.entries[index];
        if slot.is_occupied() && slot.depth as i32 >= depth as i32 - REPLACE_MARGIN {
            return false;
        }
        *slot = TTEntry {
            hash,
            depth,
            best_move,
        };
        true
    }

    /// Returns the number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.entries.iter().filter(|e| e.is_occupied()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::Square;

    #[test]
    fn test_store_and_probe() {
        let mut tt = TranspositionTable::new(64);
        let mv = Move::at(Square::D3, Side::Black);
        assert!(tt.probe(1234).is_none());
        assert!(tt.store(1234, 5, mv));
        assert_eq!(tt.probe(1234).map(|e| e.best_move), Some(mv));
        assert_eq!(tt.best_move(1234, Side::Black), Some(mv));
        assert_eq!(tt.best_move(1234, Side::White), None);
        assert_eq!(tt.occupied(), 1);
    }

    #[test]
    fn test_full_hash_is_verified() {
        let mut tt = TranspositionTable::new(10);
        tt.store(3, 4, Move::at(Square::A1, Side::White));
        // Same slot, different position.
        assert!(tt.probe(13).is_none());
        assert!(tt.best_move(13, Side::White).is_none());
    }

    #[test]
    fn test_replacement_policy() {
        let mut tt = TranspositionTable::new(10);
        let old = Move::at(Square::A1, Side::Black);
        let new = Move::at(Square::H8, Side::Black);
        assert!(tt.store(7, 4, old));
        // Needs depth > 4 + 2.
        assert!(!tt.store(17, 6, new));
        assert!(!tt.store(7, 5, new));
        assert_eq!(tt.best_move(7, Side::Black), Some(old));
        assert!(tt.store(17, 7, new));
        assert_eq!(tt.best_move(17, Side::Black), Some(new));
        assert!(tt.probe(7).is_none());
    }

    #[test]
    fn test_depth_zero_and_clear() {
        let mut tt = TranspositionTable::new(0);
        assert_eq!(tt.capacity(), 1);
        assert!(!tt.store(1, 0, Move::pass(Side::Black)));
        assert!(tt.store(1, 200, Move::pass(Side::Black)));
        assert_eq!(tt.probe(1).map(|e| e.depth), Some(i8::MAX));
        tt.clear();
        assert_eq!(tt.occupied(), 0);
    }
}
