//! Search context for maintaining state during game tree search.

use arrayvec::ArrayVec;

use crate::constants::MAX_PLY;
use crate::move_list::Move;

/// A record stored for each ply in the search stack.
#[derive(Clone, Debug, Default)]
struct StackRecord {
    /// Principal variation line from this ply to the end of search.
    pv: ArrayVec<Move, MAX_PLY>,
}

/// Per-search bookkeeping: node counter, current ply and the triangular
/// principal variation table.
pub struct SearchContext {
    /// Number of nodes searched in this context
    pub n_nodes: u64,
    ply: usize,
    stack: Box<[StackRecord]>,
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchContext {
    pub fn new() -> SearchContext {
        SearchContext {
            n_nodes: 0,
            ply: 0,
            stack: vec![StackRecord::default(); MAX_PLY + 1].into_boxed_slice(),
        }
    }

    /// Returns the distance from the root of the current search.
    #[inline]
    pub fn ply(&self) -> usize {
        self.ply
    }

    /// Descends one ply.
    #[inline]
    pub fn update(&mut self) {
        debug_assert!(self.ply < MAX_PLY);
        self.ply += 1;
    }

    /// Returns to the parent ply.
    #[inline]
    pub fn undo(&mut self) {
        debug_assert!(self.ply > 0);
        self.ply -= 1;
    }

    #[inline]
    pub fn increment_nodes(&mut self) {
        self.n_nodes += 1;
    }

    /// Updates the principal variation at the current ply.
    ///
    /// The line becomes `mv` followed by the line of the child ply.
    ///
    /// # Arguments
    /// * `mv` - Best move at current ply.
    pub fn update_pv(&mut self, mv: Move) {
        let ply = self.ply;
        let (head, tail) = self.stack.split_at_mut(ply + 1);
        let pv = &mut head[ply].pv;
        pv.clear();
        pv.push(mv);
        if let Some(child) = tail.first() {
            let room = pv.remaining_capacity().min(child.pv.len());
            let _ = pv.try_extend_from_slice(&child.pv[..room]);
        }
    }

    /// Clears the principal variation at the current ply.
    #[inline]
    pub fn clear_pv(&mut self) {
        self.stack[self.ply].pv.clear();
    }

    /// Gets the principal variation at the current ply.
    #[inline]
    pub fn pv(&self) -> &[Move] {
        &self.stack[self.ply].pv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disc::Side;
    use crate::square::Square;

    #[test]
    fn test_pv_propagates_upwards() {
        let mut ctx = SearchContext::new();
        let a = Move::at(Square::D3, Side::Black);
        let b = Move::at(Square::C3, Side::White);
        let c = Move::pass(Side::Black);

        ctx.update();
        ctx.update();
        ctx.clear_pv();
        ctx.update_pv(c);
        ctx.undo();
        ctx.update_pv(b);
        ctx.undo();
        ctx.update_pv(a);
        assert_eq!(ctx.pv(), [a, b, c]);

        // A fresh child line replaces the stale tail.
        ctx.update();
        ctx.clear_pv();
        ctx.undo();
        ctx.update_pv(b);
        assert_eq!(ctx.pv(), [b]);
        assert_eq!(ctx.ply(), 0);
    }
}
