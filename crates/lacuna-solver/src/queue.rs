use lacuna_core::{DigitSet, Position};
use tinyvec::ArrayVec;

/// Bookkeeping for one open cell.
#[derive(Debug, Clone, Copy, Default)]
struct CellMeta {
    /// Cached candidate set; read and refreshed only by the fast path.
    candidates: DigitSet,
    /// Candidate count driving the queue order.
    choices: usize,
    /// Index of this cell in `order`.
    slot: usize,
    /// Whether the cell is queued for fast-path recalculation.
    dirty: bool,
}

/// The open cells of a puzzle, kept sorted by candidate count.
///
/// `order[start..start + len]` lists every open cell, fewest candidates
/// first, so the head is always a most-constrained cell. Filling the head
/// shrinks the window from the left; backtracking grows it back. Both are
/// O(1) because a removed cell's slot is never touched while it sits
/// outside the window.
///
/// A LIFO stack of dirty cells feeds the fast-path propagator. Each cell
/// appears on the stack at most once, guarded by its dirty flag.
#[derive(Debug, Clone)]
pub(crate) struct OpenCells {
    meta: [CellMeta; 81],
    order: [Position; 81],
    start: usize,
    len: usize,
    dirty: ArrayVec<[Position; 81]>,
}

impl OpenCells {
    pub(crate) fn new() -> Self {
        Self {
            meta: [CellMeta::default(); 81],
            order: [Position::default(); 81],
            start: 0,
            len: 0,
            dirty: ArrayVec::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The open cell with the fewest candidates.
    pub(crate) fn head(&self) -> Position {
        debug_assert!(self.len > 0, "head of an empty queue");
        self.order[self.start]
    }

    /// Appends a cell during queue construction and sifts it into place.
    ///
    /// The cell starts dirty so that the first fast-path drain revisits it.
    pub(crate) fn push(&mut self, pos: Position, candidates: DigitSet) {
        let slot = self.start + self.len;
        self.meta[pos.index()] = CellMeta {
            candidates,
            choices: candidates.len(),
            slot,
            dirty: true,
        };
        self.order[slot] = pos;
        self.len += 1;
        self.reorder(pos);
        self.dirty.push(pos);
    }

    /// Drops the head from the window once its cell is filled.
    pub(crate) fn remove_head(&mut self) {
        debug_assert!(self.len > 0, "remove_head of an empty queue");
        self.len -= 1;
        self.start += 1;
    }

    /// Re-admits the most recently removed head during backtracking.
    pub(crate) fn restore_head(&mut self) {
        debug_assert!(self.start > 0, "restore_head with nothing removed");
        self.len += 1;
        self.start -= 1;
    }

    /// The cached candidate set of an open cell.
    pub(crate) fn candidates(&self, pos: Position) -> DigitSet {
        self.meta[pos.index()].candidates
    }

    /// The candidate count an open cell is sorted by.
    pub(crate) fn choices(&self, pos: Position) -> usize {
        self.meta[pos.index()].choices
    }

    /// Replaces the cached candidate set and re-sorts the cell.
    pub(crate) fn update(&mut self, pos: Position, candidates: DigitSet) {
        let meta = &mut self.meta[pos.index()];
        meta.candidates = candidates;
        meta.choices = candidates.len();
        self.reorder(pos);
    }

    /// Adjusts the candidate count alone, leaving the cached set stale.
    /// The search sorts by count and never reads the cache, so this is the
    /// cheap variant it uses while descending.
    pub(crate) fn set_choices(&mut self, pos: Position, choices: usize) {
        if self.meta[pos.index()].choices == choices {
            return;
        }
        self.meta[pos.index()].choices = choices;
        self.reorder(pos);
    }

    /// Marks a cell for fast-path recalculation unless already queued.
    pub(crate) fn mark_dirty(&mut self, pos: Position) {
        if self.meta[pos.index()].dirty {
            return;
        }
        self.meta[pos.index()].dirty = true;
        self.dirty.push(pos);
    }

    /// Pops the most recently marked cell and clears its mark.
    pub(crate) fn pop_dirty(&mut self) -> Option<Position> {
        let pos = self.dirty.pop()?;
        self.meta[pos.index()].dirty = false;
        Some(pos)
    }

    /// Sifts `pos` toward its sorted slot.
    ///
    /// Scans left for the furthest slot whose count exceeds this cell's,
    /// falling back to a right scan for slots below it. After a swap the
    /// displaced cell is sifted in turn, which settles any run the swap
    /// disturbed. Cells with equal counts keep their relative order.
    fn reorder(&mut self, pos: Position) {
        let slot = self.meta[pos.index()].slot;
        let choices = self.meta[pos.index()].choices;

        let mut exchange = None;
        for i in (self.start..slot).rev() {
            if self.meta[self.order[i].index()].choices <= choices {
                break;
            }
            exchange = Some(i);
        }
        if exchange.is_none() {
            for i in slot + 1..self.start + self.len {
                if self.meta[self.order[i].index()].choices >= choices {
                    break;
                }
                exchange = Some(i);
            }
        }

        if let Some(exchange) = exchange {
            let other = self.order[exchange];
            self.order[slot] = other;
            self.order[exchange] = pos;
            self.meta[pos.index()].slot = exchange;
            self.meta[other.index()].slot = slot;
            self.reorder(other);
        }
    }

    #[cfg(test)]
    pub(crate) fn window(&self) -> &[Position] {
        &self.order[self.start..self.start + self.len]
    }
}
