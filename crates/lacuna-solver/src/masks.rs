use lacuna_core::{Digit, DigitSet, Grid, Position};

/// Per-house digit availability masks.
///
/// Three arrays of nine [`DigitSet`]s track which digits each row, column,
/// and box can still take. A cell's raw candidate set is the intersection of
/// the three masks covering it; placing or erasing a digit updates exactly
/// three masks, so both directions are O(1).
#[derive(Debug, Clone)]
pub(crate) struct ConstraintMasks {
    rows: [DigitSet; 9],
    cols: [DigitSet; 9],
    boxes: [DigitSet; 9],
}

impl ConstraintMasks {
    pub(crate) fn new() -> Self {
        Self {
            rows: [DigitSet::FULL; 9],
            cols: [DigitSet::FULL; 9],
            boxes: [DigitSet::FULL; 9],
        }
    }

    /// Builds masks reflecting every digit already placed in `grid`.
    ///
    /// The grid is expected to be consistent; each given clears its digit
    /// from the three houses covering it.
    pub(crate) fn from_grid(grid: &Grid) -> Self {
        let mut masks = Self::new();
        for (pos, cell) in grid.iter() {
            if let Some(digit) = cell {
                masks.fill(pos, digit);
            }
        }
        masks
    }

    /// Records that `digit` now occupies `pos`.
    #[inline]
    pub(crate) fn fill(&mut self, pos: Position, digit: Digit) {
        self.rows[pos.row()].remove(digit);
        self.cols[pos.col()].remove(digit);
        self.boxes[pos.box_index()].remove(digit);
    }

    /// Reverts [`fill`](Self::fill) for a digit being backtracked out.
    #[inline]
    pub(crate) fn unfill(&mut self, pos: Position, digit: Digit) {
        debug_assert!(
            !self.rows[pos.row()].contains(digit)
                && !self.cols[pos.col()].contains(digit)
                && !self.boxes[pos.box_index()].contains(digit),
            "unfill of a digit that is not placed: {digit} at {pos:?}"
        );
        self.rows[pos.row()].insert(digit);
        self.cols[pos.col()].insert(digit);
        self.boxes[pos.box_index()].insert(digit);
    }

    /// Digits permitted at `pos` by its row, column, and box alone.
    #[inline]
    pub(crate) fn raw_candidates(&self, pos: Position) -> DigitSet {
        self.rows[pos.row()] & self.cols[pos.col()] & self.boxes[pos.box_index()]
    }
}
