//! Grid locations and house membership tables.

use std::fmt::{self, Debug};

/// A cell location on the 9×9 grid, stored as the linear index `row * 9 + col`.
///
/// Rows and columns are numbered 0-8 from the top-left corner. Boxes are the
/// nine 3×3 blocks, numbered 0-8 in row-major order.
///
/// # Examples
///
/// ```
/// use lacuna_core::Position;
///
/// let pos = Position::new(4, 7);
/// assert_eq!(pos.row(), 4);
/// assert_eq!(pos.col(), 7);
/// assert_eq!(pos.index(), 4 * 9 + 7);
/// assert_eq!(pos.box_index(), 5);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    index: u8,
}

impl Position {
    /// All 81 positions in row-major order.
    pub const ALL: [Self; 81] = {
        let mut all = [Self { index: 0 }; 81];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 81 {
            all[i] = Self { index: i as u8 };
            i += 1;
        }
        all
    };

    /// The nine rows, each listing its positions left to right.
    pub const ROWS: [[Self; 9]; 9] = {
        let mut rows = [[Self { index: 0 }; 9]; 9];
        let mut row = 0;
        while row < 9 {
            let mut col = 0;
            while col < 9 {
                rows[row][col] = Self::new(row, col);
                col += 1;
            }
            row += 1;
        }
        rows
    };

    /// The nine columns, each listing its positions top to bottom.
    pub const COLUMNS: [[Self; 9]; 9] = {
        let mut columns = [[Self { index: 0 }; 9]; 9];
        let mut col = 0;
        while col < 9 {
            let mut row = 0;
            while row < 9 {
                columns[col][row] = Self::new(row, col);
                row += 1;
            }
            col += 1;
        }
        columns
    };

    /// The nine 3×3 boxes, each listing its members in row-major order.
    pub const BOXES: [[Self; 9]; 9] = {
        let mut boxes = [[Self { index: 0 }; 9]; 9];
        let mut b = 0;
        while b < 9 {
            let mut cell = 0;
            while cell < 9 {
                let row = (b / 3) * 3 + cell / 3;
                let col = (b % 3) * 3 + cell % 3;
                boxes[b][cell] = Self::new(row, col);
                cell += 1;
            }
            b += 1;
        }
        boxes
    };

    /// Creates a position from row and column indices.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not in the range 0-8.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn new(row: usize, col: usize) -> Self {
        assert!(row < 9 && col < 9, "position out of range");
        Self {
            index: (row * 9 + col) as u8,
        }
    }

    /// Creates a position from its linear index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in the range 0-80.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn from_index(index: usize) -> Self {
        assert!(index < 81, "position index out of range");
        Self { index: index as u8 }
    }

    /// Returns the linear index `row * 9 + col` (0-80).
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Returns the row index (0-8).
    #[must_use]
    #[inline]
    pub const fn row(self) -> usize {
        self.index() / 9
    }

    /// Returns the column index (0-8).
    #[must_use]
    #[inline]
    pub const fn col(self) -> usize {
        self.index() % 9
    }

    /// Returns the index of the 3×3 box containing this position (0-8).
    #[must_use]
    #[inline]
    pub const fn box_index(self) -> usize {
        (self.row() / 3) * 3 + self.col() / 3
    }
}

impl Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({}, {})", self.row(), self.col())
    }
}
