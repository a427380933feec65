//! The 81-cell grid.

use std::{
    fmt::{self, Debug, Display, Write as _},
    str::FromStr,
};

use crate::{Digit, DigitSet, ParseGridError, Position};

/// A 9×9 Sudoku grid where each cell holds a digit or is blank.
///
/// A grid can be parsed from text: the digits `1`-`9` are givens, and `.`,
/// `_`, or `0` mark blank cells. Whitespace is ignored, so puzzles can be
/// written as a single 81-character line or laid out row by row.
///
/// # Examples
///
/// ```
/// use lacuna_core::{Digit, Grid, Position};
///
/// let grid: Grid = "
///     53_ _7_ ___
///     6__ 195 ___
///     _98 ___ _6_
///     8__ _6_ __3
///     4__ 8_3 __1
///     7__ _2_ __6
///     _6_ ___ 28_
///     ___ 419 __5
///     ___ _8_ _79
/// "
/// .parse()?;
///
/// assert_eq!(grid.get(Position::new(0, 0)), Some(Digit::D5));
/// assert_eq!(grid.get(Position::new(0, 2)), None);
/// assert_eq!(grid.count_empty(), 51);
/// assert!(grid.is_consistent());
/// # Ok::<(), lacuna_core::ParseGridError>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cells: [Option<Digit>; 81],
}

impl Grid {
    /// Creates a grid with every cell blank.
    #[must_use]
    pub const fn new() -> Self {
        Self { cells: [None; 81] }
    }

    /// Returns the digit at `pos`, or `None` if the cell is blank.
    #[must_use]
    #[inline]
    pub const fn get(&self, pos: Position) -> Option<Digit> {
        self.cells[pos.index()]
    }

    /// Writes a digit into the cell at `pos`.
    #[inline]
    pub fn set(&mut self, pos: Position, digit: Digit) {
        self.cells[pos.index()] = Some(digit);
    }

    /// Blanks the cell at `pos`.
    #[inline]
    pub fn clear(&mut self, pos: Position) {
        self.cells[pos.index()] = None;
    }

    /// Returns the number of blank cells.
    #[must_use]
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Iterates over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Option<Digit>)> + '_ {
        Position::ALL.iter().map(|&pos| (pos, self.get(pos)))
    }

    /// Returns `true` if no row, column, or box contains a repeated digit.
    ///
    /// Blank cells are skipped, so a partially filled puzzle is consistent
    /// as long as its givens do not clash.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.houses_ok(false)
    }

    /// Returns `true` if every cell is filled and every row, column, and box
    /// contains each digit exactly once.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.houses_ok(true)
    }

    fn houses_ok(&self, require_full: bool) -> bool {
        [&Position::ROWS, &Position::COLUMNS, &Position::BOXES]
            .into_iter()
            .flatten()
            .all(|house| self.house_ok(house, require_full))
    }

    fn house_ok(&self, house: &[Position; 9], require_full: bool) -> bool {
        let mut seen = DigitSet::EMPTY;
        for &pos in house {
            match self.get(pos) {
                Some(digit) => {
                    if seen.contains(digit) {
                        return false;
                    }
                    seen.insert(digit);
                }
                None if require_full => return false,
                None => {}
            }
        }
        true
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Grid {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [None; 81];
        let mut len = 0;
        for ch in s.chars().filter(|ch| !ch.is_whitespace()) {
            let cell = match ch {
                '1'..='9' => Some(Digit::ALL[(u32::from(ch) - u32::from('1')) as usize]),
                '.' | '_' | '0' => None,
                _ => return Err(ParseGridError::Cell { ch, index: len }),
            };
            if len < 81 {
                cells[len] = cell;
            }
            len += 1;
        }
        if len != 81 {
            return Err(ParseGridError::CellCount { len });
        }
        Ok(Self { cells })
    }
}

impl Display for Grid {
    /// Formats the grid as 81 characters with `_` for blanks. The alternate
    /// form (`{:#}`) breaks the grid into nine rows of space-separated
    /// triplets. Both forms parse back into an equal grid.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (pos, cell) in self.iter() {
            if f.alternate() && pos.col() == 0 && pos.row() > 0 {
                f.write_char('\n')?;
            }
            if f.alternate() && pos.col() > 0 && pos.col() % 3 == 0 {
                f.write_char(' ')?;
            }
            match cell {
                Some(digit) => write!(f, "{digit}")?,
                None => f.write_char('_')?,
            }
        }
        Ok(())
    }
}

impl Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid({self})")
    }
}
