//! Core error types.

/// Errors produced when parsing a [`Grid`](crate::Grid) from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseGridError {
    /// The text holds the wrong number of cells.
    #[display("expected 81 cells, found {len}")]
    CellCount {
        /// Number of cell characters found.
        len: usize,
    },
    /// A character is neither a digit nor a blank marker.
    #[display("unrecognized cell character {ch:?} at cell {index}")]
    Cell {
        /// The offending character.
        ch: char,
        /// Zero-based index of the cell where it appeared.
        index: usize,
    },
}
