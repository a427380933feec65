//! Core data types for the Lacuna Sudoku solver.
//!
//! This crate provides the vocabulary shared by the solver and its
//! front-ends:
//!
//! - [`Digit`]: a type-safe Sudoku digit 1-9
//! - [`DigitSet`]: a bit-packed set of digits
//! - [`Position`]: a cell location with row, column, and box coordinates
//! - [`Grid`]: the 81-cell puzzle grid, with parsing and validation
//!
//! # Examples
//!
//! ```
//! use lacuna_core::{Digit, Grid, Position};
//!
//! let mut grid = Grid::new();
//! grid.set(Position::new(0, 0), Digit::D5);
//!
//! assert_eq!(grid.get(Position::new(0, 0)), Some(Digit::D5));
//! assert_eq!(grid.count_empty(), 80);
//! assert!(grid.is_consistent());
//! ```

pub use self::{digit::*, digit_set::*, error::*, grid::*, position::*};

mod digit;
mod digit_set;
mod error;
mod grid;
mod position;
