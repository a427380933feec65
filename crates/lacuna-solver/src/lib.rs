//! A Sudoku solver built on bitmask constraint tracking and
//! most-constrained-first backtracking search.
//!
//! The entry point is [`solve`], or [`solve_with_options`] to toggle its
//! optimization layers. Solving happens in place on a
//! [`Grid`](lacuna_core::Grid), and every run returns [`SolveStats`]
//! counters describing how the solution was found.
//!
//! # Examples
//!
//! ```
//! use lacuna_core::Grid;
//! use lacuna_solver::solve;
//!
//! let mut grid: Grid =
//!     "530070000600195000098000060800060003400803001700020006060000280000419005000080079"
//!         .parse()?;
//! let (solved, stats) = solve(&mut grid);
//!
//! assert!(solved);
//! assert!(grid.is_solved());
//! assert!(stats.fast_path_fills() > 0);
//! # Ok::<(), lacuna_core::ParseGridError>(())
//! ```

pub use self::{engine::*, options::*, stats::*};

mod engine;
mod masks;
mod options;
mod queue;
mod stats;

#[cfg(test)]
mod testing;
