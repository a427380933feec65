use std::time::Duration;

/// Counters describing a single solver run.
///
/// The counts are deterministic for a given grid and options; only
/// [`elapsed`](Self::elapsed) varies between runs.
///
/// # Examples
///
/// ```
/// use lacuna_core::Grid;
/// use lacuna_solver::solve;
///
/// let mut grid: Grid = "\
///     534 678 912
///     672 195 348
///     198 342 567
///     859 761 423
///     426 853 791
///     713 924 856
///     961 537 284
///     287 419 635
///     345 286 179"
///     .parse()?;
/// let (solved, stats) = solve(&mut grid);
///
/// assert!(solved);
/// assert_eq!(stats.gaps(), 0);
/// assert_eq!(stats.backtracks(), 0);
/// # Ok::<(), lacuna_core::ParseGridError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SolveStats {
    pub(crate) backtracks: usize,
    pub(crate) failed_attempts: usize,
    pub(crate) deduce_prunes: usize,
    pub(crate) deduce_prune_branches: usize,
    pub(crate) fast_path_fills: usize,
    pub(crate) fast_path_prunes: usize,
    pub(crate) fast_path_prune_branches: usize,
    pub(crate) elapsed: Duration,
    pub(crate) gaps: usize,
}

impl SolveStats {
    /// Number of blank cells when the solve started.
    #[must_use]
    pub const fn gaps(&self) -> usize {
        self.gaps
    }

    /// Placements the search undid while backtracking.
    #[must_use]
    pub const fn backtracks(&self) -> usize {
        self.backtracks
    }

    /// Placements refuted because a peer was left without candidates.
    #[must_use]
    pub const fn failed_attempts(&self) -> usize {
        self.failed_attempts
    }

    /// Times the hidden-single deduction narrowed a candidate set.
    #[must_use]
    pub const fn deduce_prunes(&self) -> usize {
        self.deduce_prunes
    }

    /// Total candidates removed by the hidden-single deduction.
    #[must_use]
    pub const fn deduce_prune_branches(&self) -> usize {
        self.deduce_prune_branches
    }

    /// Cells the fast path filled because a single candidate remained.
    #[must_use]
    pub const fn fast_path_fills(&self) -> usize {
        self.fast_path_fills
    }

    /// Dirty-cell recalculations that narrowed a cached candidate set.
    #[must_use]
    pub const fn fast_path_prunes(&self) -> usize {
        self.fast_path_prunes
    }

    /// Total candidates removed by dirty-cell recalculation.
    #[must_use]
    pub const fn fast_path_prune_branches(&self) -> usize {
        self.fast_path_prune_branches
    }

    /// Wall-clock time of the whole solve call.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
