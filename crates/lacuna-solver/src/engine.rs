use std::time::Instant;

use lacuna_core::{Digit, DigitSet, Grid, Position};
use tinyvec::ArrayVec;

use crate::{SolveStats, SolverOptions, masks::ConstraintMasks, queue::OpenCells};

/// Solves `grid` in place with every optimization enabled.
///
/// On success the grid holds a complete solution. On failure every
/// placement the search tried is undone; cells filled by the fast-path
/// propagation remain. The givens must not clash; check with
/// [`Grid::is_consistent`] before calling.
///
/// # Examples
///
/// ```
/// use lacuna_core::Grid;
/// use lacuna_solver::solve;
///
/// let mut grid: Grid = "\
///     53_ _7_ ___
///     6__ 195 ___
///     _98 ___ _6_
///     8__ _6_ __3
///     4__ 8_3 __1
///     7__ _2_ __6
///     _6_ ___ 28_
///     ___ 419 __5
///     ___ _8_ _79"
///     .parse()?;
///
/// let (solved, stats) = solve(&mut grid);
/// assert!(solved);
/// assert!(grid.is_solved());
/// assert_eq!(stats.gaps(), 51);
/// # Ok::<(), lacuna_core::ParseGridError>(())
/// ```
///
/// # Panics
///
/// Panics if the solver reports success on a grid that fails validation.
/// That would be a bug in the solver, not in the caller's input.
#[must_use]
pub fn solve(grid: &mut Grid) -> (bool, SolveStats) {
    solve_with_options(grid, SolverOptions::new())
}

/// Solves `grid` in place with the given [`SolverOptions`].
///
/// See [`solve`] for the contract; this variant only differs in which
/// optimization layers run.
///
/// # Panics
///
/// Panics if the solver reports success on a grid that fails validation.
#[must_use]
pub fn solve_with_options(grid: &mut Grid, options: SolverOptions) -> (bool, SolveStats) {
    let start = Instant::now();

    let mut engine = Engine::new(grid, options);
    if options.fast_path {
        // A stalled fast path is not a failure; whatever it propagated
        // still speeds up the search, so the result is deliberately unused.
        let _ = engine.fast_path();
    }
    let solved = engine.search();
    let mut stats = engine.stats;

    stats.elapsed = start.elapsed();
    if solved {
        assert!(grid.is_solved(), "solver accepted an invalid solution");
    }
    (solved, stats)
}

/// Working state of one solve: the grid, the house masks, the open-cell
/// queue, and the statistics being gathered.
struct Engine<'g> {
    grid: &'g mut Grid,
    masks: ConstraintMasks,
    open: OpenCells,
    options: SolverOptions,
    stats: SolveStats,
}

impl<'g> Engine<'g> {
    fn new(grid: &'g mut Grid, options: SolverOptions) -> Self {
        let masks = ConstraintMasks::from_grid(grid);
        let mut engine = Self {
            grid,
            masks,
            open: OpenCells::new(),
            options,
            stats: SolveStats::default(),
        };
        for pos in Position::ALL {
            if engine.grid.get(pos).is_none() {
                let candidates = engine.deduced_candidates(pos);
                engine.open.push(pos, candidates);
            }
        }
        engine.stats.gaps = engine.open.len();
        engine
    }

    /// Candidates at `pos` after the hidden-single deduction.
    ///
    /// Starts from the raw row/column/box intersection. Then, per house,
    /// subtracts the raw candidates of every other open cell; a non-empty
    /// remainder holds digits no other cell in that house can take, so
    /// this cell must take one of them and its set shrinks to the
    /// remainder. With open cells A `{1, 2, 3}`, B `{2, 3}`, C `{2, 3}`
    /// alone in a row, only A can host the 1, so A narrows to `{1}`.
    fn deduced_candidates(&mut self, pos: Position) -> DigitSet {
        let mine = self.masks.raw_candidates(pos);
        if mine.is_empty() || !self.options.deduction {
            return mine;
        }

        let mut row_rem = mine;
        let mut col_rem = mine;
        let mut box_rem = mine;

        let row = pos.row();
        let col = pos.col();
        for j in 0..9 {
            let other = Position::ROWS[row][j];
            if other.col() != col && self.grid.get(other).is_none() {
                row_rem = row_rem.difference(self.masks.raw_candidates(other));
            }
            let other = Position::COLUMNS[col][j];
            if other.row() != row && self.grid.get(other).is_none() {
                col_rem = col_rem.difference(self.masks.raw_candidates(other));
            }
            let other = Position::BOXES[pos.box_index()][j];
            if other != pos && self.grid.get(other).is_none() {
                box_rem = box_rem.difference(self.masks.raw_candidates(other));
            }
        }

        let mut deduced = mine;
        if !row_rem.is_empty() {
            deduced &= row_rem;
        }
        if !col_rem.is_empty() {
            deduced &= col_rem;
        }
        if !box_rem.is_empty() {
            deduced &= box_rem;
        }

        if deduced != mine {
            self.stats.deduce_prunes += 1;
            self.stats.deduce_prune_branches += mine.len() - deduced.len();
        }
        deduced
    }

    /// Runs forced fills and dirty-cell recalculation to a fixed point.
    ///
    /// While the head cell has a single candidate it is filled outright.
    /// Otherwise the dirty stack is drained; any narrowing marks the
    /// narrowed cell's peers dirty in turn, and a cell narrowed to one
    /// candidate sends control back to the fill loop. Returns `false` on a
    /// stall, which the caller treats as "hand over to the search", not as
    /// a contradiction.
    fn fast_path(&mut self) -> bool {
        while !self.open.is_empty() {
            let pos = self.open.head();
            let candidates = self.deduced_candidates(pos);
            if let Some(digit) = candidates.as_single() {
                self.place(pos, digit);
                self.stats.fast_path_fills += 1;
                self.mark_peers_dirty(pos);
                continue;
            }

            let mut changed = false;
            while let Some(dirty) = self.open.pop_dirty() {
                if self.grid.get(dirty).is_some() {
                    // Stale entry: the cell was filled after being marked.
                    continue;
                }
                changed = self.recalculate(dirty);
                if changed {
                    self.mark_peers_dirty(dirty);
                    if self.open.choices(dirty) == 1 {
                        break;
                    }
                }
            }
            if !changed {
                return false;
            }
        }
        true
    }

    /// Refreshes a dirty cell's cached candidate set.
    ///
    /// The fresh deduction is intersected with the cache, so the cache only
    /// ever narrows; earlier deductions stay valid as fills accumulate.
    /// Returns whether the cache changed.
    fn recalculate(&mut self, pos: Position) -> bool {
        let fresh = self.deduced_candidates(pos);
        let cached = self.open.candidates(pos);
        let narrowed = fresh & cached;
        if narrowed == cached {
            return false;
        }
        self.stats.fast_path_prunes += 1;
        self.stats.fast_path_prune_branches += cached.len() - narrowed.len();
        self.open.update(pos, narrowed);
        true
    }

    /// Depth-first search over the open cells, most constrained first.
    ///
    /// Candidates are tried in ascending digit order. Every undone
    /// placement counts one backtrack.
    fn search(&mut self) -> bool {
        if self.open.is_empty() {
            return true;
        }

        let pos = self.open.head();
        let candidates = self.deduced_candidates(pos);
        for digit in candidates {
            self.place(pos, digit);
            let viable = self.peers_viable(pos);
            if viable && self.search() {
                return true;
            }
            self.stats.backtracks += 1;
            self.unplace(pos, digit);
        }
        false
    }

    /// Refreshes peer candidate counts after a placement, bailing out as
    /// soon as a peer is left without candidates.
    ///
    /// Only the counts are refreshed, not the cached sets, and the counts
    /// are not restored on undo; they are a sorting heuristic, so a stale
    /// count costs a little queue ordering quality but never correctness.
    fn peers_viable(&mut self, pos: Position) -> bool {
        for peer in self.empty_peers(pos) {
            let choices = self.deduced_candidates(peer).len();
            if choices == 0 {
                self.stats.failed_attempts += 1;
                return false;
            }
            self.open.set_choices(peer, choices);
        }
        true
    }

    /// Queues every open cell sharing a house with `pos` for fast-path
    /// recalculation.
    fn mark_peers_dirty(&mut self, pos: Position) {
        for peer in self.empty_peers(pos) {
            self.open.mark_dirty(peer);
        }
    }

    /// Open cells sharing a row, column, or box with `pos`.
    ///
    /// Box members on the same row or column are already covered by the
    /// row and column scans and are skipped, so a cell has at most
    /// 8 + 8 + 4 peers.
    fn empty_peers(&self, pos: Position) -> ArrayVec<[Position; 20]> {
        let mut peers = ArrayVec::new();
        let row = pos.row();
        let col = pos.col();
        for j in 0..9 {
            let other = Position::ROWS[row][j];
            if other.col() != col && self.grid.get(other).is_none() {
                peers.push(other);
            }
            let other = Position::COLUMNS[col][j];
            if other.row() != row && self.grid.get(other).is_none() {
                peers.push(other);
            }
            let other = Position::BOXES[pos.box_index()][j];
            if other.row() != row && other.col() != col && self.grid.get(other).is_none() {
                peers.push(other);
            }
        }
        peers
    }

    /// Fills the head cell and updates the masks and queue.
    fn place(&mut self, pos: Position, digit: Digit) {
        debug_assert_eq!(self.open.head(), pos, "place off the queue head");
        self.grid.set(pos, digit);
        self.masks.fill(pos, digit);
        self.open.remove_head();
    }

    /// Reverts [`place`](Self::place) during backtracking.
    fn unplace(&mut self, pos: Position, digit: Digit) {
        self.grid.clear(pos);
        self.masks.unfill(pos, digit);
        self.open.restore_head();
    }
}

#[cfg(test)]
mod tests {
    use lacuna_core::Digit::*;

    use super::*;
    use crate::testing::{CHAIN_GAPS, CLASSIC, CLASSIC_SOLVED, HARD, UNSOLVABLE, chain_puzzle, grid};

    #[track_caller]
    fn assert_solves_to(text: &str, expected: &str) -> SolveStats {
        let mut puzzle = grid(text);
        let (solved, stats) = solve(&mut puzzle);
        assert!(solved, "puzzle unexpectedly unsolvable");
        assert!(puzzle.is_solved());
        assert_eq!(puzzle, grid(expected));
        stats
    }

    #[test]
    fn test_solved_grid_passes_through() {
        let mut puzzle = grid(CLASSIC_SOLVED);
        let (solved, stats) = solve(&mut puzzle);

        assert!(solved);
        assert_eq!(puzzle, grid(CLASSIC_SOLVED));
        assert_eq!(stats.gaps(), 0);
        assert_eq!(stats.fast_path_fills(), 0);
        assert_eq!(stats.backtracks(), 0);
        assert_eq!(stats.failed_attempts(), 0);
    }

    #[test]
    fn test_single_blank_is_filled_without_search() {
        let mut puzzle = grid(CLASSIC_SOLVED);
        puzzle.clear(Position::new(0, 0));

        let (solved, stats) = solve(&mut puzzle);

        assert!(solved);
        assert_eq!(puzzle, grid(CLASSIC_SOLVED));
        assert_eq!(stats.gaps(), 1);
        assert_eq!(stats.fast_path_fills(), 1);
        assert_eq!(stats.backtracks(), 0);
        assert_eq!(stats.failed_attempts(), 0);
        assert_eq!(stats.deduce_prunes(), 0);
    }

    #[test]
    fn test_forced_chain_fills_without_search() {
        // Two blanked-out rows whose cells become forced one after
        // another as their row and column constraints resolve.
        let (mut puzzle, expected) = chain_puzzle();
        let (solved, stats) = solve(&mut puzzle);

        assert!(solved);
        assert_eq!(puzzle, expected);
        assert_eq!(stats.gaps(), CHAIN_GAPS);
        assert_eq!(stats.fast_path_fills(), CHAIN_GAPS);
        assert_eq!(stats.backtracks(), 0);
        assert_eq!(stats.failed_attempts(), 0);
    }

    #[test]
    fn test_classic_puzzle_solves() {
        let stats = assert_solves_to(CLASSIC, CLASSIC_SOLVED);
        assert_eq!(stats.gaps(), 51);
    }

    #[test]
    fn test_hard_puzzle_requires_backtracking() {
        let mut puzzle = grid(HARD);
        let (solved, stats) = solve(&mut puzzle);

        assert!(solved);
        assert!(puzzle.is_solved());
        assert_eq!(stats.gaps(), 60);
        // The givens are deliberately resistant to propagation, so the
        // search has to explore and retract real guesses.
        assert!(stats.backtracks() > 0);
        assert!(stats.failed_attempts() > 0);
    }

    #[test]
    fn test_contradiction_fails_and_restores_grid() {
        // Row 0 owes its three open cells the digits 1, 2, and 3, but the
        // 3 in box 0 confines all three cells to {1, 2}. No cell ever
        // shows a single or empty candidate set up front, so only the
        // search can prove the contradiction.
        let mut puzzle = grid(UNSOLVABLE);
        let (solved, stats) = solve(&mut puzzle);

        assert!(!solved);
        assert_eq!(puzzle, grid(UNSOLVABLE));
        assert_eq!(stats.fast_path_fills(), 0);
        assert!(stats.backtracks() > 0);
        assert!(stats.failed_attempts() > 0);
    }

    #[test]
    fn test_empty_grid_finds_a_solution() {
        let mut puzzle = Grid::new();
        let (solved, stats) = solve(&mut puzzle);

        assert!(solved);
        assert!(puzzle.is_solved());
        assert_eq!(stats.gaps(), 81);
    }

    #[test]
    fn test_solves_without_fast_path() {
        let options = SolverOptions {
            fast_path: false,
            ..SolverOptions::new()
        };
        let mut puzzle = grid(CLASSIC);
        let (solved, stats) = solve_with_options(&mut puzzle, options);

        assert!(solved);
        assert_eq!(puzzle, grid(CLASSIC_SOLVED));
        assert_eq!(stats.fast_path_fills(), 0);
        assert_eq!(stats.fast_path_prunes(), 0);
    }

    #[test]
    fn test_solves_without_deduction() {
        let options = SolverOptions {
            deduction: false,
            ..SolverOptions::new()
        };
        let mut puzzle = grid(CLASSIC);
        let (solved, stats) = solve_with_options(&mut puzzle, options);

        assert!(solved);
        assert_eq!(puzzle, grid(CLASSIC_SOLVED));
        assert_eq!(stats.deduce_prunes(), 0);
        assert_eq!(stats.deduce_prune_branches(), 0);
    }

    #[test]
    fn test_solves_with_everything_off() {
        let options = SolverOptions {
            deduction: false,
            fast_path: false,
        };
        let mut puzzle = grid(CLASSIC);
        let (solved, _stats) = solve_with_options(&mut puzzle, options);

        assert!(solved);
        assert_eq!(puzzle, grid(CLASSIC_SOLVED));
    }

    #[test]
    fn test_repeat_runs_are_deterministic() {
        let run = || {
            let mut puzzle = grid(HARD);
            let (solved, stats) = solve(&mut puzzle);
            assert!(solved);
            (puzzle, stats)
        };
        let (first_grid, first) = run();
        let (second_grid, second) = run();

        assert_eq!(first_grid, second_grid);
        assert_eq!(first.gaps(), second.gaps());
        assert_eq!(first.backtracks(), second.backtracks());
        assert_eq!(first.failed_attempts(), second.failed_attempts());
        assert_eq!(first.deduce_prunes(), second.deduce_prunes());
        assert_eq!(
            first.deduce_prune_branches(),
            second.deduce_prune_branches()
        );
        assert_eq!(first.fast_path_fills(), second.fast_path_fills());
        assert_eq!(first.fast_path_prunes(), second.fast_path_prunes());
        assert_eq!(
            first.fast_path_prune_branches(),
            second.fast_path_prune_branches()
        );
    }

    #[test]
    fn test_deduction_narrows_to_the_only_host() {
        // Row 0 holds open cells at columns 0-2 with raw candidates
        // {1,2,3}, {2,3}, {2,3}: the 1s in columns 1 and 2 leave cell
        // (0, 0) as the only host for the row's 1.
        let mut puzzle = grid(
            "___ 456 789
             ___ ___ ___
             ___ ___ ___
             _1_ ___ ___
             ___ ___ ___
             ___ ___ ___
             __1 ___ ___
             ___ ___ ___
             ___ ___ ___",
        );
        assert!(puzzle.is_consistent());
        let mut engine = Engine::new(&mut puzzle, SolverOptions::new());

        let a = Position::new(0, 0);
        assert_eq!(
            engine.masks.raw_candidates(a),
            DigitSet::from_iter([D1, D2, D3])
        );
        assert_eq!(engine.deduced_candidates(a), DigitSet::from_elem(D1));
    }

    #[test]
    fn test_deduced_is_a_subset_of_raw() {
        let mut puzzle = grid(CLASSIC);
        let mut engine = Engine::new(&mut puzzle, SolverOptions::new());

        for pos in Position::ALL {
            if engine.grid.get(pos).is_some() {
                continue;
            }
            let raw = engine.masks.raw_candidates(pos);
            let deduced = engine.deduced_candidates(pos);
            assert_eq!(deduced & raw, deduced, "deduction widened {pos:?}");
        }
    }

    #[test]
    fn test_queue_starts_sorted_with_one_entry_per_gap() {
        let mut puzzle = grid(CLASSIC);
        let count = puzzle.count_empty();
        let engine = Engine::new(&mut puzzle, SolverOptions::new());

        assert_eq!(engine.open.len(), count);
        assert_eq!(engine.stats.gaps, count);
        let counts: Vec<_> = engine
            .open
            .window()
            .iter()
            .map(|&pos| engine.open.choices(pos))
            .collect();
        assert!(counts.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
