//! Shared puzzle fixtures for solver tests.

use lacuna_core::{Grid, Position};

/// A widely circulated example puzzle with 30 givens and a unique solution.
/// Easy enough that propagation does most of the work.
pub(crate) const CLASSIC: &str = "\
    53_ _7_ ___
    6__ 195 ___
    _98 ___ _6_
    8__ _6_ __3
    4__ 8_3 __1
    7__ _2_ __6
    _6_ ___ 28_
    ___ 419 __5
    ___ _8_ _79";

/// The unique solution of [`CLASSIC`].
pub(crate) const CLASSIC_SOLVED: &str = "\
    534 678 912
    672 195 348
    198 342 567
    859 761 423
    426 853 791
    713 924 856
    961 537 284
    287 419 635
    345 286 179";

/// A 21-given puzzle constructed to resist singles-based propagation, so
/// solving it forces the search to guess and backtrack.
pub(crate) const HARD: &str = "\
    8__ ___ ___
    __3 6__ ___
    _7_ _9_ 2__
    _5_ __7 ___
    ___ _45 7__
    ___ 1__ _3_
    __1 ___ _68
    __8 5__ _1_
    _9_ ___ 4__";

/// A grid with no solution: the three open cells of row 0 must take
/// `{1, 2, 3}`, but the 3 in box 0 bars each of them from hosting a 3.
/// Every open cell keeps at least two candidates, so propagation never
/// exposes the contradiction; the search refutes it within a few
/// placements because the confined cells sort to the queue head.
pub(crate) const UNSOLVABLE: &str = "\
    ___ 456 789
    3__ ___ ___
    ___ ___ ___
    ___ ___ ___
    ___ ___ ___
    ___ ___ ___
    ___ ___ ___
    ___ ___ ___
    ___ ___ ___";

/// Number of blanks in the [`chain_puzzle`] fixture.
pub(crate) const CHAIN_GAPS: usize = 17;

/// Parses a fixture grid.
///
/// # Panics
///
/// Panics if the text cannot be parsed as a valid grid.
#[track_caller]
pub(crate) fn grid(text: &str) -> Grid {
    text.parse().unwrap()
}

/// Builds a puzzle whose 17 blanks form one long forced chain: the two
/// bottom rows of [`CLASSIC_SOLVED`] are blanked except for the corner
/// cell that anchors the chain. Returns the puzzle and its solution.
pub(crate) fn chain_puzzle() -> (Grid, Grid) {
    let expected = grid(CLASSIC_SOLVED);
    let mut puzzle = expected;
    for &pos in Position::ROWS[7].iter().chain(Position::ROWS[8].iter()) {
        if pos != Position::new(8, 0) {
            puzzle.clear(pos);
        }
    }
    assert_eq!(puzzle.count_empty(), CHAIN_GAPS);
    (puzzle, expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_are_well_formed() {
        assert!(grid(CLASSIC).is_consistent());
        assert!(grid(CLASSIC_SOLVED).is_solved());
        assert!(grid(HARD).is_consistent());
        assert_eq!(grid(HARD).count_empty(), 60);
        // Unsolvable by arithmetic, but the givens themselves do not clash.
        assert!(grid(UNSOLVABLE).is_consistent());
        assert_eq!(grid(UNSOLVABLE).count_empty(), 74);

        let (puzzle, expected) = chain_puzzle();
        assert!(puzzle.is_consistent());
        assert!(expected.is_solved());
    }
}
