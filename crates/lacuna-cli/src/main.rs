//! Command-line Sudoku solver.
//!
//! Reads puzzles from text files, solves each one, and prints a summary
//! table. A puzzle file holds 81 cells of `1`-`9`, with `_`, `.`, or `0`
//! marking a blank; whitespace is ignored. With no file arguments, every
//! `.txt` file in the current directory is solved in sorted order.
//!
//! # Usage
//!
//! ```sh
//! lacuna puzzles/classic.txt
//! ```
//!
//! Print each puzzle with its solution and the full solver counters:
//!
//! ```sh
//! lacuna --verbose puzzles/classic.txt
//! ```
//!
//! Emit machine-readable JSON instead of the table:
//!
//! ```sh
//! lacuna --json puzzles/*.txt
//! ```
//!
//! The exit status is 0 when every puzzle was solved, 1 when at least one
//! puzzle had no solution, and 2 when a file could not be loaded.

use std::{
    fs,
    path::{Path, PathBuf},
    process,
    time::Duration,
};

use clap::Parser;
use lacuna_core::{Grid, ParseGridError};
use lacuna_solver::{SolveStats, SolverOptions, solve_with_options};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Puzzle files to solve. Defaults to every `.txt` file in the current
    /// directory.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Print each puzzle, its solution, and all solver counters.
    #[arg(short, long)]
    verbose: bool,

    /// Emit results as a JSON array instead of a table.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    solver: SolverFlags,
}

#[derive(Debug, clap::Args)]
struct SolverFlags {
    /// Skip the propagation pass that fills forced cells before the search.
    #[arg(long)]
    no_fast_path: bool,

    /// Skip candidate narrowing based on what peer cells can still hold.
    #[arg(long)]
    no_deduction: bool,
}

impl SolverFlags {
    fn options(&self) -> SolverOptions {
        SolverOptions {
            deduction: !self.no_deduction,
            fast_path: !self.no_fast_path,
        }
    }
}

/// Errors that can occur while loading a puzzle file.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
enum LoadError {
    /// The file could not be read.
    #[display("{_0}")]
    #[from]
    Io(std::io::Error),
    /// The file contents were not a valid grid.
    #[display("{_0}")]
    #[from]
    Parse(ParseGridError),
    /// Two givens in the same row, column, or box share a digit.
    #[display("the givens contradict each other")]
    Inconsistent,
}

/// Per-file solve outcome, shaped for both the table and `--json` output.
#[derive(Debug, serde::Serialize)]
struct Report {
    file: String,
    solved: bool,
    gaps: usize,
    fast_path_fills: usize,
    fast_path_prunes: usize,
    fast_path_prune_branches: usize,
    deduce_prunes: usize,
    deduce_prune_branches: usize,
    failed_attempts: usize,
    backtracks: usize,
    time_ms: f64,
}

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    let options = args.solver.options();

    let files = if args.files.is_empty() {
        match default_files() {
            Ok(files) => files,
            Err(err) => {
                eprintln!("failed to scan the current directory: {err}");
                process::exit(2);
            }
        }
    } else {
        args.files
    };
    if files.is_empty() {
        eprintln!("No puzzle files given and no .txt files in the current directory.");
        process::exit(2);
    }

    let mut reports = Vec::with_capacity(files.len());
    let mut load_failed = false;
    for path in &files {
        match load_grid(path) {
            Ok(grid) => {
                let report = solve_file(path, grid, options, args.verbose && !args.json);
                reports.push(report);
            }
            Err(err) => {
                eprintln!("{}: {err}", path.display());
                load_failed = true;
            }
        }
    }

    if args.json {
        print_json(&reports);
    } else if !args.verbose {
        print_table(&reports);
    }

    if load_failed {
        process::exit(2);
    }
    if reports.iter().any(|report| !report.solved) {
        process::exit(1);
    }
}

/// Collects `./*.txt` in sorted order so runs are deterministic.
fn default_files() -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(".")? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn load_grid(path: &Path) -> Result<Grid, LoadError> {
    parse_grid(&fs::read_to_string(path)?)
}

/// Parses puzzle text and rejects clashing givens, so the solver is only
/// ever handed a consistent grid.
fn parse_grid(text: &str) -> Result<Grid, LoadError> {
    let grid: Grid = text.parse()?;
    if !grid.is_consistent() {
        return Err(LoadError::Inconsistent);
    }
    Ok(grid)
}

fn duration_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1_000.0
}

fn solve_file(path: &Path, mut grid: Grid, options: SolverOptions, verbose: bool) -> Report {
    log::debug!("solving {}", path.display());
    let problem = grid;
    let (solved, stats) = solve_with_options(&mut grid, options);
    if verbose {
        print_details(path, &problem, solved.then_some(&grid), &stats);
    }
    Report {
        file: path.display().to_string(),
        solved,
        gaps: stats.gaps(),
        fast_path_fills: stats.fast_path_fills(),
        fast_path_prunes: stats.fast_path_prunes(),
        fast_path_prune_branches: stats.fast_path_prune_branches(),
        deduce_prunes: stats.deduce_prunes(),
        deduce_prune_branches: stats.deduce_prune_branches(),
        failed_attempts: stats.failed_attempts(),
        backtracks: stats.backtracks(),
        time_ms: duration_ms(stats.elapsed()),
    }
}

fn print_details(path: &Path, problem: &Grid, solution: Option<&Grid>, stats: &SolveStats) {
    println!("File:");
    println!("  {}", path.display());
    println!();

    println!("Problem:");
    print_grid(problem);
    println!();

    match solution {
        Some(solution) => {
            println!("Solution:");
            print_grid(solution);
        }
        None => println!("No solution."),
    }
    println!();

    println!("Stats:");
    println!("  gaps: {}", stats.gaps());
    println!("  fast path fills: {}", stats.fast_path_fills());
    println!(
        "  fast path prunes: {} ({} branches)",
        stats.fast_path_prunes(),
        stats.fast_path_prune_branches()
    );
    println!(
        "  deduce prunes: {} ({} branches)",
        stats.deduce_prunes(),
        stats.deduce_prune_branches()
    );
    println!("  failed attempts: {}", stats.failed_attempts());
    println!("  backtracks: {}", stats.backtracks());
    println!("  time: {:.2}ms", duration_ms(stats.elapsed()));
    println!();
}

fn print_grid(grid: &Grid) {
    for line in format!("{grid:#}").lines() {
        println!("  {line}");
    }
}

fn print_table(reports: &[Report]) {
    println!(
        "{:<28} {:>6} {:>5} {:>6} {:>7} {:>10} {:>10}",
        "file", "solved", "gaps", "fills", "prunes", "backtracks", "time"
    );
    for report in reports {
        let prunes = report.fast_path_prunes + report.deduce_prunes;
        println!(
            "{:<28} {:>6} {:>5} {:>6} {:>7} {:>10} {:>8.2}ms",
            report.file,
            if report.solved { "yes" } else { "no" },
            report.gaps,
            report.fast_path_fills,
            prunes,
            report.backtracks,
            report.time_ms,
        );
    }
}

fn print_json(reports: &[Report]) {
    match serde_json::to_string_pretty(reports) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("failed to encode JSON: {err}");
            process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_flags_parse() {
        let args =
            Args::try_parse_from(["lacuna", "--json", "--no-fast-path", "a.txt", "b.txt"]).unwrap();
        assert!(args.json);
        assert!(!args.verbose);
        assert_eq!(args.files.len(), 2);

        let options = args.solver.options();
        assert!(!options.fast_path);
        assert!(options.deduction);
    }

    #[test]
    fn test_load_error_messages() {
        let err = LoadError::Inconsistent;
        assert_eq!(err.to_string(), "the givens contradict each other");

        let err = LoadError::from("123".parse::<Grid>().unwrap_err());
        assert_eq!(err.to_string(), "expected 81 cells, found 3");
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = load_grid(Path::new("no-such-puzzle-file.txt")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn test_clashing_givens_are_rejected_before_solving() {
        // Two 5s in the top row: parseable, but not a valid puzzle.
        let clashing = "\
            55_ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___";
        let err = parse_grid(clashing).unwrap_err();
        assert!(matches!(err, LoadError::Inconsistent));

        assert!(parse_grid(&"_".repeat(81)).is_ok());
    }

    #[test]
    fn test_time_is_rendered_in_milliseconds() {
        let ms = duration_ms(Duration::from_micros(2_500));
        assert!((ms - 2.5).abs() < 1e-9);
        assert_eq!(format!("{:.2}ms", duration_ms(Duration::from_millis(12))), "12.00ms");
    }

    #[test]
    fn test_report_serializes_all_counters() {
        let report = Report {
            file: "classic.txt".into(),
            solved: true,
            gaps: 51,
            fast_path_fills: 48,
            fast_path_prunes: 2,
            fast_path_prune_branches: 3,
            deduce_prunes: 1,
            deduce_prune_branches: 1,
            failed_attempts: 0,
            backtracks: 0,
            time_ms: 0.25,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["file"], "classic.txt");
        assert_eq!(value["solved"], true);
        assert_eq!(value["gaps"], 51);
        assert_eq!(value["backtracks"], 0);
    }
}
