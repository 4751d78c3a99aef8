#![allow(clippy::cast_precision_loss)]

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use dpll_solver::sat::cnf::Cnf;
use dpll_solver::sat::dpll::{Dpll, Outcome};
use dpll_solver::sat::formula::Formula;
use dpll_solver::sat::generator::{numbered_variables, random_k_sat};
use dpll_solver::sat::solver::{SolutionStats, Solver};
use dpll_solver::sat::truth_table::TruthTable;
use dpll_solver::sat::variable_selection::{OrderKind, VariableOrder};
use dpll_solver::sudoku::solver::{
    Board, EXAMPLE_FOUR, EXAMPLE_HARDEST, EXAMPLE_NINE, Sudoku, parse_sudoku_file,
};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "dpll-solver", version, about = "A DPLL satisfiability solver")]
pub(crate) struct Cli {
    /// Specifies the subcommand to execute (e.g. `formula`, `sudoku`, `random`).
    #[clap(subcommand)]
    pub command: Commands,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a propositional formula written as an s-expression,
    /// e.g. "(and (or a b) (not (and a b)))".
    Formula {
        /// The formula text.
        #[arg(short, long, required_unless_present = "path", conflicts_with = "path")]
        input: Option<String>,

        /// A file holding the formula text.
        #[arg(long)]
        path: Option<PathBuf>,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a Sudoku puzzle.
    /// The puzzle is encoded as a formula, translated to clauses and solved.
    Sudoku {
        /// Path to a puzzle file, or a directory searched for `.sudoku` files.
        #[arg(long)]
        path: Option<PathBuf>,

        /// One of the built-in puzzles; used when no path is given.
        #[arg(short, long, value_enum, conflicts_with = "path")]
        example: Option<ExamplePuzzle>,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve randomly generated k-CNF formulas.
    Random {
        /// Size of the variable pool.
        #[arg(long, default_value_t = 15)]
        vars: usize,

        /// Number of clauses per formula.
        #[arg(long, default_value_t = 75)]
        clauses: usize,

        /// Literals per clause.
        #[arg(short, default_value_t = 3)]
        k: usize,

        /// Number of formulas to generate.
        #[arg(long, default_value_t = 1)]
        trials: usize,

        /// Compare every verdict with an exhaustive truth table.
        #[arg(long, default_value_t = false)]
        cross_check: bool,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Commands {
    pub(crate) fn common(&self) -> Option<&CommonOptions> {
        match self {
            Self::Formula { common, .. } | Self::Sudoku { common, .. } | Self::Random { common, .. } => {
                Some(common)
            }
            Self::Completions { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ExamplePuzzle {
    Four,
    Nine,
    Hardest,
}

impl ExamplePuzzle {
    fn board(self) -> Board {
        match self {
            Self::Four => Board::from(&EXAMPLE_FOUR),
            Self::Nine => Board::from(&EXAMPLE_NINE),
            Self::Hardest => Board::from(&EXAMPLE_HARDEST),
        }
    }
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Enable debug logging of branching decisions. `RUST_LOG` takes precedence.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Check the model against both the formula and its clause form.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub(crate) verify: bool,

    /// Print problem and search statistics after solving.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub(crate) stats: bool,

    /// Print the satisfying valuation.
    #[arg(short, long, default_value_t = false)]
    pub(crate) print_solution: bool,

    /// Order in which the search branches on variables.
    #[arg(long, value_enum, default_value_t = OrderKind::Sorted)]
    pub(crate) order: OrderKind,

    /// Seed for `--order shuffled` and for generated formulas.
    #[arg(long, default_value_t = 0)]
    pub(crate) seed: u64,
}

impl Default for CommonOptions {
    fn default() -> Self {
        Self {
            debug: false,
            verify: true,
            stats: true,
            print_solution: false,
            order: OrderKind::Sorted,
            seed: 0,
        }
    }
}

/// Configures `env_logger`; `--debug` lowers the default level to `debug`.
pub(crate) fn init_logger(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .format_module_path(false)
        .init();
}

pub(crate) fn print_completions(shell: clap_complete::Shell) {
    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "dpll-solver", &mut std::io::stdout());
}

/// Wall-clock times of the phases of one solve.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Timings {
    pub parse: Duration,
    pub translate: Duration,
    pub solve: Duration,
}

/// Translates `formula`, orders `candidates` and runs the search, then
/// verifies and reports according to `common`.
///
/// # Errors
///
/// If verification is enabled and the model does not satisfy the formula.
pub(crate) fn solve_and_report(
    formula: &Formula,
    candidates: Vec<String>,
    label: &str,
    parse_time: Duration,
    common: &CommonOptions,
) -> Result<Outcome, String> {
    println!("Solving: {label}");

    let time = Instant::now();
    let cnf = formula.clauses();
    let translate = time.elapsed();

    let variables = VariableOrder::from_kind(common.order, common.seed).arrange(candidates);
    debug!(
        "{} variables, {} clauses, {} literals",
        variables.len(),
        cnf.len(),
        cnf.literal_count()
    );

    let time = Instant::now();
    let mut solver = Dpll::new(&cnf, &variables);
    let outcome = solver.solve();
    let timings = Timings {
        parse: parse_time,
        translate,
        solve: time.elapsed(),
    };

    if common.verify {
        verify_solution(formula, &cnf, &variables, &outcome)?;
    }

    if common.stats {
        print_stats(&timings, &cnf, variables.len(), &solver.stats());
    }

    if let Some(model) = outcome.valuation() {
        if common.print_solution {
            println!("Solution: {model}");
        }
    }

    println!(
        "{}",
        if outcome.is_sat() {
            "SATISFIABLE"
        } else {
            "UNSATISFIABLE"
        }
    );

    Ok(outcome)
}

/// Checks a model against the formula, its clause form, and the variable list.
///
/// # Errors
///
/// A description of the first check that failed.
pub(crate) fn verify_solution(
    formula: &Formula,
    cnf: &Cnf,
    variables: &[String],
    outcome: &Outcome,
) -> Result<(), String> {
    let Some(model) = outcome.valuation() else {
        println!("Verified: nothing to check (UNSAT)");
        return Ok(());
    };

    if !model.is_total_over(variables) {
        return Err("model does not assign every variable".to_string());
    }
    if !cnf.is_satisfied_by(model) {
        return Err("model falsifies a clause".to_string());
    }
    match formula.evaluate(model) {
        Ok(true) => {
            println!("Verified: true");
            Ok(())
        }
        Ok(false) => Err("model falsifies the formula".to_string()),
        Err(e) => Err(format!("model cannot evaluate the formula: {e}")),
    }
}

/// Solves a formula given inline or in a file.
///
/// # Errors
///
/// If the file cannot be read, the text does not parse, or verification fails.
pub(crate) fn solve_formula(
    input: Option<&str>,
    path: Option<&Path>,
    common: &CommonOptions,
) -> Result<(), String> {
    let time = Instant::now();
    let (text, label) = match (input, path) {
        (Some(text), _) => (text.to_string(), "<input>".to_string()),
        (None, Some(path)) => (
            std::fs::read_to_string(path)
                .map_err(|e| format!("Unable to read {}: {e}", path.display()))?,
            path.display().to_string(),
        ),
        (None, None) => return Err("No formula given".to_string()),
    };

    let formula: Formula = text.parse().map_err(|e| format!("{e}"))?;
    let parse_time = time.elapsed();
    info!("parsed formula with {} nodes", formula.size());

    solve_and_report(&formula, formula.vars_in_order(), &label, parse_time, common)?;
    Ok(())
}

/// Solves one Sudoku: the built-in example, a single file, or every
/// `.sudoku` file under a directory.
///
/// # Errors
///
/// If a puzzle cannot be read or parsed, or verification fails.
pub(crate) fn solve_sudoku(
    path: Option<&Path>,
    example: Option<ExamplePuzzle>,
    common: &CommonOptions,
) -> Result<(), String> {
    match path {
        Some(path) if path.is_dir() => solve_sudoku_dir(path, common),
        Some(path) => {
            let time = Instant::now();
            let sudoku = parse_sudoku_file(path)
                .map_err(|e| format!("Error parsing Sudoku file {}: {e}", path.display()))?;
            solve_sudoku_puzzle(&sudoku, &path.display().to_string(), time.elapsed(), common)
        }
        None => {
            let example = example.unwrap_or(ExamplePuzzle::Nine);
            let sudoku = Sudoku::new(example.board()).map_err(|e| e.to_string())?;
            solve_sudoku_puzzle(&sudoku, &format!("{example:?}"), Duration::ZERO, common)
        }
    }
}

fn solve_sudoku_dir(path: &Path, common: &CommonOptions) -> Result<(), String> {
    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() || file_path.extension().is_none_or(|ext| ext != "sudoku") {
            debug!("Skipping {}", file_path.display());
            continue;
        }
        solve_sudoku(Some(file_path), None, common)?;
    }
    Ok(())
}

fn solve_sudoku_puzzle(
    sudoku: &Sudoku,
    label: &str,
    parse_time: Duration,
    common: &CommonOptions,
) -> Result<(), String> {
    println!("Parsed Sudoku:\n{sudoku}");

    let time = Instant::now();
    let formula = sudoku.to_formula();
    let parse_time = parse_time + time.elapsed();

    let outcome = solve_and_report(&formula, sudoku.variables(), label, parse_time, common)?;
    match outcome.valuation() {
        Some(model) => println!("Solution:\n{}", sudoku.decode(model)),
        None => println!("No solution found"),
    }
    Ok(())
}

/// Solves `trials` random k-CNF formulas drawn from one seeded generator.
///
/// # Errors
///
/// If verification fails, or a cross-check disagrees with the truth table.
pub(crate) fn solve_random(
    vars: usize,
    clauses: usize,
    k: usize,
    trials: usize,
    cross_check: bool,
    common: &CommonOptions,
) -> Result<(), String> {
    if vars == 0 && clauses * k > 0 {
        return Err("--vars must be positive".to_string());
    }

    let pool = numbered_variables("x", vars);
    let mut rng = fastrand::Rng::with_seed(common.seed);
    let mut satisfiable = 0;

    for trial in 0..trials {
        let formula = random_k_sat(&mut rng, &pool, clauses, k);
        let outcome = solve_and_report(
            &formula,
            pool.clone(),
            &format!("random {k}-SAT #{trial}"),
            Duration::ZERO,
            common,
        )?;

        if cross_check {
            let expected = TruthTable::for_formula(&formula)
                .map_err(|e| e.to_string())?
                .solve()
                .is_sat();
            if expected != outcome.is_sat() {
                return Err(format!(
                    "trial {trial}: search says {}, truth table says {expected}\n{formula}",
                    outcome.is_sat()
                ));
            }
        }

        satisfiable += usize::from(outcome.is_sat());
    }

    println!("{satisfiable} of {trials} formulas satisfiable");
    Ok(())
}

fn memory_usage() -> Option<(f64, f64)> {
    epoch::advance().ok()?;
    let allocated = stats::allocated::mib().ok()?.read().ok()?;
    let resident = stats::resident::mib().ok()?.read().ok()?;
    Some((
        allocated as f64 / (1024.0 * 1024.0),
        resident as f64 / (1024.0 * 1024.0),
    ))
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
pub(crate) fn print_stats(timings: &Timings, cnf: &Cnf, variables: usize, s: &SolutionStats) {
    let elapsed_secs = timings.solve.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", timings.parse.as_secs_f64()));
    stat_line("Translate time (s)", format!("{:.3}", timings.translate.as_secs_f64()));
    stat_line("Variables", variables);
    stat_line("Clauses", cnf.len());
    stat_line("Literals", cnf.literal_count());

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Conflicts", s.conflicts, elapsed_secs);
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Propagations", s.propagations, elapsed_secs);
    stat_line("Max depth", s.max_depth);
    if let Some((allocated, resident)) = memory_usage() {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
