//! # dpll-solver
//!
//! Command-line front end for the `dpll_solver` library: a recursive DPLL
//! search with unit propagation over formulas translated to clause form.
//!
//! ## Usage
//!
//! ```sh
//! dpll-solver [SUBCOMMAND] [OPTIONS]
//! ```
//!
//! ### Subcommands
//!
//! 1.  **`formula`**: Solve a formula written as an s-expression.
//!     ```sh
//!     dpll-solver formula --input "(and (or a b) (not (and a b)))"
//!     dpll-solver formula --path problem.fma
//!     ```
//!
//! 2.  **`sudoku`**: Solve a Sudoku file, every `.sudoku` file under a
//!     directory, or one of the built-in puzzles.
//!     ```sh
//!     dpll-solver sudoku --path puzzles/
//!     dpll-solver sudoku --example hardest
//!     ```
//!
//! 3.  **`random`**: Solve seeded random k-CNF formulas, optionally
//!     cross-checking every verdict against a truth table.
//!     ```sh
//!     dpll-solver random --vars 15 --clauses 75 --trials 40 --cross-check --seed 7
//!     ```
//!
//! 4.  **`completions`**: Print a shell completion script.
//!
//! ### Common Options
//!
//! -   `-d, --debug`: Log branching decisions (`RUST_LOG` overrides).
//! -   `--verify <BOOL>`: Check the model against the formula (default: `true`).
//! -   `--stats <BOOL>`: Print statistics (default: `true`).
//! -   `-p, --print-solution`: Print the satisfying valuation.
//! -   `--order <given|sorted|shuffled>`: Branching order (default: `sorted`).
//! -   `--seed <N>`: Seed for shuffling and for generated formulas.

use crate::command_line::cli::{
    Cli, Commands, init_logger, print_completions, solve_formula, solve_random, solve_sudoku,
};
use clap::Parser;

mod command_line;

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// statistics.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    let cli = Cli::parse();

    if let Some(common) = cli.command.common() {
        init_logger(common.debug);
    }

    let result = match cli.command {
        Commands::Formula {
            input,
            path,
            common,
        } => solve_formula(input.as_deref(), path.as_deref(), &common),
        Commands::Sudoku {
            path,
            example,
            common,
        } => solve_sudoku(path.as_deref(), example, &common),
        Commands::Random {
            vars,
            clauses,
            k,
            trials,
            cross_check,
            common,
        } => solve_random(vars, clauses, k, trials, cross_check, &common),
        Commands::Completions { shell } => {
            print_completions(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
