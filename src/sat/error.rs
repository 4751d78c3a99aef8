//! Error types for formula evaluation, parsing and the reference procedures.
//!
//! The DPLL search itself never fails: an unsatisfiable clause set is an
//! [`Outcome`](crate::sat::dpll::Outcome), not an error.

use thiserror::Error;

/// The error type shared by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A formula was evaluated under a valuation that does not assign one of its atoms.
    #[error("variable `{0}` is not assigned")]
    UnassignedVariable(String),

    /// Exhaustive enumeration was requested over too many variables.
    #[error("truth table over {count} variables exceeds the limit of {max}")]
    TooManyVariables {
        /// Number of variables requested.
        count: usize,
        /// Largest supported number of variables.
        max: usize,
    },

    /// Malformed formula text.
    #[error("parse error at byte {position}: {message}")]
    Parse {
        /// Byte offset of the offending token.
        position: usize,
        /// What was expected.
        message: String,
    },

    /// Malformed Sudoku grid.
    #[error("invalid sudoku: {0}")]
    InvalidSudoku(String),

    /// I/O error while reading input files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
