#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This module provides functionality for solving Sudoku puzzles.

/// Board parsing, the formula encoding, and solution decoding.
pub mod solver;
