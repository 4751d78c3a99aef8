#![deny(missing_docs)]
//! This crate provides a DPLL satisfiability solver for propositional formulas,
//! together with the translation of formulas into clause form and a Sudoku
//! encoding built on top of it.

/// The `sat` module implements propositional formulas, their clause form, and
/// the DPLL search that decides them.
pub mod sat;

/// The `sudoku` module encodes Sudoku puzzles as formulas and decodes solutions.
pub mod sudoku;
