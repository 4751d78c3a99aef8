#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod cardinality;
pub mod clause;
pub mod cnf;
pub mod dpll;
pub mod error;
pub mod formula;
pub mod generator;
pub mod literal;
pub mod propagation;
pub mod solver;
pub mod truth_table;
pub mod valuation;
pub mod variable_selection;
