#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The interface shared by the DPLL search and the truth-table reference.

use crate::sat::dpll::Outcome;

/// Counters reported after a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    /// Branching decisions (each tried polarity counts once). For the truth
    /// table this is the number of rows inspected.
    pub decisions: usize,
    /// Literals forced by unit propagation.
    pub propagations: usize,
    /// Nodes where propagation hit a falsified clause.
    pub conflicts: usize,
    /// Deepest branching level reached.
    pub max_depth: usize,
}

/// A decision procedure over a fixed problem.
pub trait Solver {
    /// Decides the problem and returns a model if there is one.
    fn solve(&mut self) -> Outcome;
    /// Counters accumulated by the solves run so far.
    fn stats(&self) -> SolutionStats;
}
