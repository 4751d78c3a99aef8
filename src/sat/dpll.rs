//! Defines the recursive DPLL (Davis-Putnam-Logemann-Loveland) search.
//!
//! Each call of the search is one node of a binary backtracking tree:
//!
//! 1.  **Unit propagation** extends the node's valuation with every forced
//!     assignment, or reports that some clause is falsified, which fails the
//!     node without any further branching.
//! 2.  **Selection** picks the first variable of the caller-supplied order that
//!     is still unassigned. If there is none, propagation reached a fixpoint on
//!     a total valuation and every clause is satisfied.
//! 3.  **Branching** tries the variable as `true`, then as `false`, each on its
//!     own copy of the valuation. The two branches are exhaustive, so if both
//!     fail no satisfying extension of the node's valuation exists.
//!
//! Backtracking is implicit: a failed branch's valuation is simply dropped.
//! The search depth is bounded by the number of variables.

use crate::sat::cnf::Cnf;
use crate::sat::propagation::{Propagation, Propagator, UnitPropagation};
use crate::sat::solver::{SolutionStats, Solver};
use crate::sat::valuation::Valuation;
use log::{debug, trace};

/// The two outcomes of a solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A valuation, total over the search variables, satisfying every clause.
    Satisfiable(Valuation),
    /// No extension of the starting valuation satisfies the clauses.
    Unsatisfiable,
}

impl Outcome {
    /// True for [`Outcome::Satisfiable`].
    #[must_use]
    pub const fn is_sat(&self) -> bool {
        matches!(self, Self::Satisfiable(_))
    }

    /// The model, if there is one.
    #[must_use]
    pub const fn valuation(&self) -> Option<&Valuation> {
        match self {
            Self::Satisfiable(valuation) => Some(valuation),
            Self::Unsatisfiable => None,
        }
    }

    /// Consumes the outcome, returning the model if there is one.
    #[must_use]
    pub fn into_valuation(self) -> Option<Valuation> {
        match self {
            Self::Satisfiable(valuation) => Some(valuation),
            Self::Unsatisfiable => None,
        }
    }
}

/// The value tried first at every branching point.
pub const FIRST_BRANCH: bool = true;

/// A DPLL search over a borrowed clause set and variable order.
///
/// The clause set and the variable list are read-only for the lifetime of
/// the solver. Clause literals must only mention variables in `variables`;
/// this is not checked.
#[derive(Debug, Clone)]
pub struct Dpll<'a, P: Propagator = UnitPropagation> {
    cnf: &'a Cnf,
    variables: &'a [String],
    propagator: P,
    stats: SolutionStats,
}

impl<'a> Dpll<'a> {
    /// A search using [`UnitPropagation`].
    #[must_use]
    pub const fn new(cnf: &'a Cnf, variables: &'a [String]) -> Self {
        Self::with_propagator(cnf, variables, UnitPropagation::new())
    }
}

impl<'a, P: Propagator> Dpll<'a, P> {
    /// A search running `propagator` at every node.
    pub const fn with_propagator(cnf: &'a Cnf, variables: &'a [String], propagator: P) -> Self {
        Self {
            cnf,
            variables,
            propagator,
            stats: SolutionStats {
                decisions: 0,
                propagations: 0,
                conflicts: 0,
                max_depth: 0,
            },
        }
    }

    /// Searches for a satisfying extension of `valuation`.
    ///
    /// The caller's valuation is never modified; the search works on a copy.
    pub fn solve_from(&mut self, valuation: &Valuation) -> Outcome {
        let outcome = self.search(valuation.clone(), 0);
        debug!(
            "{} after {} decisions, {} conflicts",
            if outcome.is_sat() { "SAT" } else { "UNSAT" },
            self.stats.decisions,
            self.stats.conflicts
        );
        outcome
    }

    fn search(&mut self, valuation: Valuation, depth: usize) -> Outcome {
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let valuation = match self.propagator.propagate(valuation, self.cnf) {
            Propagation::Consistent(valuation) => valuation,
            Propagation::Conflict => {
                self.stats.conflicts += 1;
                trace!("conflict at depth {depth}");
                return Outcome::Unsatisfiable;
            }
        };

        let Some(variable) = self.variables.iter().find(|v| !valuation.contains(v)) else {
            return Outcome::Satisfiable(valuation);
        };

        for value in [FIRST_BRANCH, !FIRST_BRANCH] {
            self.stats.decisions += 1;
            debug!("depth {depth}: try {variable} = {value}");

            let mut branch = valuation.clone();
            branch.assign(variable.as_str(), value);

            if let Outcome::Satisfiable(model) = self.search(branch, depth + 1) {
                return Outcome::Satisfiable(model);
            }
        }

        Outcome::Unsatisfiable
    }

    /// The propagator, with whatever state it kept across nodes.
    pub const fn propagator(&self) -> &P {
        &self.propagator
    }
}

impl<P: Propagator> Solver for Dpll<'_, P> {
    fn solve(&mut self) -> Outcome {
        self.solve_from(&Valuation::new())
    }

    fn stats(&self) -> SolutionStats {
        SolutionStats {
            propagations: self.propagator.propagations(),
            ..self.stats
        }
    }
}

/// Decides `cnf` starting from `valuation`, branching on `variables` in order.
///
/// Returns [`Outcome::Satisfiable`] with a valuation that extends `valuation`,
/// assigns every name in `variables` and satisfies every clause, or
/// [`Outcome::Unsatisfiable`] if no such extension exists.
#[must_use]
pub fn dpll(valuation: &Valuation, cnf: &Cnf, variables: &[String]) -> Outcome {
    Dpll::new(cnf, variables).solve_from(valuation)
}
