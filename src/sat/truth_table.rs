#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Exhaustive truth-table decision procedure.
//!
//! Used as the reference verdict when cross-checking the DPLL search. For
//! formulas it evaluates the tree directly, so it does not share any code
//! path with the CNF translation.

use crate::sat::cnf::Cnf;
use crate::sat::dpll::Outcome;
use crate::sat::error::{Error, Result};
use crate::sat::formula::Formula;
use crate::sat::solver::{SolutionStats, Solver};
use crate::sat::valuation::Valuation;
use itertools::Itertools;

#[derive(Debug, Clone, Copy)]
enum Target<'a> {
    Formula(&'a Formula),
    Cnf(&'a Cnf),
}

impl Target<'_> {
    fn holds(self, valuation: &Valuation) -> bool {
        match self {
            Self::Formula(formula) => matches!(formula.evaluate(valuation), Ok(true)),
            Self::Cnf(cnf) => cnf.is_satisfied_by(valuation),
        }
    }
}

/// Exhaustive enumeration of every valuation of a formula's or clause set's
/// variables, in sorted order.
#[derive(Debug, Clone)]
pub struct TruthTable<'a> {
    target: Target<'a>,
    variables: Vec<String>,
    rows: usize,
}

impl<'a> TruthTable<'a> {
    /// Maximum number of variables enumerated.
    pub const MAX_VARIABLES: usize = 24;

    /// A table evaluating `formula` directly, without translating it.
    ///
    /// # Errors
    ///
    /// [`Error::TooManyVariables`] above [`Self::MAX_VARIABLES`].
    pub fn for_formula(formula: &'a Formula) -> Result<Self> {
        Self::build(Target::Formula(formula), formula.vars().into_iter())
    }

    /// A table over the variables of `cnf`.
    ///
    /// # Errors
    ///
    /// [`Error::TooManyVariables`] above [`Self::MAX_VARIABLES`].
    pub fn for_cnf(cnf: &'a Cnf) -> Result<Self> {
        Self::build(Target::Cnf(cnf), cnf.variables().into_iter())
    }

    fn build(target: Target<'a>, variables: impl Iterator<Item = String>) -> Result<Self> {
        let variables = variables.sorted().collect_vec();
        if variables.len() > Self::MAX_VARIABLES {
            return Err(Error::TooManyVariables {
                count: variables.len(),
                max: Self::MAX_VARIABLES,
            });
        }
        Ok(Self {
            target,
            variables,
            rows: 0,
        })
    }

    /// The enumerated variables, sorted.
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }
}

impl Solver for TruthTable<'_> {
    /// Enumerates rows in binary counting order; the first variable is the lowest bit.
    fn solve(&mut self) -> Outcome {
        let mut valuation: Valuation = self.variables.iter().map(|v| (v.as_str(), false)).collect();

        for row in 0u64..1 << self.variables.len() {
            for (bit, variable) in self.variables.iter().enumerate() {
                if let Some(value) = valuation.get_mut(variable) {
                    *value = row & (1 << bit) != 0;
                }
            }
            self.rows += 1;
            if self.target.holds(&valuation) {
                return Outcome::Satisfiable(valuation);
            }
        }

        Outcome::Unsatisfiable
    }

    fn stats(&self) -> SolutionStats {
        SolutionStats {
            decisions: self.rows,
            ..SolutionStats::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsat_formula() {
        let x = Formula::atom("x");
        let f = Formula::ands([x.clone(), !x]);
        let mut table = TruthTable::for_formula(&f).unwrap();
        assert_eq!(table.solve(), Outcome::Unsatisfiable);
        assert_eq!(table.stats().decisions, 2);
    }

    #[test]
    fn test_first_model_in_counting_order() {
        let f = Formula::ors([Formula::atom("b"), Formula::atom("a")]);
        let mut table = TruthTable::for_formula(&f).unwrap();
        let expected: Valuation = [("a", true), ("b", false)].into_iter().collect();
        assert_eq!(table.solve(), Outcome::Satisfiable(expected));
    }

    #[test]
    fn test_constant_formulas() {
        let t = Formula::Const(true);
        let f = Formula::Const(false);
        assert!(TruthTable::for_formula(&t).unwrap().solve().is_sat());
        assert!(!TruthTable::for_formula(&f).unwrap().solve().is_sat());
    }

    #[test]
    fn test_cnf_target() {
        let cnf = Cnf::from(vec![vec![("p", true), ("q", true)], vec![("p", false)]]);
        let outcome = TruthTable::for_cnf(&cnf).unwrap().solve();
        let expected: Valuation = [("p", false), ("q", true)].into_iter().collect();
        assert_eq!(outcome, Outcome::Satisfiable(expected));
    }

    #[test]
    fn test_variable_limit() {
        let f = Formula::ands((0..=TruthTable::MAX_VARIABLES).map(|i| Formula::atom(format!("v{i}"))));
        assert!(matches!(
            TruthTable::for_formula(&f),
            Err(Error::TooManyVariables { count: 25, max: 24 })
        ));
    }
}
