#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Cardinality constraints as conjunctions of small clauses.
//!
//! `exactly_one` is logically stronger than a bare `or` but gives unit
//! propagation far more to work with: once one member is true, every other
//! member is forced false by its binary `at_most_one` clause.

use crate::sat::formula::Formula;
use itertools::Itertools;

/// `Or(formulas)`; false for an empty slice.
#[must_use]
pub fn at_least_one(formulas: &[Formula]) -> Formula {
    Formula::Or(formulas.to_vec())
}

/// Pairwise encoding: `not (fi and fj)` for every `i < j`.
#[must_use]
pub fn at_most_one(formulas: &[Formula]) -> Formula {
    Formula::ands(
        formulas
            .iter()
            .tuple_combinations()
            .map(|(f1, f2)| !Formula::ands([f1.clone(), f2.clone()])),
    )
}

/// [`at_most_one`] and [`at_least_one`] together.
#[must_use]
pub fn exactly_one(formulas: &[Formula]) -> Formula {
    Formula::ands([at_most_one(formulas), at_least_one(formulas)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::valuation::Valuation;

    fn atoms() -> Vec<Formula> {
        ["x", "y", "z"].into_iter().map(Formula::atom).collect()
    }

    fn count_models(formula: &Formula) -> Vec<u8> {
        (0u8..8)
            .filter(|&mask| {
                let valuation: Valuation = ["x", "y", "z"]
                    .into_iter()
                    .enumerate()
                    .map(|(i, name)| (name, mask & (1 << i) != 0))
                    .collect();
                formula.evaluate(&valuation).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_at_most_one_clauses_are_binary() {
        let cnf = at_most_one(&atoms()).clauses();
        assert_eq!(cnf.len(), 3);
        assert!(cnf.iter().all(|c| c.len() == 2));
    }

    #[test]
    fn test_exactly_one_models() {
        assert_eq!(count_models(&exactly_one(&atoms())), vec![1, 2, 4]);
    }

    #[test]
    fn test_at_least_one_models() {
        assert_eq!(count_models(&at_least_one(&atoms())).len(), 7);
    }

    #[test]
    fn test_empty_member_list() {
        assert_eq!(count_models(&at_most_one(&[])).len(), 8);
        assert!(count_models(&exactly_one(&[])).is_empty());
    }
}
