#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Clause sets in Conjunctive Normal Form.
//!
//! A [`Cnf`] is an ordered list of [`Clause`]s read as their conjunction. The
//! empty clause set is true; a clause set containing the empty clause is false.
//! Clause sets are normally produced by [`Formula::clauses`](crate::sat::formula::Formula::clauses)
//! and consumed by the DPLL search, which only ever reads them.

use crate::sat::clause::Clause;
use crate::sat::valuation::Valuation;
use core::ops::Index;
use rustc_hash::FxHashSet;
use std::fmt::{Display, Formatter};

/// A conjunction of clauses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Cnf {
    clauses: Vec<Clause>,
}

impl Cnf {
    /// Creates a clause set from any sequence of clauses.
    pub fn new<I: IntoIterator<Item = Clause>>(clauses: I) -> Self {
        Self {
            clauses: clauses.into_iter().collect(),
        }
    }

    /// The clause set `[[]]`: a single empty clause, false under every valuation.
    #[must_use]
    pub fn contradiction() -> Self {
        Self {
            clauses: vec![Clause::empty()],
        }
    }

    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// True for the empty conjunction, which every valuation satisfies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The clauses in order.
    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Appends one clause.
    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    /// Number of literal occurrences over all clauses.
    #[must_use]
    pub fn literal_count(&self) -> usize {
        self.clauses.iter().map(Clause::len).sum()
    }

    /// Every variable name mentioned by some literal.
    #[must_use]
    pub fn variables(&self) -> FxHashSet<String> {
        self.clauses
            .iter()
            .flat_map(Clause::iter)
            .map(|lit| lit.variable().to_string())
            .collect()
    }

    /// Checks a valuation against every clause.
    ///
    /// A clause whose literals are all unassigned or false is not satisfied, so
    /// this doubles as the verification step for models returned by the solver.
    #[must_use]
    pub fn is_satisfied_by(&self, valuation: &Valuation) -> bool {
        self.clauses.iter().all(|c| c.is_satisfied_by(valuation))
    }
}

impl Index<usize> for Cnf {
    type Output = Clause;

    fn index(&self, index: usize) -> &Self::Output {
        &self.clauses[index]
    }
}

impl FromIterator<Clause> for Cnf {
    fn from_iter<T: IntoIterator<Item = Clause>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl Extend<Clause> for Cnf {
    fn extend<T: IntoIterator<Item = Clause>>(&mut self, iter: T) {
        self.clauses.extend(iter);
    }
}

impl IntoIterator for Cnf {
    type Item = Clause;
    type IntoIter = std::vec::IntoIter<Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.into_iter()
    }
}

impl<'a> IntoIterator for &'a Cnf {
    type Item = &'a Clause;
    type IntoIter = std::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

impl From<Vec<Clause>> for Cnf {
    fn from(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }
}

impl From<Vec<Vec<(&str, bool)>>> for Cnf {
    fn from(clauses: Vec<Vec<(&str, bool)>>) -> Self {
        clauses.into_iter().map(Clause::from).collect()
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for clause in &self.clauses {
            writeln!(f, "{clause}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Cnf {
        Cnf::from(vec![
            vec![("a", true), ("b", true)],
            vec![("a", false), ("c", true)],
        ])
    }

    #[test]
    fn test_counts() {
        let cnf = sample();
        assert_eq!(cnf.len(), 2);
        assert_eq!(cnf.literal_count(), 4);

        let mut vars: Vec<_> = cnf.variables().into_iter().collect();
        vars.sort();
        assert_eq!(vars, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_cnf_is_true() {
        assert!(Cnf::default().is_satisfied_by(&Valuation::new()));
    }

    #[test]
    fn test_contradiction_is_false() {
        let valuation: Valuation = [("a", true)].into_iter().collect();
        assert!(!Cnf::contradiction().is_satisfied_by(&valuation));
    }

    #[test]
    fn test_satisfied_by() {
        let cnf = sample();
        let model: Valuation = [("a", true), ("b", false), ("c", true)].into_iter().collect();
        let bad: Valuation = [("a", true), ("b", false), ("c", false)].into_iter().collect();
        assert!(cnf.is_satisfied_by(&model));
        assert!(!cnf.is_satisfied_by(&bad));
    }

    #[test]
    fn test_display() {
        assert_eq!(sample().to_string(), "(a | b)\n(!a | c)\n");
    }
}
