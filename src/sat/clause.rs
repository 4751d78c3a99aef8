#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Clauses: disjunctions of literals.

use crate::sat::literal::Literal;
use crate::sat::valuation::Valuation;
use core::ops::Index;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::{Display, Formatter};

/// Inline capacity of a clause; longer clauses spill onto the heap.
pub const INLINE_LITERALS: usize = 4;

/// A disjunction of literals. The empty clause is false.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clause {
    literals: SmallVec<[Literal; INLINE_LITERALS]>,
}

impl Clause {
    /// A clause over `literals`, kept in the given order.
    pub fn new<I: IntoIterator<Item = Literal>>(literals: I) -> Self {
        Self {
            literals: literals.into_iter().collect(),
        }
    }

    /// The empty clause.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            literals: SmallVec::new_const(),
        }
    }

    /// A clause with the single literal `literal`.
    #[must_use]
    pub fn unit(literal: Literal) -> Self {
        let mut literals = SmallVec::new();
        literals.push(literal);
        Self { literals }
    }

    /// Number of literals, counting repeats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// True for the empty clause.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// The literals in order.
    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    /// Disjunction of several clauses: their literals, in order, in one clause.
    pub fn concat<'a, I>(clauses: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
    {
        Self::new(clauses.into_iter().flat_map(|c| c.iter().cloned()))
    }

    /// True if some literal is satisfied. Unassigned literals count as not satisfied.
    #[must_use]
    pub fn is_satisfied_by(&self, valuation: &Valuation) -> bool {
        self.iter()
            .any(|lit| valuation.literal_value(lit) == Some(true))
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl From<Vec<Literal>> for Clause {
    fn from(literals: Vec<Literal>) -> Self {
        Self {
            literals: SmallVec::from_vec(literals),
        }
    }
}

impl From<Vec<(&str, bool)>> for Clause {
    fn from(literals: Vec<(&str, bool)>) -> Self {
        literals.into_iter().map(Literal::from).collect()
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Literal;
    type IntoIter = std::slice::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.iter().join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let clause = Clause::from(vec![("a", true), ("b", false), ("c", true)]);
        assert_eq!(clause.len(), 3);
        assert_eq!(clause[1], Literal::negative("b"));
    }

    #[test]
    fn test_concat_keeps_order() {
        let left = Clause::from(vec![("a", true)]);
        let right = Clause::from(vec![("b", false), ("c", true)]);
        let joined = Clause::concat([&left, &right]);
        assert_eq!(joined, Clause::from(vec![("a", true), ("b", false), ("c", true)]));
        assert_eq!(Clause::concat(Vec::<&Clause>::new()), Clause::empty());
    }

    #[test]
    fn test_empty_clause_is_never_satisfied() {
        let valuation: Valuation = [("a", true)].into_iter().collect();
        assert!(!Clause::empty().is_satisfied_by(&valuation));
    }

    #[test]
    fn test_satisfied_by() {
        let clause = Clause::from(vec![("a", true), ("b", false)]);
        let yes: Valuation = [("a", false), ("b", false)].into_iter().collect();
        let no: Valuation = [("a", false), ("b", true)].into_iter().collect();
        let partial: Valuation = [("a", false)].into_iter().collect();
        assert!(clause.is_satisfied_by(&yes));
        assert!(!clause.is_satisfied_by(&no));
        assert!(!clause.is_satisfied_by(&partial));
    }

    #[test]
    fn test_display() {
        assert_eq!(Clause::from(vec![("a", true), ("b", false)]).to_string(), "(a | !b)");
        assert_eq!(Clause::empty().to_string(), "()");
    }
}
