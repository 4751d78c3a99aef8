#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Truth assignments to named variables.

use crate::sat::literal::Literal;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use std::fmt::{Display, Formatter};

/// A (partial) assignment of truth values to variable names.
///
/// During search a valuation only ever grows along one branch; backtracking
/// happens by dropping the branch's copy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Valuation(FxHashMap<String, bool>);

impl Valuation {
    /// The empty valuation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `variable`, or `None` if it is unassigned.
    #[must_use]
    pub fn get(&self, variable: &str) -> Option<bool> {
        self.0.get(variable).copied()
    }

    /// True if `variable` has a value.
    #[must_use]
    pub fn contains(&self, variable: &str) -> bool {
        self.0.contains_key(variable)
    }

    /// Assigns `value` to `variable`, returning the previous value if there was one.
    pub fn assign(&mut self, variable: impl Into<String>, value: bool) -> Option<bool> {
        self.0.insert(variable.into(), value)
    }

    /// Makes `literal` true.
    pub fn satisfy(&mut self, literal: &Literal) {
        self.assign(literal.variable(), literal.polarity());
    }

    pub(crate) fn get_mut(&mut self, variable: &str) -> Option<&mut bool> {
        self.0.get_mut(variable)
    }

    /// Same as [`Literal::value_under`].
    #[must_use]
    pub fn literal_value(&self, literal: &Literal) -> Option<bool> {
        literal.value_under(self)
    }

    /// Number of assigned variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if nothing is assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Assignments in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// True if every name in `variables` has a value.
    pub fn is_total_over<'a, I>(&self, variables: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        variables.into_iter().all(|v| self.contains(v))
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for Valuation {
    fn from_iter<T: IntoIterator<Item = (K, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<K: Into<String>> Extend<(K, bool)> for Valuation {
    fn extend<T: IntoIterator<Item = (K, bool)>>(&mut self, iter: T) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v)));
    }
}

impl Display for Valuation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let body = self
            .iter()
            .sorted_unstable_by_key(|(k, _)| *k)
            .map(|(k, v)| format!("{k}={v}"))
            .join(", ");
        write!(f, "{{{body}}}")
    }
}
