#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Literals: a named variable or its negation.

use crate::sat::valuation::Valuation;
use core::ops::Not;
use std::fmt::{Display, Formatter};

/// A propositional variable together with the polarity under which it is satisfied.
///
/// A literal with polarity `true` is satisfied when its variable is assigned
/// `true`; one with polarity `false` when the variable is assigned `false`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    variable: String,
    polarity: bool,
}

impl Literal {
    /// The literal satisfied when `variable` takes the value `polarity`.
    #[must_use]
    pub fn new(variable: impl Into<String>, polarity: bool) -> Self {
        Self {
            variable: variable.into(),
            polarity,
        }
    }

    /// `variable` itself.
    #[must_use]
    pub fn positive(variable: impl Into<String>) -> Self {
        Self::new(variable, true)
    }

    /// The negation of `variable`.
    #[must_use]
    pub fn negative(variable: impl Into<String>) -> Self {
        Self::new(variable, false)
    }

    /// Name of the underlying variable.
    #[must_use]
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// `true` for a positive literal.
    #[must_use]
    pub const fn polarity(&self) -> bool {
        self.polarity
    }

    /// The complementary literal over the same variable.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            variable: self.variable.clone(),
            polarity: !self.polarity,
        }
    }

    /// Truth value of the literal under `valuation`, or `None` if its variable is unassigned.
    #[must_use]
    pub fn value_under(&self, valuation: &Valuation) -> Option<bool> {
        valuation
            .get(&self.variable)
            .map(|value| value == self.polarity)
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self {
            variable: self.variable,
            polarity: !self.polarity,
        }
    }
}

impl Not for &Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl From<(&str, bool)> for Literal {
    fn from((variable, polarity): (&str, bool)) -> Self {
        Self::new(variable, polarity)
    }
}

impl From<(String, bool)> for Literal {
    fn from((variable, polarity): (String, bool)) -> Self {
        Self::new(variable, polarity)
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.polarity {
            write!(f, "{}", self.variable)
        } else {
            write!(f, "!{}", self.variable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_neg() {
        assert_eq!(Literal::positive("a").negated(), Literal::negative("a"));
        assert_eq!(!Literal::negative("a"), Literal::positive("a"));
    }

    #[test]
    fn test_value_under() {
        let valuation: Valuation = [("a", true), ("b", false)].into_iter().collect();

        assert_eq!(Literal::positive("a").value_under(&valuation), Some(true));
        assert_eq!(Literal::negative("a").value_under(&valuation), Some(false));
        assert_eq!(Literal::negative("b").value_under(&valuation), Some(true));
        assert_eq!(Literal::positive("c").value_under(&valuation), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Literal::from(("x", true)).to_string(), "x");
        assert_eq!(Literal::from(("x", false)).to_string(), "!x");
    }
}
