#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Propositional formulas and their translation to clause sets.
//!
//! A [`Formula`] is an immutable tree over the connectives `not`, n-ary `and`
//! and n-ary `or`, with named atoms and the two truth constants at the leaves.
//! Implication and equivalence are not variants; [`Formula::implies`] and
//! [`Formula::iff`] rewrite them into the primitive connectives.
//!
//! [`Formula::clauses`] translates structurally rather than by rewriting to a
//! fixpoint: atoms and negated atoms become unit clauses, an `and` concatenates
//! the clause sets of its operands, and an `or` takes the Cartesian product of
//! its operands' clause sets, joining one clause from each. That product is
//! where the translation can blow up, so constraint encoders should prefer
//! conjunctions of small disjunctions (see [`cardinality`](crate::sat::cardinality)).
//!
//! Formulas print, and parse, as prefix s-expressions:
//!
//! ```text
//! (and (or a b) (not (and a b)))
//! ```

use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::error::{Error, Result};
use crate::sat::literal::Literal;
use crate::sat::valuation::Valuation;
use core::ops::Not;
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A propositional formula over named atoms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    /// `true` or `false`.
    Const(bool),
    /// A propositional variable.
    Atom(String),
    /// Negation.
    Not(Box<Formula>),
    /// Conjunction; `And([])` is true.
    And(Vec<Formula>),
    /// Disjunction; `Or([])` is false.
    Or(Vec<Formula>),
}

impl Formula {
    /// The atom `name`.
    #[must_use]
    pub fn atom(name: impl Into<String>) -> Self {
        Self::Atom(name.into())
    }

    /// The constant `value`.
    #[must_use]
    pub const fn constant(value: bool) -> Self {
        Self::Const(value)
    }

    /// Conjunction of `subs`.
    pub fn ands<I: IntoIterator<Item = Self>>(subs: I) -> Self {
        Self::And(subs.into_iter().collect())
    }

    /// Disjunction of `subs`.
    pub fn ors<I: IntoIterator<Item = Self>>(subs: I) -> Self {
        Self::Or(subs.into_iter().collect())
    }

    /// `a -> b`, rewritten as `(or (not a) b)`.
    #[must_use]
    pub fn implies(a: Self, b: Self) -> Self {
        Self::Or(vec![!a, b])
    }

    /// `a <-> b`, rewritten as `(and (a -> b) (b -> a))`.
    #[must_use]
    pub fn iff(a: Self, b: Self) -> Self {
        Self::And(vec![
            Self::implies(a.clone(), b.clone()),
            Self::implies(b, a),
        ])
    }

    /// Names of all atoms occurring in the formula.
    #[must_use]
    pub fn vars(&self) -> FxHashSet<String> {
        let mut vars = FxHashSet::default();
        self.collect_vars(&mut vars);
        vars
    }

    /// Names of all atoms in order of first occurrence, left to right.
    #[must_use]
    pub fn vars_in_order(&self) -> Vec<String> {
        let mut atoms = Vec::new();
        self.collect_atoms(&mut atoms);
        atoms.into_iter().unique().cloned().collect()
    }

    fn collect_atoms<'a>(&'a self, into: &mut Vec<&'a String>) {
        match self {
            Self::Const(_) => {}
            Self::Atom(name) => into.push(name),
            Self::Not(sub) => sub.collect_atoms(into),
            Self::And(subs) | Self::Or(subs) => {
                for sub in subs {
                    sub.collect_atoms(into);
                }
            }
        }
    }

    fn collect_vars(&self, into: &mut FxHashSet<String>) {
        match self {
            Self::Const(_) => {}
            Self::Atom(name) => {
                into.insert(name.clone());
            }
            Self::Not(sub) => sub.collect_vars(into),
            Self::And(subs) | Self::Or(subs) => {
                for sub in subs {
                    sub.collect_vars(into);
                }
            }
        }
    }

    /// The negation of `self`, pushed in by one level.
    ///
    /// De Morgan for `and`/`or`, double negation for `not`, flipped value for
    /// constants; an atom is simply wrapped in `not`.
    #[must_use]
    pub fn push_negation(&self) -> Self {
        match self {
            Self::Const(value) => Self::Const(!value),
            Self::Atom(_) => Self::Not(Box::new(self.clone())),
            Self::Not(sub) => sub.as_ref().clone(),
            Self::And(subs) => Self::Or(subs.iter().cloned().map(Not::not).collect()),
            Self::Or(subs) => Self::And(subs.iter().cloned().map(Not::not).collect()),
        }
    }

    /// Translates the formula into an equivalent clause set.
    #[must_use]
    pub fn clauses(&self) -> Cnf {
        match self {
            Self::Const(true) => Cnf::default(),
            Self::Const(false) => Cnf::contradiction(),
            Self::Atom(name) => Cnf::from(vec![Clause::unit(Literal::positive(name.as_str()))]),
            Self::Not(sub) => match sub.as_ref() {
                Self::Atom(name) => {
                    Cnf::from(vec![Clause::unit(Literal::negative(name.as_str()))])
                }
                other => other.push_negation().clauses(),
            },
            Self::And(subs) => subs.iter().flat_map(|sub| sub.clauses()).collect(),
            Self::Or(subs) => disjoin(subs.iter().map(Self::clauses).collect()),
        }
    }

    /// Truth value under `valuation`.
    ///
    /// # Errors
    ///
    /// [`Error::UnassignedVariable`] if an atom that has to be inspected has no value.
    pub fn evaluate(&self, valuation: &Valuation) -> Result<bool> {
        match self {
            Self::Const(value) => Ok(*value),
            Self::Atom(name) => valuation
                .get(name)
                .ok_or_else(|| Error::UnassignedVariable(name.clone())),
            Self::Not(sub) => sub.evaluate(valuation).map(|v| !v),
            Self::And(subs) => {
                for sub in subs {
                    if !sub.evaluate(valuation)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Self::Or(subs) => {
                for sub in subs {
                    if sub.evaluate(valuation)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            Self::Const(_) | Self::Atom(_) => 1,
            Self::Not(sub) => 1 + sub.size(),
            Self::And(subs) | Self::Or(subs) => 1 + subs.iter().map(Self::size).sum::<usize>(),
        }
    }
}

/// Disjunction of clause sets: one clause per way of picking a clause from each set.
fn disjoin(sets: Vec<Cnf>) -> Cnf {
    // The product over zero sets is a single empty choice, i.e. the empty clause.
    if sets.is_empty() {
        return Cnf::contradiction();
    }

    sets.iter()
        .map(|set| set.into_iter())
        .multi_cartesian_product()
        .map(Clause::concat)
        .collect()
}

impl Not for Formula {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::Not(Box::new(self))
    }
}

impl From<bool> for Formula {
    fn from(value: bool) -> Self {
        Self::Const(value)
    }
}

impl From<&str> for Formula {
    fn from(name: &str) -> Self {
        Self::atom(name)
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Const(value) => write!(f, "{value}"),
            Self::Atom(name) => write!(f, "{name}"),
            Self::Not(sub) => write!(f, "(not {sub})"),
            Self::And(subs) if subs.is_empty() => write!(f, "(and)"),
            Self::Or(subs) if subs.is_empty() => write!(f, "(or)"),
            Self::And(subs) => write!(f, "(and {})", subs.iter().join(" ")),
            Self::Or(subs) => write!(f, "(or {})", subs.iter().join(" ")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    Open,
    Close,
    Symbol(&'a str),
}

fn tokenize(input: &str) -> Vec<(usize, Token<'_>)> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (i, ch) in input.char_indices() {
        let delimiter = ch.is_whitespace() || ch == '(' || ch == ')';
        if delimiter {
            if let Some(s) = start.take() {
                tokens.push((s, Token::Symbol(&input[s..i])));
            }
            match ch {
                '(' => tokens.push((i, Token::Open)),
                ')' => tokens.push((i, Token::Close)),
                _ => {}
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push((s, Token::Symbol(&input[s..])));
    }

    tokens
}

struct Parser<'a> {
    tokens: Vec<(usize, Token<'a>)>,
    pos: usize,
    end: usize,
}

impl<'a> Parser<'a> {
    fn error<T>(&self, position: usize, message: impl Into<String>) -> Result<T> {
        Err(Error::Parse {
            position,
            message: message.into(),
        })
    }

    fn next(&mut self) -> Result<(usize, Token<'a>)> {
        match self.tokens.get(self.pos) {
            Some(token) => {
                self.pos += 1;
                Ok(token.clone())
            }
            None => self.error(self.end, "unexpected end of input"),
        }
    }

    fn peek_close(&self) -> bool {
        matches!(self.tokens.get(self.pos), Some((_, Token::Close)))
    }

    fn formula(&mut self) -> Result<Formula> {
        match self.next()? {
            (_, Token::Symbol("true")) => Ok(Formula::Const(true)),
            (_, Token::Symbol("false")) => Ok(Formula::Const(false)),
            (_, Token::Symbol(name)) => Ok(Formula::atom(name)),
            (at, Token::Close) => self.error(at, "unexpected `)`"),
            (_, Token::Open) => {
                let (at, head) = self.next()?;
                let Token::Symbol(op) = head else {
                    return self.error(at, "expected a connective after `(`");
                };
                let mut args = Vec::new();
                while !self.peek_close() {
                    args.push(self.formula()?);
                }
                self.next()?;
                Self::apply(op, args).map_or_else(|message| self.error(at, message), Ok)
            }
        }
    }

    fn apply(op: &str, mut args: Vec<Formula>) -> std::result::Result<Formula, String> {
        match (op, args.len()) {
            ("and", _) => Ok(Formula::And(args)),
            ("or", _) => Ok(Formula::Or(args)),
            ("not", 1) => Ok(!args.remove(0)),
            ("impl", 2) => {
                let b = args.remove(1);
                Ok(Formula::implies(args.remove(0), b))
            }
            ("eqvi", 2) => {
                let b = args.remove(1);
                Ok(Formula::iff(args.remove(0), b))
            }
            ("not" | "impl" | "eqvi", n) => Err(format!("`{op}` does not take {n} operands")),
            _ => Err(format!("unknown connective `{op}`")),
        }
    }
}

impl FromStr for Formula {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parser = Parser {
            tokens: tokenize(s),
            pos: 0,
            end: s.len(),
        };
        let formula = parser.formula()?;
        if let Some(&(at, _)) = parser.tokens.get(parser.pos) {
            return parser.error(at, "trailing input after formula");
        }
        Ok(formula)
    }
}
