#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Unit propagation over a clause set.
//!
//! Under a partial valuation every clause is in one of four states:
//!
//! - **satisfied**: some literal is true;
//! - **falsified**: every literal is false (always the case for the empty clause);
//! - **unit**: no literal is true, exactly one is unassigned;
//! - **undetermined**: no literal is true, two or more are unassigned.
//!
//! Propagation assigns the remaining literal of every unit clause and rescans
//! until a full pass changes nothing, or stops at the first falsified clause.

use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;
use crate::sat::valuation::Valuation;
use log::trace;

/// State of a single clause under a partial valuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseStatus<'a> {
    /// Some literal is true.
    Satisfied,
    /// Every literal is false.
    Falsified,
    /// The only unassigned literal of an otherwise false clause.
    Unit(&'a Literal),
    /// Two or more literals unassigned, none true.
    Undetermined,
}

/// Classifies `clause` under `valuation`.
#[must_use]
pub fn classify<'a>(clause: &'a Clause, valuation: &Valuation) -> ClauseStatus<'a> {
    let mut unassigned = None;
    let mut open = 0usize;

    for literal in clause {
        match valuation.literal_value(literal) {
            Some(true) => return ClauseStatus::Satisfied,
            Some(false) => {}
            None => {
                open += 1;
                unassigned = Some(literal);
            }
        }
    }

    match (open, unassigned) {
        (0, _) => ClauseStatus::Falsified,
        (1, Some(literal)) => ClauseStatus::Unit(literal),
        _ => ClauseStatus::Undetermined,
    }
}

/// Result of propagating to a fixpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Propagation {
    /// No clause is falsified; carries the extended valuation.
    Consistent(Valuation),
    /// Some clause is falsified under every extension of the input valuation.
    Conflict,
}

/// The inference step run at every node of the search tree.
pub trait Propagator {
    /// Extends `valuation` with every assignment forced by `cnf`.
    fn propagate(&mut self, valuation: Valuation, cnf: &Cnf) -> Propagation;

    /// Number of literals forced so far.
    fn propagations(&self) -> usize {
        0
    }
}

/// Repeated full scans of the clause list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitPropagation {
    forced: usize,
}

impl UnitPropagation {
    /// A propagator with its counter at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { forced: 0 }
    }
}

impl Propagator for UnitPropagation {
    fn propagate(&mut self, mut valuation: Valuation, cnf: &Cnf) -> Propagation {
        loop {
            let mut changed = false;

            for clause in cnf {
                match classify(clause, &valuation) {
                    ClauseStatus::Satisfied | ClauseStatus::Undetermined => {}
                    ClauseStatus::Falsified => {
                        trace!("conflict on {clause}");
                        return Propagation::Conflict;
                    }
                    ClauseStatus::Unit(literal) => {
                        trace!("{clause} forces {literal}");
                        valuation.satisfy(literal);
                        self.forced += 1;
                        changed = true;
                    }
                }
            }

            if !changed {
                return Propagation::Consistent(valuation);
            }
        }
    }

    fn propagations(&self) -> usize {
        self.forced
    }
}

/// Unit propagation with a throwaway [`UnitPropagation`].
#[must_use]
pub fn unit_propagation(valuation: Valuation, cnf: &Cnf) -> Propagation {
    UnitPropagation::new().propagate(valuation, cnf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valuation(pairs: &[(&str, bool)]) -> Valuation {
        pairs.iter().map(|&(k, v)| (k, v)).collect()
    }

    fn a_or_b() -> Cnf {
        Cnf::from(vec![vec![("a", true), ("b", true)]])
    }

    #[test]
    fn test_satisfied_clause_draws_no_inference() {
        assert_eq!(
            unit_propagation(valuation(&[("a", true)]), &a_or_b()),
            Propagation::Consistent(valuation(&[("a", true)]))
        );
    }

    #[test]
    fn test_two_unassigned_literals_draw_no_inference() {
        assert_eq!(
            unit_propagation(Valuation::new(), &a_or_b()),
            Propagation::Consistent(Valuation::new())
        );
    }

    #[test]
    fn test_unit_clause_forces_remaining_literal() {
        assert_eq!(
            unit_propagation(valuation(&[("a", false)]), &a_or_b()),
            Propagation::Consistent(valuation(&[("a", false), ("b", true)]))
        );
    }

    #[test]
    fn test_falsified_clause_is_a_conflict() {
        assert_eq!(
            unit_propagation(valuation(&[("a", false), ("b", false)]), &a_or_b()),
            Propagation::Conflict
        );
    }

    #[test]
    fn test_empty_clause_is_a_conflict() {
        assert_eq!(
            unit_propagation(Valuation::new(), &Cnf::contradiction()),
            Propagation::Conflict
        );
    }

    #[test]
    fn test_propagation_chains() {
        // (!a | b) & (!b | !c) & (d | !e) with a = true forces b, then c.
        let cnf = Cnf::from(vec![
            vec![("a", false), ("b", true)],
            vec![("b", false), ("c", false)],
            vec![("d", true), ("e", false)],
        ]);
        assert_eq!(
            unit_propagation(valuation(&[("a", true)]), &cnf),
            Propagation::Consistent(valuation(&[("a", true), ("b", true), ("c", false)]))
        );
    }

    #[test]
    fn test_chain_needing_a_second_pass() {
        // The clause forcing `c` comes before the one that forces `b`.
        let cnf = Cnf::from(vec![
            vec![("b", false), ("c", true)],
            vec![("a", false), ("b", true)],
        ]);
        let mut propagator = UnitPropagation::new();
        assert_eq!(
            propagator.propagate(valuation(&[("a", true)]), &cnf),
            Propagation::Consistent(valuation(&[("a", true), ("b", true), ("c", true)]))
        );
        assert_eq!(propagator.propagations(), 2);
    }

    #[test]
    fn test_complementary_literals_in_one_clause() {
        let cnf = Cnf::from(vec![vec![("x", true), ("x", false)]]);
        assert_eq!(
            unit_propagation(valuation(&[("x", false)]), &cnf),
            Propagation::Consistent(valuation(&[("x", false)]))
        );
        assert_eq!(
            unit_propagation(Valuation::new(), &cnf),
            Propagation::Consistent(Valuation::new())
        );
    }

    #[test]
    fn test_classify() {
        let clause = Clause::from(vec![("a", true), ("b", false)]);
        assert_eq!(classify(&clause, &valuation(&[("b", false)])), ClauseStatus::Satisfied);
        assert_eq!(
            classify(&clause, &valuation(&[("a", false), ("b", true)])),
            ClauseStatus::Falsified
        );
        assert_eq!(
            classify(&clause, &valuation(&[("b", true)])),
            ClauseStatus::Unit(&Literal::positive("a"))
        );
        assert_eq!(classify(&clause, &Valuation::new()), ClauseStatus::Undetermined);
    }
}
