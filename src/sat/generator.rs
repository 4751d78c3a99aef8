#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Formula families for testing and benchmarking the solver.

use crate::sat::formula::Formula;
use fastrand::Rng;

/// A random k-CNF formula: `clauses` disjunctions of `k` literals each.
///
/// Every literal is drawn uniformly, with replacement, from `variables` and
/// negated with probability 1/2, so a clause may repeat a variable.
///
/// # Panics
///
/// If `variables` is empty and `clauses * k > 0`.
pub fn random_k_sat(rng: &mut Rng, variables: &[String], clauses: usize, k: usize) -> Formula {
    assert!(
        !variables.is_empty() || clauses * k == 0,
        "cannot draw literals from an empty variable pool"
    );

    Formula::ands((0..clauses).map(|_| {
        Formula::ors((0..k).map(|_| {
            let atom = Formula::atom(variables[rng.usize(..variables.len())].as_str());
            if rng.bool() { !atom } else { atom }
        }))
    }))
}

/// Names `prefix_0 .. prefix_{n-1}`.
#[must_use]
pub fn numbered_variables(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{prefix}_{i}")).collect()
}

/// `a_0 <-> a_1 <-> ... <-> a_{n-1}` together with `a_0` fixed to `first`.
///
/// Satisfiable for either polarity; unit propagation alone determines every
/// variable. Adding a fixed polarity on the last variable makes the chain a
/// parity test, see [`equivalence_chain_with_ends`].
#[must_use]
pub fn equivalence_chain(n: usize, first: bool) -> Formula {
    let atoms: Vec<Formula> = numbered_variables("a", n)
        .into_iter()
        .map(Formula::atom)
        .collect();

    let mut parts: Vec<Formula> = atoms
        .windows(2)
        .map(|pair| Formula::iff(pair[0].clone(), pair[1].clone()))
        .collect();

    if let Some(head) = atoms.first() {
        parts.push(if first { head.clone() } else { !head.clone() });
    }

    Formula::And(parts)
}

/// An equivalence chain whose ends are fixed to `first` and `last`.
///
/// Links alternate between equivalence and non-equivalence (`a_i <-> !a_{i+1}`
/// on odd `i`), so the end values must differ exactly when the number of
/// non-equivalence links, `(n - 1) / 2`, is odd.
#[must_use]
pub fn equivalence_chain_with_ends(n: usize, first: bool, last: bool) -> Formula {
    let atoms: Vec<Formula> = numbered_variables("a", n)
        .into_iter()
        .map(Formula::atom)
        .collect();

    let mut parts: Vec<Formula> = atoms
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let next = if i % 2 == 1 { !pair[1].clone() } else { pair[1].clone() };
            Formula::iff(pair[0].clone(), next)
        })
        .collect();

    if let (Some(head), Some(tail)) = (atoms.first(), atoms.last()) {
        parts.push(if first { head.clone() } else { !head.clone() });
        parts.push(if last { tail.clone() } else { !tail.clone() });
    }

    Formula::And(parts)
}

/// Whether [`equivalence_chain_with_ends`] is satisfiable, computed from parity.
#[must_use]
pub const fn chain_with_ends_is_sat(n: usize, first: bool, last: bool) -> bool {
    if n == 0 {
        return true;
    }
    let flips = (n - 1) / 2;
    (first != last) == (flips % 2 == 1)
}
