#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Branching order for the DPLL search.
//!
//! The search always branches on the first unassigned variable of the order
//! it is handed. Any randomisation happens here, explicitly and seeded,
//! before the search starts.

use clap::ValueEnum;
use itertools::Itertools;

/// How the variable list is arranged before it is handed to the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VariableOrder {
    /// Keep the order the variables were supplied in.
    Given,
    /// Lexicographic by name.
    #[default]
    Sorted,
    /// A seeded permutation of the sorted order.
    Shuffled {
        /// Seed for the permutation; equal seeds give equal orders.
        seed: u64,
    },
}

/// Command-line name of a [`VariableOrder`], without the seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OrderKind {
    /// [`VariableOrder::Given`].
    Given,
    /// [`VariableOrder::Sorted`].
    #[default]
    Sorted,
    /// [`VariableOrder::Shuffled`], seeded by `--seed`.
    Shuffled,
}

impl VariableOrder {
    /// Combines a command-line order with the seed for shuffling.
    #[must_use]
    pub const fn from_kind(kind: OrderKind, seed: u64) -> Self {
        match kind {
            OrderKind::Given => Self::Given,
            OrderKind::Sorted => Self::Sorted,
            OrderKind::Shuffled => Self::Shuffled { seed },
        }
    }

    /// Arranges `variables` in this order.
    pub fn arrange<I, S>(&self, variables: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let variables = variables.into_iter().map(Into::into);
        match *self {
            Self::Given => variables.collect(),
            Self::Sorted => variables.sorted().collect(),
            Self::Shuffled { seed } => {
                let mut sorted = variables.sorted().collect_vec();
                fastrand::Rng::with_seed(seed).shuffle(&mut sorted);
                sorted
            }
        }
    }
}
