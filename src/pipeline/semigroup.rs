//! Combination laws for pipeline accumulators
//!
//! The aggregation stage folds values in arrival order, which is not stable
//! across concurrent producers. Accumulators therefore implement
//! `stillwater::Semigroup` with an operation that is associative and
//! commutative, and `stillwater::Monoid` pairs that operation with its
//! identity. Plain counts use `stillwater::monoid::Sum`.

use std::collections::BTreeMap;
use stillwater::{Monoid, Semigroup};

/// Outcome of one group's map/reduce pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupOutcome {
    /// Position of the group in the caller's input
    pub index: usize,
    /// Number of elements satisfying the classifier
    pub satisfied: usize,
    /// Number of elements in the group
    pub size: usize,
}

/// Per-group outcomes keyed by group index.
///
/// Every group contributes exactly one key, so merging two tallies is a
/// disjoint union and the result does not depend on arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupTally {
    outcomes: BTreeMap<usize, GroupOutcome>,
}

impl GroupTally {
    /// Tally holding a single group's outcome
    pub fn single(outcome: GroupOutcome) -> Self {
        let mut outcomes = BTreeMap::new();
        outcomes.insert(outcome.index, outcome);
        Self { outcomes }
    }

    /// Number of groups in the tally
    pub fn groups(&self) -> usize {
        self.outcomes.len()
    }

    /// Outcomes in group order
    pub fn outcomes(&self) -> impl Iterator<Item = &GroupOutcome> {
        self.outcomes.values()
    }

    /// Sum of satisfying counts across groups
    pub fn total_satisfied(&self) -> usize {
        self.outcomes.values().map(|o| o.satisfied).sum()
    }

    /// Raw satisfying count per group, averaged over groups
    pub fn mean_count(&self) -> Option<f64> {
        if self.outcomes.is_empty() {
            return None;
        }
        Some(self.total_satisfied() as f64 / self.groups() as f64)
    }

    /// Fraction of satisfying elements per group, averaged over groups.
    ///
    /// An empty group contributes a fraction of zero.
    pub fn mean_fraction(&self) -> Option<f64> {
        if self.outcomes.is_empty() {
            return None;
        }
        let sum: f64 = self
            .outcomes
            .values()
            .map(|o| {
                if o.size == 0 {
                    0.0
                } else {
                    o.satisfied as f64 / o.size as f64
                }
            })
            .sum();
        Some(sum / self.groups() as f64)
    }
}

impl Semigroup for GroupTally {
    fn combine(mut self, other: Self) -> Self {
        for (index, outcome) in other.outcomes {
            // Indices are unique per run; keep the first outcome if a caller
            // ever merges overlapping tallies.
            self.outcomes.entry(index).or_insert(outcome);
        }
        self
    }
}

impl Monoid for GroupTally {
    fn empty() -> Self {
        Self::default()
    }
}
