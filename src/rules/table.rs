//! Precomputed signature transitions of a technique.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// The `(from, to)` pairs a technique recognises as signature transitions.
///
/// Built once per rule from its digit set by enumerating every state and
/// signed digit; immutable afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitionTable {
    pairs: BTreeSet<(i64, i64)>,
}

impl TransitionTable {
    /// Enumerate `states × ±digits` and keep the moves the predicate accepts.
    pub fn build<F>(states: RangeInclusive<i64>, digits: &[i64], is_signature: F) -> Self
    where
        F: Fn(i64, i64) -> bool,
    {
        let mut pairs = BTreeSet::new();
        for from in states {
            for &digit in digits {
                for delta in [digit, -digit] {
                    if is_signature(from, delta) {
                        pairs.insert((from, from + delta));
                    }
                }
            }
        }
        Self { pairs }
    }

    pub fn contains(&self, from: i64, to: i64) -> bool {
        self.pairs.contains(&(from, to))
    }

    pub fn contains_move(&self, from: i64, delta: i64) -> bool {
        delta != 0 && self.contains(from, from + delta)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.pairs.iter().copied()
    }
}
