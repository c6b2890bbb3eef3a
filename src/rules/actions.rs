//! Weighted sets of candidate actions.
//!
//! A rule offers every legal action from a state once, with a weight.
//! Signature actions carry the technique's replication factor, everything
//! else weight 1. Sampling is a plain weighted choice, which has the same
//! distribution as a uniform pick from the replicated multiset.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// One candidate action and how often it appears in the multiset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeightedAction {
    pub action: i64,
    pub weight: u32,
    /// Whether the transition exercises the technique
    pub signature: bool,
}

/// Legal actions from one state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionSet {
    entries: Vec<WeightedAction>,
}

impl ActionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer an action. Offering the same action twice keeps the larger
    /// weight.
    pub fn offer(&mut self, action: i64, weight: u32, signature: bool) {
        match self.entries.iter_mut().find(|entry| entry.action == action) {
            Some(entry) => {
                entry.weight = entry.weight.max(weight);
                entry.signature |= signature;
            }
            None => self.entries.push(WeightedAction {
                action,
                weight,
                signature,
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct actions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeightedAction> {
        self.entries.iter()
    }

    pub fn contains(&self, action: i64) -> bool {
        self.entries.iter().any(|entry| entry.action == action)
    }

    /// Multiplicity of `action`; 0 when it is not offered.
    pub fn weight_of(&self, action: i64) -> u32 {
        self.entries
            .iter()
            .find(|entry| entry.action == action)
            .map_or(0, |entry| entry.weight)
    }

    pub fn total_weight(&self) -> u32 {
        self.entries.iter().map(|entry| entry.weight).sum()
    }

    /// The replicated multiset: each action repeated `weight` times.
    pub fn multiset(&self) -> Vec<i64> {
        self.entries
            .iter()
            .flat_map(|entry| std::iter::repeat(entry.action).take(entry.weight as usize))
            .collect()
    }

    /// Pick one action with probability proportional to its weight.
    ///
    /// Returns `None` when nothing is offered.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<i64> {
        let sampler = WeightedIndex::new(self.entries.iter().map(|entry| entry.weight)).ok()?;
        self.entries
            .get(sampler.sample(rng))
            .map(|entry| entry.action)
    }
}

impl<'a> IntoIterator for &'a ActionSet {
    type Item = &'a WeightedAction;
    type IntoIter = std::slice::Iter<'a, WeightedAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn offering_twice_keeps_larger_weight() {
        let mut set = ActionSet::new();
        set.offer(4, 1, false);
        set.offer(4, 3, true);
        set.offer(-2, 1, false);

        assert_eq!(set.len(), 2);
        assert_eq!(set.weight_of(4), 3);
        assert!(set.iter().any(|entry| entry.action == 4 && entry.signature));
        assert_eq!(set.weight_of(7), 0);
    }

    #[test]
    fn multiset_replicates_by_weight() {
        let mut set = ActionSet::new();
        set.offer(1, 1, false);
        set.offer(4, 3, true);

        let mut multiset = set.multiset();
        multiset.sort_unstable();
        assert_eq!(multiset, vec![1, 4, 4, 4]);
        assert_eq!(set.total_weight(), 4);
    }

    #[test]
    fn empty_set_samples_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(ActionSet::new().sample(&mut rng), None);
    }

    #[test]
    fn sampling_only_returns_offered_actions() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut set = ActionSet::new();
        set.offer(2, 1, false);
        set.offer(-3, 2, false);

        for _ in 0..200 {
            let action = set.sample(&mut rng).unwrap();
            assert!(set.contains(action));
        }
    }

    #[test]
    fn sampling_follows_weights() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut set = ActionSet::new();
        set.offer(1, 1, false);
        set.offer(9, 3, true);

        let draws = 8000;
        let signature = (0..draws)
            .filter(|_| set.sample(&mut rng) == Some(9))
            .count();
        let share = signature as f64 / draws as f64;

        assert!((share - 0.75).abs() < 0.03, "share was {share}");
    }
}
