//! Brothers: crossing the upper bead with the complement to five.

use crate::config::{ConfigError, RuleConfig};
use crate::core::bead::{brother, is_brother_move, is_direct_move, UPPER_BEAD};
use crate::core::{Step, COLUMN_MAX};
use crate::rules::base::RuleCore;
use crate::rules::{expect_technique, ActionSet, CheckScope, Rule, RuleKind, TransitionTable};
use crate::validation::ExampleChecks;
use rand::Rng;

/// Single column, digits 1..=4 paired by their sum to five (1↔4, 2↔3).
///
/// `+n` on a column whose lower beads cannot take `n` is made as
/// `+5 -(5-n)`, and `-n` as `-5 +(5-n)`. Those transitions are the signature
/// of this rule; direct bead moves fill the rest of an exercise.
#[derive(Clone, Debug)]
pub struct BrothersRule {
    core: RuleCore,
}

impl BrothersRule {
    pub fn new(config: RuleConfig) -> Result<Self, ConfigError> {
        expect_technique(&config, RuleKind::Brothers)?;
        let table = TransitionTable::build(0..=COLUMN_MAX, config.selected_digits(), is_brother_move);
        Ok(Self {
            core: RuleCore::new(config, COLUMN_MAX, table),
        })
    }

    pub fn table(&self) -> &TransitionTable {
        self.core.table()
    }
}

impl Rule for BrothersRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Brothers
    }

    fn config(&self) -> &RuleConfig {
        self.core.config()
    }

    fn max_state(&self) -> i64 {
        self.core.max_state()
    }

    fn generate_steps_count<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.core.steps_count(rng)
    }

    fn available_actions(&self, state: i64, is_first: bool) -> ActionSet {
        self.core.collect_actions(state, is_first, is_direct_move)
    }

    fn is_signature(&self, from: i64, action: i64) -> bool {
        self.core.table().contains_move(from, action)
    }

    fn is_legal_move(&self, from: i64, action: i64) -> bool {
        self.is_signature(from, action) || is_direct_move(from, action)
    }

    fn decompose_action(&self, state: i64, action: i64) -> Vec<i64> {
        if !self.is_signature(state, action) {
            return vec![action];
        }
        let sign = action.signum();
        vec![sign * UPPER_BEAD, -sign * brother(action.abs())]
    }

    fn is_composed_signature(&self, step: &Step) -> bool {
        self.core.is_composed_signature(step)
    }

    fn checks(&self, scope: CheckScope) -> ExampleChecks<'_> {
        self.core
            .checks(scope, move |from, action| self.is_legal_move(from, action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Example;

    fn rule(digits: &[i64]) -> BrothersRule {
        let config = RuleConfig::builder(RuleKind::Brothers)
            .digits(digits.iter().copied())
            .build()
            .unwrap();
        BrothersRule::new(config).unwrap()
    }

    #[test]
    fn table_matches_bead_condition() {
        let rule = rule(&[4]);
        let mut pairs: Vec<(i64, i64)> = rule.table().iter().collect();
        pairs.sort_unstable();

        // +4 from 1..=4, -4 from 5..=8.
        assert_eq!(
            pairs,
            vec![
                (1, 5),
                (2, 6),
                (3, 7),
                (4, 8),
                (5, 1),
                (6, 2),
                (7, 3),
                (8, 4)
            ]
        );
    }

    #[test]
    fn signature_actions_are_weighted() {
        let rule = rule(&[4]);
        let actions = rule.available_actions(2, false);

        assert_eq!(actions.weight_of(4), 3);
        // 2 - 4 leaves the column
        assert!(!actions.contains(-4));
    }

    #[test]
    fn filler_digits_come_from_sibling_blocks() {
        let config = RuleConfig::builder(RuleKind::Brothers)
            .digits([3])
            .block(RuleKind::Simple, crate::config::BlockSettings::new([1]))
            .build()
            .unwrap();
        let rule = BrothersRule::new(config).unwrap();

        let actions = rule.available_actions(5, false);
        assert!(actions.contains(1));
        assert_eq!(actions.weight_of(1), 1);
        assert_eq!(actions.weight_of(-3), 3);
    }

    #[test]
    fn decomposition_of_four_uses_five_and_one() {
        let rule = rule(&[4]);

        assert_eq!(rule.decompose_action(3, 4), vec![5, -1]);
        assert_eq!(rule.decompose_action(6, -4), vec![-5, 1]);
        assert_eq!(rule.decompose_action(0, 4), vec![4]);
    }

    #[test]
    fn decomposition_sums_to_action() {
        let rule = rule(&[1, 2, 3, 4]);
        for (from, to) in rule.table().iter() {
            let action = to - from;
            let parts = rule.decompose_action(from, action);
            assert_eq!(parts.len(), 2);
            assert_eq!(parts.iter().sum::<i64>(), action);
        }
    }

    #[test]
    fn validation_requires_a_brother_step() {
        let rule = rule(&[4]);

        assert!(rule.validate_example(&Example::from_actions(0, [4, 4, -4])));
        assert!(!rule.validate_example(&Example::from_actions(0, [4, -4])));
    }

    #[test]
    fn validation_rejects_impossible_moves() {
        let rule = rule(&[2]);
        // 8 + 2 leaves the column
        assert!(!rule.validate_example(&Example::from_actions(0, [2, 2, 2, 2, 2])));
    }
}
