//! Direct counting on one column.

use crate::config::{ConfigError, RuleConfig};
use crate::core::bead::is_direct_move;
use crate::core::Step;
use crate::rules::base::RuleCore;
use crate::rules::{expect_technique, ActionSet, CheckScope, Rule, RuleKind, TransitionTable};
use crate::validation::ExampleChecks;
use rand::Rng;

/// Every step is a direct bead move on a single column.
///
/// In four-bead mode only the lower beads are used (states 0..=4); in
/// five-bead mode the upper bead is available too (states 0..=9).
#[derive(Clone, Debug)]
pub struct SimpleRule {
    core: RuleCore,
}

impl SimpleRule {
    pub fn new(config: RuleConfig) -> Result<Self, ConfigError> {
        expect_technique(&config, RuleKind::Simple)?;
        let max_state = config.bead_mode().max_state();
        Ok(Self {
            core: RuleCore::new(config, max_state, TransitionTable::default()),
        })
    }

    fn is_direct(&self, from: i64, action: i64) -> bool {
        from + action <= self.core.max_state() && is_direct_move(from, action)
    }
}

impl Rule for SimpleRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Simple
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
        self.core
            .collect_actions(state, is_first, |from, action| self.is_direct(from, action))
    }

    fn is_signature(&self, _from: i64, _action: i64) -> bool {
        false
    }

    fn is_legal_move(&self, from: i64, action: i64) -> bool {
        self.is_direct(from, action)
    }

    fn decompose_action(&self, _state: i64, action: i64) -> Vec<i64> {
        vec![action]
    }

    fn is_composed_signature(&self, _step: &Step) -> bool {
        false
    }

    fn checks(&self, scope: CheckScope) -> ExampleChecks<'_> {
        self.core
            .checks(scope, move |from, action| self.is_direct(from, action))
    }
}
