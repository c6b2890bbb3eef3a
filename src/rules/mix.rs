//! Mix: a friend move whose complement needs a brother move.

use crate::config::{ConfigError, RuleConfig};
use crate::core::bead::{friend, is_brother_move, UPPER_BEAD};
use crate::core::{units, Step, TWO_COLUMN_MAX};
use crate::rules::base::RuleCore;
use crate::rules::friends::{is_friend_move, is_units_move};
use crate::rules::{expect_technique, ActionSet, CheckScope, Rule, RuleKind, TransitionTable};
use crate::validation::ExampleChecks;
use rand::Rng;

/// Whether `from + delta` is a mixed move.
///
/// The move must cross a tens boundary, and the friend complement
/// `k = 10 - n` applied to the units column must itself be a brother move:
/// `+n` takes `k` away from a units digit in `[5, 4 + k]`, `-n` adds `k` to
/// a units digit in `[5 - k, 4]`.
pub fn is_mix_move(from: i64, delta: i64) -> bool {
    let n = delta.abs();
    if n <= UPPER_BEAD || !is_friend_move(from, delta) {
        return false;
    }

    let complement = friend(n);
    if delta > 0 {
        is_brother_move(units(from), -complement)
    } else {
        is_brother_move(units(from), complement)
    }
}

/// Two columns (state 0..=99), digits 6..=9.
///
/// `+n` is made as `+10 -5 +(n-5)` and `-n` as `-10 +5 -(n-5)`: the friend
/// move of ten with the complement split over the upper bead.
#[derive(Clone, Debug)]
pub struct MixRule {
    core: RuleCore,
    brothers_filler: bool,
    friends_filler: bool,
}

impl MixRule {
    pub fn new(config: RuleConfig) -> Result<Self, ConfigError> {
        expect_technique(&config, RuleKind::Mix)?;
        let table = TransitionTable::build(0..=TWO_COLUMN_MAX, config.selected_digits(), is_mix_move);
        let brothers_filler = config.has_block(RuleKind::Brothers);
        let friends_filler = config.has_block(RuleKind::Friends);
        Ok(Self {
            core: RuleCore::new(config, TWO_COLUMN_MAX, table),
            brothers_filler,
            friends_filler,
        })
    }

    pub fn table(&self) -> &TransitionTable {
        self.core.table()
    }

    fn is_filler(&self, from: i64, action: i64) -> bool {
        is_units_move(from, action, self.brothers_filler)
            || (self.friends_filler && is_friend_move(from, action))
    }
}

impl Rule for MixRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Mix
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
            .collect_actions(state, is_first, |from, action| self.is_filler(from, action))
    }

    fn is_signature(&self, from: i64, action: i64) -> bool {
        self.core.table().contains_move(from, action)
    }

    fn is_legal_move(&self, from: i64, action: i64) -> bool {
        self.is_signature(from, action) || self.is_filler(from, action)
    }

    fn decompose_action(&self, state: i64, action: i64) -> Vec<i64> {
        if !self.is_signature(state, action) {
            return vec![action];
        }
        let sign = action.signum();
        let rest = action.abs() - UPPER_BEAD;
        vec![sign * 10, -sign * UPPER_BEAD, sign * rest]
    }

    fn is_composed_signature(&self, step: &Step) -> bool {
        self.core.is_composed_signature(step)
    }

    fn checks(&self, scope: CheckScope) -> ExampleChecks<'_> {
        self.core
            .checks(scope, move |from, action| self.is_legal_move(from, action))
    }
}
