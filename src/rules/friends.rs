//! Friends: crossing a tens boundary with the complement to ten.

use crate::config::{ConfigError, RuleConfig};
use crate::core::bead::{friend, is_brother_move, is_direct_move};
use crate::core::{tens, units, Step, TWO_COLUMN_MAX};
use crate::rules::base::RuleCore;
use crate::rules::{expect_technique, ActionSet, CheckScope, Rule, RuleKind, TransitionTable};
use crate::validation::ExampleChecks;
use rand::Rng;

/// Whether `from + delta` has to cross a tens boundary.
///
/// Adding `n` crosses when the units digit cannot take it and the tens
/// column has room; subtracting `n` crosses when the units digit is smaller
/// than `n` and the tens column has something to give.
pub fn is_friend_move(from: i64, delta: i64) -> bool {
    let n = delta.abs();
    if !(1..=9).contains(&n) || !(0..=TWO_COLUMN_MAX).contains(&from) {
        return false;
    }

    if delta > 0 {
        units(from) + n >= 10 && tens(from) < 9
    } else {
        units(from) < n && tens(from) > 0
    }
}

/// A move that stays on the units column of a two-column state.
///
/// Direct moves are always accepted; brother moves only when the learner has
/// the Brothers block alongside.
pub(crate) fn is_units_move(from: i64, delta: i64, brothers: bool) -> bool {
    if !(0..=TWO_COLUMN_MAX).contains(&from) {
        return false;
    }
    let digit = units(from);
    is_direct_move(digit, delta) || (brothers && is_brother_move(digit, delta))
}

/// Two columns (state 0..=99), digits 1..=9 paired by their sum to ten.
///
/// `+n` that overflows the units column is made as `+10 -(10-n)`, and `-n`
/// that underflows it as `-10 +(10-n)`.
#[derive(Clone, Debug)]
pub struct FriendsRule {
    core: RuleCore,
    brothers_filler: bool,
}

impl FriendsRule {
    pub fn new(config: RuleConfig) -> Result<Self, ConfigError> {
        expect_technique(&config, RuleKind::Friends)?;
        let table =
            TransitionTable::build(0..=TWO_COLUMN_MAX, config.selected_digits(), is_friend_move);
        let brothers_filler = config.has_block(RuleKind::Brothers);
        Ok(Self {
            core: RuleCore::new(config, TWO_COLUMN_MAX, table),
            brothers_filler,
        })
    }

    pub fn table(&self) -> &TransitionTable {
        self.core.table()
    }

    fn is_filler(&self, from: i64, action: i64) -> bool {
        is_units_move(from, action, self.brothers_filler)
    }
}

impl Rule for FriendsRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Friends
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
        vec![sign * 10, -sign * friend(action.abs())]
    }

    fn is_composed_signature(&self, step: &Step) -> bool {
        self.core.is_composed_signature(step)
    }

    fn checks(&self, scope: CheckScope) -> ExampleChecks<'_> {
        self.core
            .checks(scope, move |from, action| self.is_legal_move(from, action))
    }
}
