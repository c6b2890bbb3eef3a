//! Pedagogical techniques as rules over device states.
//!
//! A rule knows which actions are legal from a state, which transitions
//! exercise its technique (its signature transitions), how such a transition
//! is taught step by step, and how to validate a finished example.
//!
//! Four techniques exist:
//! - **Simple**: direct bead moves on one column
//! - **Brothers**: crossing the upper bead with `±5 ∓ (5-n)`
//! - **Friends**: crossing a tens boundary with `±10 ∓ (10-n)`
//! - **Mix**: a friend move whose complement needs a brother move
//!
//! All of them implement [`Rule`]. [`Technique`] is the closed set of the four
//! and is what the generators are normally handed.
//!
//! # Example
//!
//! ```rust
//! use beadwork::config::RuleConfig;
//! use beadwork::rules::{Rule, RuleKind, Technique};
//!
//! let config = RuleConfig::builder(RuleKind::Brothers)
//!     .digits([4])
//!     .build()
//!     .unwrap();
//! let rule = Technique::new(config).unwrap();
//!
//! assert!(rule.is_signature(3, 4));
//! assert_eq!(rule.decompose_action(3, 4), vec![5, -1]);
//! ```

pub mod actions;
pub mod base;
pub mod brothers;
pub mod friends;
pub mod mix;
pub mod simple;
pub mod table;

pub use actions::{ActionSet, WeightedAction};
pub use brothers::BrothersRule;
pub use friends::FriendsRule;
pub use mix::MixRule;
pub use simple::SimpleRule;
pub use table::TransitionTable;

use crate::config::{ConfigError, RuleConfig};
use crate::core::{Example, Step};
use crate::validation::{CheckResult, ExampleChecks};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The techniques, ordered from least to most advanced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Simple,
    Brothers,
    Friends,
    Mix,
}

impl RuleKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Brothers => "brothers",
            Self::Friends => "friends",
            Self::Mix => "mix",
        }
    }

    /// Inclusive range of technique digits.
    pub fn digit_range(self) -> (i64, i64) {
        match self {
            Self::Simple => (1, 9),
            Self::Brothers => (1, 4),
            Self::Friends => (1, 9),
            Self::Mix => (6, 9),
        }
    }

    /// Device columns the technique's native state spans.
    pub fn columns(self) -> usize {
        match self {
            Self::Simple | Self::Brothers => 1,
            Self::Friends | Self::Mix => 2,
        }
    }

    pub fn min_digit_count(self) -> usize {
        self.columns()
    }

    /// Whether validated examples must contain a signature transition.
    pub fn has_signature(self) -> bool {
        self != Self::Simple
    }

    /// Default replication factor of signature actions.
    pub fn default_signature_weight(self) -> u32 {
        match self {
            Self::Simple => 1,
            Self::Brothers | Self::Friends => 3,
            Self::Mix => 4,
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which checks a validation run applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckScope {
    /// The rule's own state range. Every step must be a legal move and,
    /// for signature techniques, one step must be a signature transition.
    Native,
    /// One column of a multi-column exercise. The signature requirement is
    /// evaluated across all columns by the caller.
    Column,
    /// Whole numbers on a device holding values in `[0, max]`.
    Composed { max: i64 },
}

/// Capability set every technique implements.
pub trait Rule {
    fn kind(&self) -> RuleKind;

    fn config(&self) -> &RuleConfig;

    /// Highest native state.
    fn max_state(&self) -> i64;

    /// Every technique starts from a cleared device.
    fn generate_start_state(&self) -> i64 {
        0
    }

    /// Uniform in `[min_steps, max_steps]`.
    fn generate_steps_count<R: Rng + ?Sized>(&self, rng: &mut R) -> usize;

    /// Legal actions from `state`, signature actions weighted up.
    ///
    /// Only additions are offered when `is_first` or when `state == 0`.
    fn available_actions(&self, state: i64, is_first: bool) -> ActionSet;

    fn apply_action(&self, state: i64, action: i64) -> i64 {
        state + action
    }

    /// Whether `from + action` is one of the technique's signature transitions.
    fn is_signature(&self, from: i64, action: i64) -> bool;

    /// Whether `from + action` may appear in a native example.
    fn is_legal_move(&self, from: i64, action: i64) -> bool;

    /// Teaching breakdown of an action. Non-signature actions come back
    /// unchanged; the parts always sum to `action`.
    fn decompose_action(&self, state: i64, action: i64) -> Vec<i64>;

    /// Signature test for a whole-number step on a multi-column device.
    fn is_composed_signature(&self, step: &Step) -> bool;

    fn checks(&self, scope: CheckScope) -> ExampleChecks<'_>;

    /// Re-simulate the example and collect every violation.
    fn check_example(&self, example: &Example) -> CheckResult {
        self.checks(CheckScope::Native).enforce(example)
    }

    fn validate_example(&self, example: &Example) -> bool {
        self.check_example(example).is_success()
    }
}

/// One of the four techniques.
#[derive(Clone, Debug)]
pub enum Technique {
    Simple(SimpleRule),
    Brothers(BrothersRule),
    Friends(FriendsRule),
    Mix(MixRule),
}

macro_rules! dispatch {
    ($self:ident, $rule:ident => $body:expr) => {
        match $self {
            Technique::Simple($rule) => $body,
            Technique::Brothers($rule) => $body,
            Technique::Friends($rule) => $body,
            Technique::Mix($rule) => $body,
        }
    };
}

impl Technique {
    /// Build the rule named by `config.technique()`.
    pub fn new(config: RuleConfig) -> Result<Self, ConfigError> {
        Ok(match config.technique() {
            RuleKind::Simple => Self::Simple(SimpleRule::new(config)?),
            RuleKind::Brothers => Self::Brothers(BrothersRule::new(config)?),
            RuleKind::Friends => Self::Friends(FriendsRule::new(config)?),
            RuleKind::Mix => Self::Mix(MixRule::new(config)?),
        })
    }
}

impl Rule for Technique {
    fn kind(&self) -> RuleKind {
        dispatch!(self, rule => rule.kind())
    }

    fn config(&self) -> &RuleConfig {
        dispatch!(self, rule => rule.config())
    }

    fn max_state(&self) -> i64 {
        dispatch!(self, rule => rule.max_state())
    }

    fn generate_steps_count<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        dispatch!(self, rule => rule.generate_steps_count(rng))
    }

    fn available_actions(&self, state: i64, is_first: bool) -> ActionSet {
        dispatch!(self, rule => rule.available_actions(state, is_first))
    }

    fn is_signature(&self, from: i64, action: i64) -> bool {
        dispatch!(self, rule => rule.is_signature(from, action))
    }

    fn is_legal_move(&self, from: i64, action: i64) -> bool {
        dispatch!(self, rule => rule.is_legal_move(from, action))
    }

    fn decompose_action(&self, state: i64, action: i64) -> Vec<i64> {
        dispatch!(self, rule => rule.decompose_action(state, action))
    }

    fn is_composed_signature(&self, step: &Step) -> bool {
        dispatch!(self, rule => rule.is_composed_signature(step))
    }

    fn checks(&self, scope: CheckScope) -> ExampleChecks<'_> {
        dispatch!(self, rule => rule.checks(scope))
    }
}

/// Fail construction when a config built for another technique is passed in.
pub(crate) fn expect_technique(config: &RuleConfig, expected: RuleKind) -> Result<(), ConfigError> {
    if config.technique() == expected {
        Ok(())
    } else {
        Err(ConfigError::TechniqueMismatch {
            expected,
            found: config.technique(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_ordered_by_difficulty() {
        assert!(RuleKind::Simple < RuleKind::Brothers);
        assert!(RuleKind::Brothers < RuleKind::Friends);
        assert!(RuleKind::Friends < RuleKind::Mix);
    }

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RuleKind::Mix).unwrap(), "\"mix\"");
        let kind: RuleKind = serde_json::from_str("\"brothers\"").unwrap();
        assert_eq!(kind, RuleKind::Brothers);
        assert_eq!(RuleKind::Friends.to_string(), "friends");
    }

    #[test]
    fn technique_builds_matching_variant() {
        for (kind, digit) in [
            (RuleKind::Simple, 1),
            (RuleKind::Brothers, 2),
            (RuleKind::Friends, 3),
            (RuleKind::Mix, 6),
        ] {
            let config = RuleConfig::builder(kind).digits([digit]).build().unwrap();
            let rule = Technique::new(config).unwrap();
            assert_eq!(rule.kind(), kind);
            assert_eq!(rule.generate_start_state(), 0);
        }
    }

    #[test]
    fn variant_rejects_foreign_config() {
        let config = RuleConfig::builder(RuleKind::Friends)
            .digits([3])
            .build()
            .unwrap();
        let result = BrothersRule::new(config);
        assert!(matches!(
            result,
            Err(ConfigError::TechniqueMismatch {
                expected: RuleKind::Brothers,
                found: RuleKind::Friends
            })
        ));
    }
}
