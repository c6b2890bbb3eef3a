//! Worksheet settings as collected from the settings form.

use crate::config::error::ConfigError;
use crate::config::rule::{BlockSettings, MAX_ACTIONS, MAX_DIGIT_COUNT};
use crate::rules::RuleKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Most examples a single worksheet may hold.
pub const MAX_EXAMPLES: usize = 1000;

/// Raw settings of one worksheet-generation request.
///
/// # Example
///
/// ```rust
/// use beadwork::config::{BlockSettings, WorksheetSettings};
/// use beadwork::rules::RuleKind;
///
/// let settings: WorksheetSettings = serde_json::from_str(
///     r#"{ "examples_count": 20, "blocks": { "brothers": { "digits": [4] } } }"#,
/// ).unwrap();
///
/// assert!(settings.validate().is_ok());
/// assert_eq!(settings.technique(), Some(RuleKind::Brothers));
/// assert_eq!(settings.blocks[&RuleKind::Brothers], BlockSettings::new([4]));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorksheetSettings {
    pub examples_count: usize,
    /// Maximum number of actions per example
    pub actions_count: usize,
    /// Minimum number of actions per example; defaults to `actions_count`
    pub min_actions: Option<usize>,
    pub digit_count: usize,
    pub combine_levels: bool,
    /// Let multi-digit numbers vary in length
    pub variable_length: bool,
    pub blocks: BTreeMap<RuleKind, BlockSettings>,
}

impl Default for WorksheetSettings {
    fn default() -> Self {
        Self {
            examples_count: 10,
            actions_count: 5,
            min_actions: None,
            digit_count: 1,
            combine_levels: true,
            variable_length: false,
            blocks: BTreeMap::new(),
        }
    }
}

impl WorksheetSettings {
    /// Reject settings generation cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_EXAMPLES).contains(&self.examples_count) {
            return Err(ConfigError::ExamplesCountOutOfRange(self.examples_count));
        }

        if !(1..=MAX_ACTIONS).contains(&self.actions_count) {
            return Err(ConfigError::ActionsCountOutOfRange(self.actions_count));
        }

        let (min, max) = self.step_range();
        if min == 0 || min > max {
            return Err(ConfigError::StepRangeInvalid { min, max });
        }

        if !(1..=MAX_DIGIT_COUNT).contains(&self.digit_count) {
            return Err(ConfigError::DigitCountOutOfRange(self.digit_count));
        }

        let technique = self.technique().ok_or(ConfigError::NoBlockSelected)?;
        if self.digit_count < technique.min_digit_count() {
            return Err(ConfigError::DigitCountTooSmall {
                technique,
                required: technique.min_digit_count(),
                digit_count: self.digit_count,
            });
        }

        Ok(())
    }

    /// The technique being trained: the most advanced selected block.
    pub fn technique(&self) -> Option<RuleKind> {
        self.blocks.keys().max().copied()
    }

    /// Inclusive range of actions per example.
    pub fn step_range(&self) -> (usize, usize) {
        (
            self.min_actions.unwrap_or(self.actions_count),
            self.actions_count,
        )
    }
}
