//! Rule configuration.
//!
//! A [`RuleConfig`] is resolved once, when a rule is constructed, and is
//! read-only afterwards. All defaults are filled in by the builder and every
//! out-of-range value is rejected there.

use crate::config::error::ConfigError;
use crate::rules::RuleKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Longest exercise the generator accepts.
pub const MAX_ACTIONS: usize = 20;

/// Longest number (in digits) a learner is asked to handle.
pub const MAX_DIGIT_COUNT: usize = 9;

/// Digit set and sign restrictions of one worksheet block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlockSettings {
    pub digits: Vec<i64>,
    pub only_addition: bool,
    pub only_subtraction: bool,
}

impl BlockSettings {
    pub fn new<I>(digits: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Self {
            digits: digits.into_iter().collect(),
            only_addition: false,
            only_subtraction: false,
        }
    }
}

/// How many beads of a column the simple technique uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeadMode {
    /// Lower beads only: states 0..=4, digits 1..=4
    FourBeads,
    /// Upper and lower beads: states 0..=9
    FiveBeads,
}

impl BeadMode {
    pub fn max_state(self) -> i64 {
        match self {
            Self::FourBeads => 4,
            Self::FiveBeads => 9,
        }
    }
}

/// Immutable configuration of one rule instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    technique: RuleKind,
    selected_digits: Vec<i64>,
    only_addition: bool,
    only_subtraction: bool,
    min_steps: usize,
    max_steps: usize,
    digit_count: usize,
    combine_levels: bool,
    blocks: BTreeMap<RuleKind, BlockSettings>,
    signature_weight: u32,
    bead_mode: BeadMode,
}

impl RuleConfig {
    pub fn builder(technique: RuleKind) -> RuleConfigBuilder {
        RuleConfigBuilder::new(technique)
    }

    pub fn technique(&self) -> RuleKind {
        self.technique
    }

    /// Technique digits, sorted and without duplicates.
    pub fn selected_digits(&self) -> &[i64] {
        &self.selected_digits
    }

    pub fn only_addition(&self) -> bool {
        self.only_addition
    }

    pub fn only_subtraction(&self) -> bool {
        self.only_subtraction
    }

    pub fn min_steps(&self) -> usize {
        self.min_steps
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn digit_count(&self) -> usize {
        self.digit_count
    }

    pub fn combine_levels(&self) -> bool {
        self.combine_levels
    }

    /// Sibling blocks supplying filler digits.
    pub fn blocks(&self) -> &BTreeMap<RuleKind, BlockSettings> {
        &self.blocks
    }

    pub fn has_block(&self, kind: RuleKind) -> bool {
        self.blocks.contains_key(&kind)
    }

    /// Replication factor of signature actions.
    pub fn signature_weight(&self) -> u32 {
        self.signature_weight
    }

    pub fn bead_mode(&self) -> BeadMode {
        self.bead_mode
    }

    /// Digits usable for non-signature steps: technique digits plus every
    /// sibling block's digits.
    pub fn filler_digits(&self) -> Vec<i64> {
        let mut digits: Vec<i64> = self
            .selected_digits
            .iter()
            .chain(self.blocks.values().flat_map(|block| block.digits.iter()))
            .copied()
            .collect();
        digits.sort_unstable();
        digits.dedup();
        digits
    }
}

/// Builder for [`RuleConfig`].
#[derive(Clone, Debug)]
pub struct RuleConfigBuilder {
    technique: RuleKind,
    selected_digits: Vec<i64>,
    only_addition: bool,
    only_subtraction: bool,
    min_steps: usize,
    max_steps: usize,
    digit_count: Option<usize>,
    combine_levels: bool,
    blocks: BTreeMap<RuleKind, BlockSettings>,
    signature_weight: Option<u32>,
    bead_mode: Option<BeadMode>,
}

impl RuleConfigBuilder {
    pub fn new(technique: RuleKind) -> Self {
        Self {
            technique,
            selected_digits: Vec::new(),
            only_addition: false,
            only_subtraction: false,
            min_steps: 3,
            max_steps: 5,
            digit_count: None,
            combine_levels: true,
            blocks: BTreeMap::new(),
            signature_weight: None,
            bead_mode: None,
        }
    }

    /// Set the technique digits (required).
    pub fn digits<I>(mut self, digits: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        self.selected_digits = digits.into_iter().collect();
        self
    }

    pub fn only_addition(mut self, enabled: bool) -> Self {
        self.only_addition = enabled;
        self
    }

    pub fn only_subtraction(mut self, enabled: bool) -> Self {
        self.only_subtraction = enabled;
        self
    }

    /// Inclusive range of the number of steps per exercise.
    pub fn steps(mut self, min: usize, max: usize) -> Self {
        self.min_steps = min;
        self.max_steps = max;
        self
    }

    pub fn digit_count(mut self, count: usize) -> Self {
        self.digit_count = Some(count);
        self
    }

    pub fn combine_levels(mut self, enabled: bool) -> Self {
        self.combine_levels = enabled;
        self
    }

    /// Add a sibling block. A block for the rule's own technique is ignored.
    pub fn block(mut self, kind: RuleKind, settings: BlockSettings) -> Self {
        if kind != self.technique {
            self.blocks.insert(kind, settings);
        }
        self
    }

    pub fn signature_weight(mut self, weight: u32) -> Self {
        self.signature_weight = Some(weight);
        self
    }

    pub fn bead_mode(mut self, mode: BeadMode) -> Self {
        self.bead_mode = Some(mode);
        self
    }

    /// Resolve defaults and validate.
    pub fn build(self) -> Result<RuleConfig, ConfigError> {
        let technique = self.technique;

        if self.selected_digits.is_empty() {
            return Err(ConfigError::NoDigitsSelected { technique });
        }

        let (min, max) = technique.digit_range();
        let mut selected_digits = self.selected_digits;
        selected_digits.sort_unstable();
        selected_digits.dedup();
        if let Some(&digit) = selected_digits.iter().find(|d| !(min..=max).contains(*d)) {
            return Err(ConfigError::DigitOutOfRange {
                technique,
                digit,
                min,
                max,
            });
        }

        for (kind, block) in &self.blocks {
            if let Some(&digit) = block.digits.iter().find(|d| !(1..=9).contains(*d)) {
                return Err(ConfigError::DigitOutOfRange {
                    technique: *kind,
                    digit,
                    min: 1,
                    max: 9,
                });
            }
        }

        if self.min_steps == 0 || self.min_steps > self.max_steps || self.max_steps > MAX_ACTIONS {
            return Err(ConfigError::StepRangeInvalid {
                min: self.min_steps,
                max: self.max_steps,
            });
        }

        let digit_count = self.digit_count.unwrap_or(technique.min_digit_count());
        if !(1..=MAX_DIGIT_COUNT).contains(&digit_count) {
            return Err(ConfigError::DigitCountOutOfRange(digit_count));
        }
        if digit_count < technique.min_digit_count() {
            return Err(ConfigError::DigitCountTooSmall {
                technique,
                required: technique.min_digit_count(),
                digit_count,
            });
        }

        let signature_weight = self
            .signature_weight
            .unwrap_or(technique.default_signature_weight());
        if signature_weight == 0 {
            return Err(ConfigError::ZeroSignatureWeight);
        }

        let largest = selected_digits.last().copied().unwrap_or(0);
        let bead_mode = match self.bead_mode {
            Some(BeadMode::FourBeads) if largest > 4 => {
                return Err(ConfigError::DigitOutOfRange {
                    technique,
                    digit: largest,
                    min: 1,
                    max: 4,
                })
            }
            Some(mode) => mode,
            None if largest <= 4 && technique == RuleKind::Simple => BeadMode::FourBeads,
            None => BeadMode::FiveBeads,
        };

        Ok(RuleConfig {
            technique,
            selected_digits,
            only_addition: self.only_addition,
            only_subtraction: self.only_subtraction,
            min_steps: self.min_steps,
            max_steps: self.max_steps,
            digit_count,
            combine_levels: self.combine_levels,
            blocks: self.blocks,
            signature_weight,
            bead_mode,
        })
    }
}
