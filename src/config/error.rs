//! Configuration errors.

use crate::rules::RuleKind;
use thiserror::Error;

/// Settings that violate a precondition of generation.
///
/// Raised before any generation attempt and never recovered locally.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Examples count {0} is outside [1, 1000]")]
    ExamplesCountOutOfRange(usize),

    #[error("Actions count {0} is outside [1, 20]")]
    ActionsCountOutOfRange(usize),

    #[error("Step range [{min}, {max}] is empty or outside [1, 20]")]
    StepRangeInvalid { min: usize, max: usize },

    #[error("Digit count {0} is outside [1, 9]")]
    DigitCountOutOfRange(usize),

    #[error("No block selected. Select at least one technique")]
    NoBlockSelected,

    #[error("{technique} needs at least {required} digits, got {digit_count}")]
    DigitCountTooSmall {
        technique: RuleKind,
        required: usize,
        digit_count: usize,
    },

    #[error("No digits selected for {technique}")]
    NoDigitsSelected { technique: RuleKind },

    #[error("Digit {digit} is outside [{min}, {max}] for {technique}")]
    DigitOutOfRange {
        technique: RuleKind,
        digit: i64,
        min: i64,
        max: i64,
    },

    #[error("Signature weight must be at least 1")]
    ZeroSignatureWeight,

    #[error("Duplicate allowance {0} is not a probability")]
    InvalidProbability(f64),

    #[error("Rule for {expected} cannot use a configuration built for {found}")]
    TechniqueMismatch { expected: RuleKind, found: RuleKind },

    #[error("Display digit count {0} is outside [1, 9]")]
    DisplayDigitCountOutOfRange(usize),
}
