//! Reasons an example can be rejected.

use crate::rules::RuleKind;
use thiserror::Error;

/// A single way an assembled example breaks the rules of its technique
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Violation {
    #[error("Answer {actual} does not match start plus actions ({expected})")]
    AnswerMismatch { expected: i64, actual: i64 },

    #[error("Step {step} does not continue from the previous state")]
    BrokenChain { step: usize },

    #[error("State {state} is outside [0, {max}] (step {step:?})")]
    OutOfBounds {
        step: Option<usize>,
        state: i64,
        max: i64,
    },

    #[error("Step {step} subtracts {action} from a cleared device")]
    SubtractionFromZero { step: usize, action: i64 },

    #[error("Step {step} subtracts {action} but only additions are allowed")]
    SubtractionNotAllowed { step: usize, action: i64 },

    #[error("Step {step} adds {action} but only subtractions are allowed")]
    AdditionNotAllowed { step: usize, action: i64 },

    #[error("Step {step} ({action:+} from {from}) cannot be made on the device")]
    IllegalMove { step: usize, from: i64, action: i64 },

    #[error("No step exercises the {technique} technique")]
    MissingSignature { technique: RuleKind },
}
