//! Reasons a single generation attempt is abandoned.

use crate::validation::Violation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Local failure of one attempt. Never leaves the attempt loop: the loop
/// retries, and once the budget is spent it returns the fallback example.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AttemptError {
    #[error("No legal action from state {state} at step {step}")]
    ActionUnavailable { step: usize, state: i64 },

    #[error("Example failed validation with {} violation(s)", .0.len())]
    ValidationFailure(Vec<Violation>),
}

impl AttemptError {
    /// Turn a validation result into an attempt result.
    pub fn from_validation(result: Validation<(), NonEmptyVec<Violation>>) -> Result<(), Self> {
        match result {
            Validation::Success(_) => Ok(()),
            Validation::Failure(errors) => {
                Err(Self::ValidationFailure(errors.iter().cloned().collect()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_maps_to_ok() {
        assert_eq!(AttemptError::from_validation(Validation::success(())), Ok(()));
    }

    #[test]
    fn failure_keeps_every_violation() {
        let result: Validation<(), NonEmptyVec<Violation>> =
            Validation::fail(Violation::BrokenChain { step: 2 });
        let error = AttemptError::from_validation(result).unwrap_err();

        assert_eq!(
            error,
            AttemptError::ValidationFailure(vec![Violation::BrokenChain { step: 2 }])
        );
        assert_eq!(
            error.to_string(),
            "Example failed validation with 1 violation(s)"
        );
    }
}
