//! Attempt budgets: the only termination guarantee of generation.

use crate::core::Example;
use crate::generator::error::AttemptError;
use tracing::{debug, trace, warn};

/// Attempts for single-column generation.
pub const SINGLE_COLUMN_ATTEMPTS: usize = 100;

/// Attempts for multi-column generation with up to three digits.
pub const NARROW_ATTEMPTS: usize = 200;

/// Attempts for multi-column generation with more than three digits.
pub const WIDE_ATTEMPTS: usize = 250;

/// Outcome of a bounded generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generated {
    pub example: Example,
    /// Attempts used, including the successful one
    pub attempts: usize,
    /// Whether the budget ran out and the fallback example was returned
    pub used_fallback: bool,
}

/// Fixed number of generate-and-validate attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttemptBudget {
    attempts: usize,
}

impl AttemptBudget {
    pub fn new(attempts: usize) -> Self {
        Self { attempts }
    }

    pub fn single_column() -> Self {
        Self::new(SINGLE_COLUMN_ATTEMPTS)
    }

    /// 200 attempts up to three digits, 250 beyond; doubled when the
    /// columns move independently.
    pub fn multi_column(digit_count: usize, combine_levels: bool) -> Self {
        let base = if digit_count <= 3 {
            NARROW_ATTEMPTS
        } else {
            WIDE_ATTEMPTS
        };
        Self::new(if combine_levels { base } else { base * 2 })
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Run `attempt` until it succeeds or the budget is spent.
    ///
    /// Never fails: an exhausted budget yields [`Example::fallback`].
    pub fn run<F>(&self, mut attempt: F) -> Generated
    where
        F: FnMut() -> Result<Example, AttemptError>,
    {
        for number in 1..=self.attempts {
            match attempt() {
                Ok(example) => {
                    debug!(attempts = number, steps = example.len(), "Example generated");
                    return Generated {
                        example,
                        attempts: number,
                        used_fallback: false,
                    };
                }
                Err(error) => trace!(attempt = number, %error, "Attempt abandoned"),
            }
        }

        warn!(
            attempts = self.attempts,
            "Attempt budget exhausted, returning fallback example"
        );
        Generated {
            example: Example::fallback(),
            attempts: self.attempts,
            used_fallback: true,
        }
    }
}
