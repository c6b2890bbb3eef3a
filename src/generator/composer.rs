//! Whole-number actions built on top of a single-column technique.
//!
//! The composer picks the digits of every action from the rule's digit set,
//! keeps numbers looking natural (no leading zero, few zeros overall, few
//! repeated digits) and leaves the technique requirements to the rule's own
//! validation.

use crate::config::{ConfigError, MAX_DIGIT_COUNT};
use crate::core::{pow10, Example};
use crate::generator::budget::{AttemptBudget, Generated};
use crate::generator::error::AttemptError;
use crate::rules::{CheckScope, Rule};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Settings of a [`MultiDigitComposer`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComposerConfig {
    /// Digits of the numbers shown to the learner
    pub display_digit_count: usize,
    /// Draw each number's length from `[1, display_digit_count]`
    pub variable_length: bool,
    /// Zero digits allowed across one whole exercise
    pub max_zero_digits: usize,
    /// Chance of keeping a digit already used in the same number
    pub duplicate_allowance: f64,
    /// Draws per digit position before falling back to the first digit
    pub digit_retry_limit: usize,
    /// Candidate numbers per step before the attempt is abandoned
    pub step_retry_limit: usize,
    /// Whether zero may appear as a non-leading digit
    pub allow_zero: bool,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            display_digit_count: 2,
            variable_length: false,
            max_zero_digits: 1,
            duplicate_allowance: 0.1,
            digit_retry_limit: 50,
            step_retry_limit: 20,
            allow_zero: true,
        }
    }
}

impl ComposerConfig {
    pub fn new(display_digit_count: usize) -> Self {
        Self {
            display_digit_count,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_DIGIT_COUNT).contains(&self.display_digit_count) {
            return Err(ConfigError::DisplayDigitCountOutOfRange(
                self.display_digit_count,
            ));
        }
        if !(0.0..=1.0).contains(&self.duplicate_allowance) {
            return Err(ConfigError::InvalidProbability(self.duplicate_allowance));
        }
        Ok(())
    }

    /// One column of headroom above the displayed digits.
    pub fn device_digit_count(&self) -> usize {
        self.display_digit_count + 1
    }

    /// Largest value the device can show.
    pub fn device_max(&self) -> i64 {
        pow10(self.device_digit_count()) - 1
    }
}

/// Zero digits already placed in the current attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ZeroTally {
    pub zeros: usize,
}

/// Wraps a rule to produce multi-digit actions such as `+21` or `-76`.
///
/// # Example
///
/// ```rust
/// use beadwork::config::RuleConfig;
/// use beadwork::generator::{ComposerConfig, MultiDigitComposer};
/// use beadwork::rules::{RuleKind, Technique};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let config = RuleConfig::builder(RuleKind::Friends)
///     .digits([9, 8])
///     .digit_count(3)
///     .build()
///     .unwrap();
/// let composer =
///     MultiDigitComposer::new(Technique::new(config).unwrap(), ComposerConfig::new(2)).unwrap();
///
/// let example = composer.generate(&mut StdRng::seed_from_u64(4));
/// assert!(example.is_consistent());
/// assert!(example.path().iter().all(|value| (0..1000).contains(value)));
/// ```
#[derive(Clone, Debug)]
pub struct MultiDigitComposer<R: Rule> {
    rule: R,
    config: ComposerConfig,
}

impl<R: Rule> MultiDigitComposer<R> {
    pub fn new(rule: R, config: ComposerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { rule, config })
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    pub fn budget(&self) -> AttemptBudget {
        let config = self.rule.config();
        AttemptBudget::multi_column(config.digit_count(), config.combine_levels())
    }

    /// Digits numbers are drawn from.
    pub fn digit_pool(&self) -> Vec<i64> {
        let mut pool = self.rule.config().selected_digits().to_vec();
        if self.config.allow_zero {
            pool.push(0);
        }
        pool
    }

    /// Length of the next number.
    pub fn action_length<G: Rng + ?Sized>(&self, rng: &mut G) -> usize {
        if self.config.variable_length {
            rng.gen_range(1..=self.config.display_digit_count)
        } else {
            self.config.display_digit_count
        }
    }

    /// Pick `length` digits, most significant first.
    ///
    /// `zeros_used` counts zeros already placed in this attempt. Each position
    /// is drawn up to `digit_retry_limit` times; a zero is refused in the
    /// leading position and once the zero allowance is spent, a repeated
    /// digit is refused unless the duplicate allowance triggers. When every
    /// draw is refused the first configured digit is used.
    pub fn select_digits<G: Rng + ?Sized>(
        &self,
        length: usize,
        zeros_used: usize,
        rng: &mut G,
    ) -> Vec<i64> {
        let pool = self.digit_pool();
        let fallback = self
            .rule
            .config()
            .selected_digits()
            .first()
            .copied()
            .unwrap_or(1);

        let mut digits: Vec<i64> = Vec::with_capacity(length);
        let mut zeros = zeros_used;
        for position in 0..length {
            let mut chosen = None;
            for _ in 0..self.config.digit_retry_limit {
                let Some(&digit) = pool.choose(rng) else {
                    break;
                };
                if digit == 0 && (position == 0 || zeros >= self.config.max_zero_digits) {
                    continue;
                }
                if digits.contains(&digit) && !rng.gen_bool(self.config.duplicate_allowance) {
                    continue;
                }
                chosen = Some(digit);
                break;
            }

            let digit = chosen.unwrap_or(fallback);
            if digit == 0 {
                zeros += 1;
            }
            digits.push(digit);
        }
        digits
    }

    /// Positional base-10 value of `digits`, most significant first.
    pub fn compose(digits: &[i64]) -> i64 {
        digits.iter().fold(0, |value, digit| value * 10 + digit)
    }

    /// Propose the next signed action from `total`.
    ///
    /// Returns `None` when the candidate would leave `[0, device_max]`. The
    /// tally only counts zeros of accepted candidates.
    pub fn next_action<G: Rng + ?Sized>(
        &self,
        total: i64,
        is_first: bool,
        tally: &mut ZeroTally,
        rng: &mut G,
    ) -> Option<i64> {
        let length = self.action_length(rng);
        let digits = self.select_digits(length, tally.zeros, rng);
        let magnitude = Self::compose(&digits);

        let config = self.rule.config();
        let positive = if is_first || total == 0 || config.only_addition() {
            true
        } else if config.only_subtraction() {
            false
        } else {
            rng.gen_bool(0.5)
        };
        let action = if positive { magnitude } else { -magnitude };

        let next = total + action;
        if next < 0 || next > self.config.device_max() {
            return None;
        }

        tally.zeros += digits.iter().filter(|digit| **digit == 0).count();
        Some(action)
    }

    /// Generate one example. Always returns a well-formed example.
    pub fn generate<G: Rng + ?Sized>(&self, rng: &mut G) -> Example {
        self.generate_report(rng).example
    }

    pub fn generate_report<G: Rng + ?Sized>(&self, rng: &mut G) -> Generated {
        self.budget().run(|| self.attempt(rng))
    }

    /// One attempt: assemble, truncate, validate with the wrapped rule.
    pub fn attempt<G: Rng + ?Sized>(&self, rng: &mut G) -> Result<Example, AttemptError> {
        let mut tally = ZeroTally::default();
        let mut example = Example::new(self.rule.generate_start_state());
        let steps = self.rule.generate_steps_count(rng);

        for step in 0..steps {
            let total = example.answer;
            let action = (0..self.config.step_retry_limit)
                .find_map(|_| self.next_action(total, step == 0, &mut tally, rng))
                .ok_or(AttemptError::ActionUnavailable { step, state: total })?;
            example.push(action);
        }

        let example = example.truncated(self.rule.config().max_steps());
        let checks = self.rule.checks(CheckScope::Composed {
            max: self.config.device_max(),
        });
        AttemptError::from_validation(checks.enforce(&example))?;
        Ok(example)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfig;
    use crate::rules::{RuleKind, Technique};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn composer(kind: RuleKind, digits: &[i64], config: ComposerConfig) -> MultiDigitComposer<Technique> {
        let rule_config = RuleConfig::builder(kind)
            .digits(digits.iter().copied())
            .steps(4, 4)
            .digit_count(config.display_digit_count + 1)
            .build()
            .unwrap();
        MultiDigitComposer::new(Technique::new(rule_config).unwrap(), config).unwrap()
    }

    #[test]
    fn config_validation() {
        assert!(ComposerConfig::new(0).validate().is_err());
        assert!(ComposerConfig::new(10).validate().is_err());

        let config = ComposerConfig {
            duplicate_allowance: 1.5,
            ..ComposerConfig::new(2)
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidProbability(1.5)));
    }

    #[test]
    fn device_has_one_column_of_headroom() {
        let config = ComposerConfig::new(2);
        assert_eq!(config.device_digit_count(), 3);
        assert_eq!(config.device_max(), 999);
    }

    #[test]
    fn budget_doubles_for_independent_levels() {
        let rule_config = |combine| {
            RuleConfig::builder(RuleKind::Friends)
                .digits([9])
                .digit_count(4)
                .combine_levels(combine)
                .build()
                .unwrap()
        };
        let budget = |combine| {
            MultiDigitComposer::new(
                Technique::new(rule_config(combine)).unwrap(),
                ComposerConfig::new(3),
            )
            .unwrap()
            .budget()
            .attempts()
        };

        assert_eq!(budget(true), 250);
        assert_eq!(budget(false), 500);
    }

    #[test]
    fn compose_is_positional() {
        assert_eq!(MultiDigitComposer::<Technique>::compose(&[3, 4, 2]), 342);
        assert_eq!(MultiDigitComposer::<Technique>::compose(&[7]), 7);
        assert_eq!(MultiDigitComposer::<Technique>::compose(&[]), 0);
    }

    #[test]
    fn selected_digits_never_lead_with_zero() {
        let composer = composer(RuleKind::Friends, &[1, 2], ComposerConfig::new(3));
        let mut rng = StdRng::seed_from_u64(8);

        for _ in 0..200 {
            let digits = composer.select_digits(3, 0, &mut rng);
            assert_eq!(digits.len(), 3);
            assert_ne!(digits[0], 0);
        }
    }

    #[test]
    fn spent_zero_allowance_refuses_zeros() {
        let composer = composer(RuleKind::Friends, &[4, 5], ComposerConfig::new(3));
        let mut rng = StdRng::seed_from_u64(13);

        for _ in 0..200 {
            let digits = composer.select_digits(3, 1, &mut rng);
            assert!(!digits.contains(&0));
        }
    }

    #[test]
    fn exhausted_draws_fall_back_to_first_digit() {
        let config = ComposerConfig {
            digit_retry_limit: 0,
            ..ComposerConfig::new(2)
        };
        let composer = composer(RuleKind::Friends, &[3, 7], config);
        let digits = composer.select_digits(2, 0, &mut StdRng::seed_from_u64(1));
        assert_eq!(digits, vec![3, 3]);
    }

    #[test]
    fn first_action_is_positive() {
        let composer = composer(RuleKind::Friends, &[9, 8], ComposerConfig::new(2));
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..50 {
            let mut tally = ZeroTally::default();
            let action = composer.next_action(0, true, &mut tally, &mut rng).unwrap();
            assert!(action > 0);
        }
    }

    #[test]
    fn candidates_leaving_the_device_are_rejected() {
        let config = ComposerConfig {
            allow_zero: false,
            ..ComposerConfig::new(2)
        };
        let rule_config = RuleConfig::builder(RuleKind::Friends)
            .digits([9])
            .only_addition(true)
            .digit_count(3)
            .build()
            .unwrap();
        let composer = MultiDigitComposer::new(Technique::new(rule_config).unwrap(), config).unwrap();
        let mut tally = ZeroTally::default();

        // 950 + 99 overflows three device columns.
        assert_eq!(
            composer.next_action(950, false, &mut tally, &mut StdRng::seed_from_u64(3)),
            None
        );
        assert_eq!(
            composer.next_action(900, false, &mut tally, &mut StdRng::seed_from_u64(3)),
            Some(99)
        );
    }

    #[test]
    fn variable_length_stays_within_display() {
        let config = ComposerConfig {
            variable_length: true,
            ..ComposerConfig::new(3)
        };
        let composer = composer(RuleKind::Friends, &[9], config);
        let mut rng = StdRng::seed_from_u64(17);

        let lengths: Vec<usize> = (0..200).map(|_| composer.action_length(&mut rng)).collect();
        assert!(lengths.iter().all(|length| (1..=3).contains(length)));
        assert!(lengths.contains(&1));
        assert!(lengths.contains(&3));
    }

    #[test]
    fn generated_examples_fit_the_device() {
        let composer = composer(RuleKind::Friends, &[9, 8, 7], ComposerConfig::new(2));
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..20 {
            let generated = composer.generate_report(&mut rng);
            let example = generated.example;
            assert!(example.is_consistent());
            assert!(example.path().iter().all(|value| (0..=999).contains(value)));
            if !generated.used_fallback {
                assert!(composer
                    .rule()
                    .checks(CheckScope::Composed { max: 999 })
                    .passes(&example));
            }
        }
    }
}
