//! Generate-and-validate loop over a rule.

use crate::core::{pow10, ColumnState, Example};
use crate::generator::budget::{AttemptBudget, Generated};
use crate::generator::error::AttemptError;
use crate::rules::{CheckScope, Rule};
use crate::validation::{CheckResult, ExampleChecks, Violation};
use rand::Rng;
use stillwater::validation::Validation;

/// How the columns of the device move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnMode {
    /// The rule's native state (one column, or two for carrying techniques)
    Single,
    /// Every column receives the same digit on every step
    LockStep { columns: usize },
    /// Every column samples its own digit on every step
    Independent { columns: usize },
}

/// Produces one validated example per call from a rule.
///
/// # Example
///
/// ```rust
/// use beadwork::config::RuleConfig;
/// use beadwork::generator::SequenceGenerator;
/// use beadwork::rules::{RuleKind, Technique};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let config = RuleConfig::builder(RuleKind::Brothers)
///     .digits([4])
///     .steps(4, 4)
///     .build()
///     .unwrap();
/// let generator = SequenceGenerator::new(Technique::new(config).unwrap());
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let example = generator.generate(&mut rng);
/// assert!(example.is_consistent());
/// assert!(example.steps[0].action > 0);
/// ```
#[derive(Clone, Debug)]
pub struct SequenceGenerator<R: Rule> {
    rule: R,
    mode: ColumnMode,
}

impl<R: Rule> SequenceGenerator<R> {
    /// Column mode follows the rule's configuration: single-column rules on
    /// a wider device move in lock-step when `combine_levels` is set and
    /// independently otherwise.
    pub fn new(rule: R) -> Self {
        let config = rule.config();
        let columns = config.digit_count();
        let mode = if rule.kind().columns() > 1 || columns <= 1 {
            ColumnMode::Single
        } else if config.combine_levels() {
            ColumnMode::LockStep { columns }
        } else {
            ColumnMode::Independent { columns }
        };
        Self { rule, mode }
    }

    pub fn with_mode(rule: R, mode: ColumnMode) -> Self {
        Self { rule, mode }
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    pub fn mode(&self) -> ColumnMode {
        self.mode
    }

    pub fn budget(&self) -> AttemptBudget {
        match self.mode {
            ColumnMode::Single => AttemptBudget::single_column(),
            ColumnMode::LockStep { columns } => AttemptBudget::multi_column(columns, true),
            ColumnMode::Independent { columns } => AttemptBudget::multi_column(columns, false),
        }
    }

    /// Generate one example. Always returns a well-formed example.
    pub fn generate<G: Rng + ?Sized>(&self, rng: &mut G) -> Example {
        self.generate_report(rng).example
    }

    /// Generate one example and report how many attempts it took.
    pub fn generate_report<G: Rng + ?Sized>(&self, rng: &mut G) -> Generated {
        self.budget().run(|| self.attempt(rng))
    }

    /// One attempt in the configured mode.
    pub fn attempt<G: Rng + ?Sized>(&self, rng: &mut G) -> Result<Example, AttemptError> {
        let example = match self.mode {
            ColumnMode::Single => self.assemble_single(rng)?,
            ColumnMode::LockStep { columns } => self.assemble_lock_step(columns, rng)?,
            ColumnMode::Independent { columns } => self.assemble_independent(columns, rng)?,
        };
        let example = example.truncated(self.rule.config().max_steps());

        match self.mode {
            ColumnMode::Single => {
                AttemptError::from_validation(self.rule.check_example(&example))?;
            }
            ColumnMode::LockStep { columns } | ColumnMode::Independent { columns } => {
                self.check_columns(&example, columns)?;
            }
        }
        Ok(example)
    }

    fn assemble_single<G: Rng + ?Sized>(&self, rng: &mut G) -> Result<Example, AttemptError> {
        let mut example = Example::new(self.rule.generate_start_state());
        let steps = self.rule.generate_steps_count(rng);

        for step in 0..steps {
            let state = example.answer;
            let action = self
                .rule
                .available_actions(state, step == 0)
                .sample(rng)
                .ok_or(AttemptError::ActionUnavailable { step, state })?;
            example.push(action);
        }
        Ok(example)
    }

    fn assemble_lock_step<G: Rng + ?Sized>(
        &self,
        columns: usize,
        rng: &mut G,
    ) -> Result<Example, AttemptError> {
        let repunit: i64 = (0..columns).map(pow10).sum();
        let mut digit = self.rule.generate_start_state();
        let mut example = Example::new(digit * repunit);
        let steps = self.rule.generate_steps_count(rng);

        for step in 0..steps {
            let action = self
                .rule
                .available_actions(digit, step == 0)
                .sample(rng)
                .ok_or(AttemptError::ActionUnavailable {
                    step,
                    state: example.answer,
                })?;
            digit = self.rule.apply_action(digit, action);
            example.push(action * repunit);
        }
        Ok(example)
    }

    fn assemble_independent<G: Rng + ?Sized>(
        &self,
        columns: usize,
        rng: &mut G,
    ) -> Result<Example, AttemptError> {
        let start = self.rule.generate_start_state();
        let mut state = ColumnState::from_value(start, columns);
        let mut example = Example::new(state.value());
        let steps = self.rule.generate_steps_count(rng);

        for step in 0..steps {
            let mut deltas = Vec::with_capacity(columns);
            for &digit in state.digits() {
                let action = self
                    .rule
                    .available_actions(digit, step == 0)
                    .sample(rng)
                    .ok_or(AttemptError::ActionUnavailable {
                        step,
                        state: state.value(),
                    })?;
                deltas.push(self.rule.apply_action(digit, action) - digit);
            }

            let next = state.apply(&deltas);
            example.push(next.value() - state.value());
            state = next;
        }
        Ok(example)
    }

    /// Validate a multi-column example: the composite number, then every
    /// column as a native example of its own. One signature step on any
    /// column satisfies the technique.
    fn check_columns(&self, example: &Example, columns: usize) -> Result<(), AttemptError> {
        let config = self.rule.config();
        let mut violations = Vec::new();

        let composite = ExampleChecks::builder()
            .bounds(pow10(columns) - 1)
            .only_addition(config.only_addition())
            .only_subtraction(config.only_subtraction())
            .build();
        collect(composite.enforce(example), &mut violations);

        let column_checks = self.rule.checks(CheckScope::Column);
        let mut has_signature = !self.rule.kind().has_signature();
        for column in 0..columns {
            let projected = example.column(column);
            collect(column_checks.enforce(&projected), &mut violations);
            has_signature |= projected
                .steps
                .iter()
                .any(|step| self.rule.is_signature(step.from, step.action));
        }

        if !has_signature {
            violations.push(Violation::MissingSignature {
                technique: self.rule.kind(),
            });
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(AttemptError::ValidationFailure(violations))
        }
    }
}

fn collect(result: CheckResult, violations: &mut Vec<Violation>) {
    if let Validation::Failure(errors) = result {
        violations.extend(errors.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfig;
    use crate::core::digit_at;
    use crate::rules::{RuleKind, Technique};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn technique(kind: RuleKind, digits: &[i64], steps: usize) -> Technique {
        let config = RuleConfig::builder(kind)
            .digits(digits.iter().copied())
            .steps(steps, steps)
            .build()
            .unwrap();
        Technique::new(config).unwrap()
    }

    #[test]
    fn single_column_examples_validate() {
        let generator = SequenceGenerator::new(technique(RuleKind::Brothers, &[4, 3], 5));
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..50 {
            let generated = generator.generate_report(&mut rng);
            assert!(!generated.used_fallback);
            assert_eq!(generated.example.len(), 5);
            assert!(generator.rule().validate_example(&generated.example));
        }
    }

    #[test]
    fn same_seed_gives_same_example() {
        let generator = SequenceGenerator::new(technique(RuleKind::Friends, &[9, 8], 6));

        let first = generator.generate(&mut StdRng::seed_from_u64(77));
        let second = generator.generate(&mut StdRng::seed_from_u64(77));
        assert_eq!(first, second);
    }

    #[test]
    fn mode_follows_configuration() {
        let config = RuleConfig::builder(RuleKind::Simple)
            .digits([1, 2])
            .digit_count(3)
            .combine_levels(false)
            .build()
            .unwrap();
        let generator = SequenceGenerator::new(Technique::new(config).unwrap());
        assert_eq!(generator.mode(), ColumnMode::Independent { columns: 3 });
        assert_eq!(generator.budget().attempts(), 400);

        let friends = SequenceGenerator::new(technique(RuleKind::Friends, &[9], 3));
        assert_eq!(friends.mode(), ColumnMode::Single);
        assert_eq!(friends.budget().attempts(), 100);
    }

    #[test]
    fn lock_step_moves_every_column_alike() {
        let rule = technique(RuleKind::Simple, &[1, 2, 3, 4], 4);
        let generator = SequenceGenerator::with_mode(rule, ColumnMode::LockStep { columns: 3 });
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..20 {
            let example = generator.generate(&mut rng);
            assert!(example.is_consistent());
            for step in &example.steps {
                assert_eq!(step.action % 111, 0);
                let digit = digit_at(step.to, 0);
                assert_eq!(step.to, digit * 111);
            }
        }
    }

    #[test]
    fn independent_columns_record_net_delta() {
        let rule = technique(RuleKind::Brothers, &[1, 2, 3, 4], 6);
        let generator = SequenceGenerator::with_mode(rule, ColumnMode::Independent { columns: 2 });
        let mut rng = StdRng::seed_from_u64(21);

        for _ in 0..20 {
            let generated = generator.generate_report(&mut rng);
            let example = generated.example;
            assert!(example.is_consistent());
            if generated.used_fallback {
                continue;
            }
            assert_eq!(example.len(), 6);
            for column in 0..2 {
                let projected = example.column(column);
                assert!(projected.path().iter().all(|state| (0..=9).contains(state)));
                assert!(projected.steps.iter().all(|step| step.action != 0));
            }
        }
    }

    #[test]
    fn empty_action_set_abandons_attempt() {
        let config = RuleConfig::builder(RuleKind::Simple)
            .digits([1])
            .steps(2, 2)
            .only_addition(true)
            .only_subtraction(true)
            .build()
            .unwrap();
        let generator = SequenceGenerator::new(Technique::new(config).unwrap());
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(
            generator.attempt(&mut rng),
            Err(AttemptError::ActionUnavailable { step: 1, state: 1 })
        );
    }

    #[test]
    fn exhausted_budget_returns_fallback() {
        let config = RuleConfig::builder(RuleKind::Simple)
            .digits([1])
            .steps(2, 2)
            .only_addition(true)
            .only_subtraction(true)
            .build()
            .unwrap();
        let generator = SequenceGenerator::new(Technique::new(config).unwrap());
        let generated = generator.generate_report(&mut StdRng::seed_from_u64(0));

        assert!(generated.used_fallback);
        assert_eq!(generated.attempts, 100);
        assert_eq!(generated.example, Example::fallback());
    }
}
