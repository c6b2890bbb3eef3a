//! Checks an assembled example must pass before it is handed out.

use crate::core::{Example, Step};
use crate::rules::RuleKind;
use crate::validation::violations::Violation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Result of checking an example: success, or every violation found
pub type CheckResult = Validation<(), NonEmptyVec<Violation>>;

/// Legality predicate over `(from, action)`
pub type MovePredicate<'a> = Box<dyn Fn(i64, i64) -> bool + Send + Sync + 'a>;

/// Classifier telling whether a step exercises the trained technique
pub type SignatureClassifier<'a> = Box<dyn Fn(&Step) -> bool + Send + Sync + 'a>;

/// Checks for one technique in one scope.
/// Uses Validation to accumulate ALL violations of an example.
pub struct ExampleChecks<'a> {
    pub(crate) max_state: Option<i64>,
    pub(crate) only_addition: bool,
    pub(crate) only_subtraction: bool,
    pub(crate) legal_move: Option<MovePredicate<'a>>,
    pub(crate) signature: Option<(RuleKind, SignatureClassifier<'a>)>,
}

impl<'a> ExampleChecks<'a> {
    pub fn builder() -> ExampleChecksBuilder<'a> {
        ExampleChecksBuilder::new()
    }

    /// Check the example, accumulating ALL violations.
    ///
    /// The example is re-simulated from `start`: the chain of states, the
    /// answer, the bounds of every visited state, the sign restrictions, move
    /// legality and, when required, the presence of a signature step.
    pub fn enforce(&self, example: &Example) -> CheckResult {
        let mut checks: Vec<CheckResult> = Vec::new();

        if let Some(max) = self.max_state {
            checks.push(in_bounds(None, example.start, max));
        }

        let mut current = example.start;
        for (index, step) in example.steps.iter().enumerate() {
            if step.from != current || !step.is_consistent() {
                checks.push(Validation::fail(Violation::BrokenChain { step: index }));
            }

            if let Some(max) = self.max_state {
                checks.push(in_bounds(Some(index), step.to, max));
            }

            if step.is_subtraction() && (index == 0 || step.from == 0) {
                checks.push(Validation::fail(Violation::SubtractionFromZero {
                    step: index,
                    action: step.action,
                }));
            }

            if self.only_addition && step.is_subtraction() {
                checks.push(Validation::fail(Violation::SubtractionNotAllowed {
                    step: index,
                    action: step.action,
                }));
            }

            // The opening step loads the cleared device, so it is always an addition.
            if self.only_subtraction && index > 0 && step.is_addition() {
                checks.push(Validation::fail(Violation::AdditionNotAllowed {
                    step: index,
                    action: step.action,
                }));
            }

            if let Some(legal) = &self.legal_move {
                if step.action != 0 && !legal(step.from, step.action) {
                    checks.push(Validation::fail(Violation::IllegalMove {
                        step: index,
                        from: step.from,
                        action: step.action,
                    }));
                }
            }

            current = step.to;
        }

        let expected = example.start + example.actions().sum::<i64>();
        if current != example.answer || expected != example.answer {
            checks.push(Validation::fail(Violation::AnswerMismatch {
                expected,
                actual: example.answer,
            }));
        }

        if let Some((technique, classify)) = &self.signature {
            if !example.steps.iter().any(|step| classify(step)) {
                checks.push(Validation::fail(Violation::MissingSignature {
                    technique: *technique,
                }));
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Convenience wrapper: `true` when no violation was found.
    pub fn passes(&self, example: &Example) -> bool {
        self.enforce(example).is_success()
    }
}

fn in_bounds(step: Option<usize>, state: i64, max: i64) -> CheckResult {
    if (0..=max).contains(&state) {
        Validation::success(())
    } else {
        Validation::fail(Violation::OutOfBounds { step, state, max })
    }
}

/// Builder for [`ExampleChecks`]
pub struct ExampleChecksBuilder<'a> {
    max_state: Option<i64>,
    only_addition: bool,
    only_subtraction: bool,
    legal_move: Option<MovePredicate<'a>>,
    signature: Option<(RuleKind, SignatureClassifier<'a>)>,
}

impl<'a> ExampleChecksBuilder<'a> {
    pub fn new() -> Self {
        Self {
            max_state: None,
            only_addition: false,
            only_subtraction: false,
            legal_move: None,
            signature: None,
        }
    }

    /// Every visited state must lie in `[0, max]`
    pub fn bounds(mut self, max: i64) -> Self {
        self.max_state = Some(max);
        self
    }

    /// Reject any subtraction
    pub fn only_addition(mut self, enabled: bool) -> Self {
        self.only_addition = enabled;
        self
    }

    /// Reject any addition after the opening step
    pub fn only_subtraction(mut self, enabled: bool) -> Self {
        self.only_subtraction = enabled;
        self
    }

    /// Every non-zero step must satisfy the move predicate
    pub fn legal_moves<F>(mut self, predicate: F) -> Self
    where
        F: Fn(i64, i64) -> bool + Send + Sync + 'a,
    {
        self.legal_move = Some(Box::new(predicate));
        self
    }

    /// At least one step must be classified as a signature step
    pub fn require_signature<F>(mut self, technique: RuleKind, classify: F) -> Self
    where
        F: Fn(&Step) -> bool + Send + Sync + 'a,
    {
        self.signature = Some((technique, Box::new(classify)));
        self
    }

    pub fn build(self) -> ExampleChecks<'a> {
        ExampleChecks {
            max_state: self.max_state,
            only_addition: self.only_addition,
            only_subtraction: self.only_subtraction,
            legal_move: self.legal_move,
            signature: self.signature,
        }
    }
}

impl Default for ExampleChecksBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}
