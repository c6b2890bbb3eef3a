//! Exercises: a start value, ordered steps, and the answer.
//!
//! Examples are values. Generators assemble them step by step, validate them,
//! and hand them off; nothing mutates an example after it is returned.

use super::state::digit_at;
use serde::{Deserialize, Serialize};

/// One action of an exercise together with the states around it.
///
/// `to == from + action` always holds for steps built with [`Step::new`].
///
/// # Example
///
/// ```rust
/// use beadwork::core::Step;
///
/// let step = Step::new(4, 3);
/// assert_eq!(step.to, 7);
/// assert_eq!(step.token(), "+3");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Signed delta applied by the learner
    pub action: i64,
    /// State before the action
    pub from: i64,
    /// State after the action
    pub to: i64,
}

impl Step {
    pub fn new(from: i64, action: i64) -> Self {
        Self {
            action,
            from,
            to: from + action,
        }
    }

    pub fn is_addition(&self) -> bool {
        self.action > 0
    }

    pub fn is_subtraction(&self) -> bool {
        self.action < 0
    }

    pub fn is_consistent(&self) -> bool {
        self.to == self.from + self.action
    }

    /// Display token: `"+N"` or `"-N"`.
    pub fn token(&self) -> String {
        format!("{:+}", self.action)
    }
}

/// A complete exercise.
///
/// Step order is the exercise order. For a well-formed example
/// `answer == start + sum(step.action)` and every step starts where the
/// previous one ended.
///
/// # Example
///
/// ```rust
/// use beadwork::core::Example;
///
/// let example = Example::new(0).record(3).record(-1);
/// assert_eq!(example.answer, 2);
/// assert_eq!(example.path(), vec![0, 3, 2]);
/// assert!(example.is_consistent());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub start: i64,
    pub steps: Vec<Step>,
    pub answer: i64,
}

impl Example {
    /// An empty exercise sitting at `start`.
    pub fn new(start: i64) -> Self {
        Self {
            start,
            steps: Vec::new(),
            answer: start,
        }
    }

    /// Build an exercise by applying `actions` in order from `start`.
    pub fn from_actions<I>(start: i64, actions: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let mut example = Self::new(start);
        for action in actions {
            example.push(action);
        }
        example
    }

    /// The hard-coded exercise returned when generation runs out of attempts.
    ///
    /// Additions only, and every state fits a four-bead column.
    pub fn fallback() -> Self {
        Self::from_actions(0, [1, 1, 1])
    }

    /// Record one more action, returning a new example.
    ///
    /// The original example is left unchanged.
    pub fn record(&self, action: i64) -> Self {
        let mut next = self.clone();
        next.push(action);
        next
    }

    pub(crate) fn push(&mut self, action: i64) {
        let step = Step::new(self.answer, action);
        self.answer = step.to;
        self.steps.push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn actions(&self) -> impl Iterator<Item = i64> + '_ {
        self.steps.iter().map(|step| step.action)
    }

    /// States visited: the start, then the `to` state of every step.
    pub fn path(&self) -> Vec<i64> {
        std::iter::once(self.start)
            .chain(self.steps.iter().map(|step| step.to))
            .collect()
    }

    /// Whether the steps chain from `start` and add up to `answer`.
    pub fn is_consistent(&self) -> bool {
        let mut current = self.start;
        for step in &self.steps {
            if step.from != current || !step.is_consistent() {
                return false;
            }
            current = step.to;
        }
        current == self.answer && self.answer == self.start + self.actions().sum::<i64>()
    }

    /// Keep at most `max_len` steps. The answer becomes the running total at
    /// the cut.
    pub fn truncated(mut self, max_len: usize) -> Self {
        if self.steps.len() > max_len {
            self.steps.truncate(max_len);
            self.answer = self.steps.last().map_or(self.start, |step| step.to);
        }
        self
    }

    /// The same exercise as seen on a single column of the device.
    ///
    /// Each step's action becomes the change of that column's digit. Only
    /// meaningful for exercises whose columns never carry into each other.
    pub fn column(&self, column: usize) -> Self {
        let steps = self
            .steps
            .iter()
            .map(|step| {
                let from = digit_at(step.from, column);
                let to = digit_at(step.to, column);
                Step {
                    action: to - from,
                    from,
                    to,
                }
            })
            .collect();

        Self {
            start: digit_at(self.start, column),
            steps,
            answer: digit_at(self.answer, column),
        }
    }

    /// Shape handed to the formatting layer.
    pub fn output(&self) -> ExampleOutput {
        ExampleOutput {
            start: self.start,
            steps: self.steps.iter().map(Step::token).collect(),
            answer: self.answer,
        }
    }
}

/// Exercise as consumed by worksheet formatting: tokens instead of steps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleOutput {
    pub start: i64,
    pub steps: Vec<String>,
    pub answer: i64,
}
