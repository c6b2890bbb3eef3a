//! Behaviour shared by every technique.
//!
//! Each rule owns a [`RuleCore`] and delegates the parts that do not depend
//! on the technique to it: step counts, sign policy, collecting weighted
//! candidate actions, and assembling validation checks per scope.

use crate::config::RuleConfig;
use crate::core::{digit_at, pow10, Step, MAX_DEVICE_COLUMNS};
use crate::rules::actions::ActionSet;
use crate::rules::table::TransitionTable;
use crate::rules::CheckScope;
use crate::validation::ExampleChecks;
use rand::Rng;

#[derive(Clone, Debug)]
pub struct RuleCore {
    config: RuleConfig,
    max_state: i64,
    table: TransitionTable,
}

impl RuleCore {
    pub fn new(config: RuleConfig, max_state: i64, table: TransitionTable) -> Self {
        Self {
            config,
            max_state,
            table,
        }
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    pub fn max_state(&self) -> i64 {
        self.max_state
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Uniform in `[min_steps, max_steps]`.
    pub fn steps_count<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(self.config.min_steps()..=self.config.max_steps())
    }

    /// Additions are always allowed to open an exercise.
    pub fn allows_addition(&self, is_first: bool) -> bool {
        is_first || !self.config.only_subtraction()
    }

    /// Nothing is taken from a cleared device or as the opening move.
    pub fn allows_subtraction(&self, state: i64, is_first: bool) -> bool {
        !is_first && state != 0 && !self.config.only_addition()
    }

    /// Collect the legal actions from `state`.
    ///
    /// Candidates are the technique and filler digits with every allowed
    /// sign. Moves found in the transition table are signature moves and get
    /// the configured weight; other moves are kept with weight 1 when
    /// `filler` accepts them.
    pub fn collect_actions<F>(&self, state: i64, is_first: bool, filler: F) -> ActionSet
    where
        F: Fn(i64, i64) -> bool,
    {
        let mut actions = ActionSet::new();
        let add = self.allows_addition(is_first);
        let subtract = self.allows_subtraction(state, is_first);

        for digit in self.config.filler_digits() {
            let deltas = [(add, digit), (subtract, -digit)];
            for delta in deltas.into_iter().filter(|(allowed, _)| *allowed).map(|(_, d)| d) {
                let to = state + delta;
                if !(0..=self.max_state).contains(&to) {
                    continue;
                }

                if self.table.contains_move(state, delta) {
                    actions.offer(delta, self.config.signature_weight(), true);
                } else if filler(state, delta) {
                    actions.offer(delta, 1, false);
                }
            }
        }

        actions
    }

    /// Signature test for a whole-number step.
    ///
    /// Every non-zero digit of the action is checked against the window of
    /// the device it lands on (one column wide for single-column techniques,
    /// two for techniques that carry). Carries from lower columns are not
    /// simulated.
    pub fn is_composed_signature(&self, step: &Step) -> bool {
        let width = self.config.technique().columns();
        let magnitude = step.action.abs();
        let sign = step.action.signum();

        (0..MAX_DEVICE_COLUMNS).any(|column| {
            let digit = digit_at(magnitude, column);
            if digit == 0 {
                return false;
            }
            let local = (step.from / pow10(column)).rem_euclid(pow10(width));
            self.table.contains_move(local, sign * digit)
        })
    }

    /// Checks for `scope`. `legal` decides whether a native move can be made.
    pub fn checks<'a, F>(&'a self, scope: CheckScope, legal: F) -> ExampleChecks<'a>
    where
        F: Fn(i64, i64) -> bool + Send + Sync + 'a,
    {
        let technique = self.config.technique();
        let builder = ExampleChecks::builder()
            .only_addition(self.config.only_addition())
            .only_subtraction(self.config.only_subtraction());

        match scope {
            CheckScope::Native => {
                let builder = builder.bounds(self.max_state).legal_moves(legal);
                if technique.has_signature() {
                    builder
                        .require_signature(technique, move |step: &Step| {
                            self.table.contains(step.from, step.to)
                        })
                        .build()
                } else {
                    builder.build()
                }
            }
            CheckScope::Column => builder.bounds(self.max_state).legal_moves(legal).build(),
            CheckScope::Composed { max } => {
                let builder = builder.bounds(max);
                if technique.has_signature() {
                    builder
                        .require_signature(technique, move |step: &Step| {
                            self.is_composed_signature(step)
                        })
                        .build()
                } else {
                    builder.build()
                }
            }
        }
    }
}
