//! Mapping of worksheet settings to a concrete generator.

use crate::config::{ConfigError, RuleConfig, WorksheetSettings};
use crate::core::Example;
use crate::generator::{ComposerConfig, Generated, MultiDigitComposer, SequenceGenerator};
use crate::rules::{Rule, RuleKind, Technique};
use rand::Rng;
use tracing::debug;

/// Generator chosen for a worksheet.
#[derive(Clone, Debug)]
pub enum GenerationPlan {
    /// One rule driven directly, on one column or several
    Sequence(SequenceGenerator<Technique>),
    /// A carrying rule producing whole numbers wider than its native state
    Composed(MultiDigitComposer<Technique>),
}

impl GenerationPlan {
    pub fn rule(&self) -> &Technique {
        match self {
            Self::Sequence(generator) => generator.rule(),
            Self::Composed(composer) => composer.rule(),
        }
    }

    pub fn generate<G: Rng + ?Sized>(&self, rng: &mut G) -> Example {
        self.generate_report(rng).example
    }

    pub fn generate_report<G: Rng + ?Sized>(&self, rng: &mut G) -> Generated {
        match self {
            Self::Sequence(generator) => generator.generate_report(rng),
            Self::Composed(composer) => composer.generate_report(rng),
        }
    }
}

/// Turns validated worksheet settings into a [`GenerationPlan`].
///
/// The most advanced selected block is the technique being trained; the
/// other blocks contribute filler digits.
#[derive(Clone, Copy, Debug, Default)]
pub struct RuleSelector;

impl RuleSelector {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the rule configuration for `settings`.
    pub fn rule_config(&self, settings: &WorksheetSettings) -> Result<RuleConfig, ConfigError> {
        settings.validate()?;

        let (technique, block) = settings
            .blocks
            .iter()
            .next_back()
            .ok_or(ConfigError::NoBlockSelected)?;
        let technique = *technique;
        let (min_steps, max_steps) = settings.step_range();

        let builder = RuleConfig::builder(technique)
            .digits(block.digits.iter().copied())
            .only_addition(block.only_addition)
            .only_subtraction(block.only_subtraction)
            .steps(min_steps, max_steps)
            .digit_count(settings.digit_count)
            .combine_levels(settings.combine_levels);

        settings
            .blocks
            .iter()
            .filter(|(kind, _)| **kind != technique)
            .fold(builder, |builder, (kind, block)| builder.block(*kind, block.clone()))
            .build()
    }

    /// Pick the generator for `settings`.
    pub fn select(&self, settings: &WorksheetSettings) -> Result<GenerationPlan, ConfigError> {
        let config = self.rule_config(settings)?;
        let technique = config.technique();
        let digit_count = config.digit_count();
        let rule = Technique::new(config)?;

        let plan = match technique {
            RuleKind::Friends | RuleKind::Mix if digit_count > technique.columns() => {
                let composer = ComposerConfig {
                    variable_length: settings.variable_length,
                    ..ComposerConfig::new(digit_count - 1)
                };
                GenerationPlan::Composed(MultiDigitComposer::new(rule, composer)?)
            }
            _ => GenerationPlan::Sequence(SequenceGenerator::new(rule)),
        };

        debug!(
            %technique,
            digit_count,
            composed = matches!(plan, GenerationPlan::Composed(_)),
            "Generation plan selected"
        );
        Ok(plan)
    }
}
