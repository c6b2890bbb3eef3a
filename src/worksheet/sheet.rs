//! A batch of generated examples.

use crate::config::{ConfigError, WorksheetSettings};
use crate::core::{Example, ExampleOutput};
use crate::rules::{Rule, RuleKind};
use crate::worksheet::selector::RuleSelector;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Examples produced for one generation request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Worksheet {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub technique: RuleKind,
    pub examples: Vec<Example>,
    /// Examples that are the fallback because the attempt budget ran out
    pub fallbacks: usize,
}

impl Worksheet {
    /// Presentation form of every example, in order.
    pub fn outputs(&self) -> Vec<ExampleOutput> {
        self.examples.iter().map(Example::output).collect()
    }

    /// Answer key, in order.
    pub fn answers(&self) -> Vec<i64> {
        self.examples.iter().map(|example| example.answer).collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Validate `settings` and generate `examples_count` examples.
///
/// Invalid settings are reported before any generation attempt. Generation
/// itself cannot fail.
///
/// # Example
///
/// ```rust
/// use beadwork::config::{BlockSettings, WorksheetSettings};
/// use beadwork::worksheet::generate_worksheet;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut settings = WorksheetSettings::default();
/// settings.examples_count = 5;
/// settings.blocks.insert(beadwork::rules::RuleKind::Simple, BlockSettings::new([1, 2, 3]));
///
/// let sheet = generate_worksheet(&settings, &mut StdRng::seed_from_u64(3)).unwrap();
/// assert_eq!(sheet.examples.len(), 5);
/// assert!(sheet.examples.iter().all(|example| example.is_consistent()));
/// ```
pub fn generate_worksheet<G: Rng + ?Sized>(
    settings: &WorksheetSettings,
    rng: &mut G,
) -> Result<Worksheet, ConfigError> {
    let plan = RuleSelector::new().select(settings)?;
    let technique = plan.rule().kind();

    let mut fallbacks = 0;
    let examples = (0..settings.examples_count)
        .map(|_| {
            let generated = plan.generate_report(rng);
            if generated.used_fallback {
                fallbacks += 1;
            }
            generated.example
        })
        .collect();

    let sheet = Worksheet {
        id: Uuid::new_v4(),
        generated_at: Utc::now(),
        technique,
        examples,
        fallbacks,
    };

    info!(
        id = %sheet.id,
        %technique,
        examples = sheet.examples.len(),
        fallbacks,
        "Worksheet generated"
    );
    Ok(sheet)
}
