//! Typed configuration.
//!
//! Raw worksheet settings are validated eagerly and resolved into one
//! immutable [`RuleConfig`] per rule instance.

pub mod error;
pub mod rule;
pub mod settings;

pub use error::ConfigError;
pub use rule::{BeadMode, BlockSettings, RuleConfig, RuleConfigBuilder, MAX_ACTIONS, MAX_DIGIT_COUNT};
pub use settings::{WorksheetSettings, MAX_EXAMPLES};
