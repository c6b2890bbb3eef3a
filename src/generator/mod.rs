//! Example generation.
//!
//! Both generators run a bounded generate-and-validate loop: assemble a
//! candidate, validate it against the rule, retry on failure, and fall back to
//! a fixed well-formed example when the [`AttemptBudget`] is spent.
//! Randomness is always injected as `&mut impl Rng`, so a seeded RNG gives
//! reproducible worksheets.

pub mod budget;
pub mod composer;
pub mod error;
pub mod sequence;

pub use budget::{AttemptBudget, Generated};
pub use composer::{ComposerConfig, MultiDigitComposer, ZeroTally};
pub use error::AttemptError;
pub use sequence::{ColumnMode, SequenceGenerator};
