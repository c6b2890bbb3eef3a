//! Worksheet assembly: settings in, a batch of examples out.

pub mod selector;
pub mod sheet;

pub use selector::{GenerationPlan, RuleSelector};
pub use sheet::{generate_worksheet, Worksheet};
