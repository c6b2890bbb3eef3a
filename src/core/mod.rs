//! Core data model of the exercise generator.
//!
//! This module contains the pure building blocks:
//! - Device state for one or more columns
//! - The bead model deciding which single-column moves are direct
//! - Steps and examples, the values every generator produces
//!
//! Nothing in here touches randomness.

pub mod bead;
mod example;
mod state;

pub use example::{Example, ExampleOutput, Step};
pub use state::{
    digit_at, pow10, tens, units, ColumnState, COLUMN_MAX, MAX_DEVICE_COLUMNS, TWO_COLUMN_MAX,
};
