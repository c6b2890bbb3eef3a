//! Validation of assembled examples.
//!
//! Every check an example is subject to runs in a single pass and all
//! violations are accumulated with Stillwater's `Validation` type, so a
//! rejected example reports everything that is wrong with it, not just the
//! first problem.
//!
//! # Example
//!
//! ```rust
//! use beadwork::core::Example;
//! use beadwork::validation::ExampleChecks;
//!
//! let checks = ExampleChecks::builder()
//!     .bounds(9)
//!     .only_addition(true)
//!     .build();
//!
//! assert!(checks.passes(&Example::from_actions(0, [4, 5])));
//! assert!(!checks.passes(&Example::from_actions(0, [4, -1])));
//! ```

pub mod checks;
pub mod violations;

pub use checks::{CheckResult, ExampleChecks, ExampleChecksBuilder};
pub use violations::Violation;
