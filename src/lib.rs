//! Beadwork: constrained exercise generation for bead counting devices
//!
//! Beadwork produces abacus drills: chains of additions and subtractions in
//! which every intermediate value can be shown on the device, every step is a
//! legal bead move for the technique being trained, and at least one step
//! actually exercises that technique.
//!
//! # Core Concepts
//!
//! - **Rules**: one per technique (Simple, Brothers, Friends, Mix), each a
//!   transition model over device states
//! - **Generators**: bounded generate-and-validate loops that always return a
//!   well-formed example
//! - **Validation**: every check runs in one pass and reports all violations
//!
//! # Example
//!
//! ```rust
//! use beadwork::config::RuleConfig;
//! use beadwork::generator::SequenceGenerator;
//! use beadwork::rules::{RuleKind, Technique};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let config = RuleConfig::builder(RuleKind::Brothers)
//!     .digits([3, 4])
//!     .steps(3, 5)
//!     .build()
//!     .unwrap();
//! let generator = SequenceGenerator::new(Technique::new(config).unwrap());
//!
//! let example = generator.generate(&mut StdRng::seed_from_u64(7));
//! assert_eq!(example.answer, example.start + example.actions().sum::<i64>());
//! assert!(example.path().iter().all(|state| (0..=9).contains(state)));
//! println!("{:?}", example.output());
//! ```

pub mod config;
pub mod core;
pub mod generator;
pub mod rules;
pub mod validation;
pub mod worksheet;

// Re-export commonly used types
pub use config::{ConfigError, RuleConfig, WorksheetSettings};
pub use core::{Example, ExampleOutput, Step};
pub use generator::{ComposerConfig, MultiDigitComposer, SequenceGenerator};
pub use rules::{Rule, RuleKind, Technique};
pub use validation::Violation;
pub use worksheet::{generate_worksheet, Worksheet};
