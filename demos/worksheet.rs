//! Worksheet Generation
//!
//! This example builds a Brothers worksheet with a Simple filler block and
//! prints every exercise with its answer.
//!
//! Key concepts:
//! - Settings validated before any generation attempt
//! - The most advanced block picks the technique
//! - A seeded RNG makes the worksheet reproducible
//!
//! Run with: cargo run --example worksheet

use beadwork::config::{BlockSettings, WorksheetSettings};
use beadwork::rules::RuleKind;
use beadwork::worksheet::generate_worksheet;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    println!("=== Worksheet Generation Example ===\n");

    let mut settings = WorksheetSettings {
        examples_count: 6,
        actions_count: 5,
        min_actions: Some(3),
        ..WorksheetSettings::default()
    };
    settings
        .blocks
        .insert(RuleKind::Simple, BlockSettings::new([1, 2]));
    settings
        .blocks
        .insert(RuleKind::Brothers, BlockSettings::new([3, 4]));

    let mut rng = StdRng::seed_from_u64(42);
    let sheet = match generate_worksheet(&settings, &mut rng) {
        Ok(sheet) => sheet,
        Err(error) => {
            eprintln!("Invalid settings: {error}");
            return;
        }
    };

    println!("Technique: {}", sheet.technique);
    println!("Worksheet: {}\n", sheet.id);

    for (number, output) in sheet.outputs().iter().enumerate() {
        println!(
            "{:>2}. {} {} = {}",
            number + 1,
            output.start,
            output.steps.join(" "),
            output.answer
        );
    }

    // Invalid settings never reach the generator
    settings.actions_count = 0;
    match generate_worksheet(&settings, &mut rng) {
        Ok(_) => println!("\nUnexpectedly accepted"),
        Err(error) => println!("\nRejected: {error}"),
    }
}
