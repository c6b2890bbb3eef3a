//! End-to-end generation scenarios.

use beadwork::config::{BlockSettings, RuleConfig, WorksheetSettings};
use beadwork::core::Example;
use beadwork::generator::{ComposerConfig, MultiDigitComposer, SequenceGenerator};
use beadwork::rules::{Rule, RuleKind, Technique};
use beadwork::worksheet::generate_worksheet;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn technique(kind: RuleKind, digits: &[i64]) -> Technique {
    let config = RuleConfig::builder(kind)
        .digits(digits.iter().copied())
        .build()
        .unwrap();
    Technique::new(config).unwrap()
}

#[test]
fn simple_examples_have_fixed_length_on_four_beads() {
    let config = RuleConfig::builder(RuleKind::Simple)
        .digits([1, 2, 3, 4])
        .steps(3, 3)
        .build()
        .unwrap();
    let generator = SequenceGenerator::new(Technique::new(config).unwrap());
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..50 {
        let generated = generator.generate_report(&mut rng);
        assert!(!generated.used_fallback);

        let example = generated.example;
        assert_eq!(example.len(), 3);
        assert_eq!(example.start, 0);
        assert!(example.path().iter().all(|state| (0..=4).contains(state)));
    }
}

#[test]
fn friend_transitions_cross_the_tens_boundary() {
    let rule = technique(RuleKind::Friends, &[9]);

    assert!(rule.is_signature(13, 9));
    assert_eq!(rule.apply_action(13, 9), 22);
    assert_eq!(rule.decompose_action(13, 9), vec![10, -1]);

    assert!(rule.is_signature(5, 9));
    assert_eq!(rule.apply_action(5, 9), 14);

    assert!(!rule.is_signature(10, 9));
    assert!(!rule.is_signature(95, 9));
}

#[test]
fn brother_four_decomposes_into_five_and_one() {
    let rule = technique(RuleKind::Brothers, &[4]);
    let mut signatures = 0;

    for from in 0..=9 {
        for action in [4, -4] {
            if rule.is_signature(from, action) {
                signatures += 1;
                let parts = rule.decompose_action(from, action);
                assert_eq!(parts.len(), 2);
                assert_eq!(parts[0].abs(), 5);
                assert_eq!(parts[1], -parts[0].signum());
                assert_eq!(parts.iter().sum::<i64>(), action);
            }
        }
    }
    assert!(signatures > 0);
}

#[test]
fn composed_numbers_limit_zero_digits() {
    let config = RuleConfig::builder(RuleKind::Friends)
        .digits([1, 9])
        .steps(5, 5)
        .digit_count(3)
        .build()
        .unwrap();
    let composer =
        MultiDigitComposer::new(Technique::new(config).unwrap(), ComposerConfig::new(2)).unwrap();
    let mut rng = StdRng::seed_from_u64(77);

    for _ in 0..50 {
        let example = composer.generate(&mut rng);
        let mut zeros = 0;
        for action in example.actions() {
            let text = action.abs().to_string();
            assert!(!text.starts_with('0'));
            zeros += text.chars().filter(|c| *c == '0').count();
        }
        assert!(zeros <= composer.config().max_zero_digits);
    }
}

#[test]
fn contradictory_flags_fall_back_without_failing() {
    let config = RuleConfig::builder(RuleKind::Brothers)
        .digits([4])
        .steps(2, 4)
        .only_addition(true)
        .only_subtraction(true)
        .build()
        .unwrap();
    let generator = SequenceGenerator::new(Technique::new(config).unwrap());

    let generated = generator.generate_report(&mut StdRng::seed_from_u64(0));
    assert!(generated.used_fallback);
    assert_eq!(generated.attempts, 100);
    assert_eq!(generated.example, Example::fallback());
}

#[test]
fn fallback_honours_only_addition() {
    // A single brother step cannot open an exercise, so every attempt fails.
    let config = RuleConfig::builder(RuleKind::Brothers)
        .digits([4])
        .steps(1, 1)
        .only_addition(true)
        .build()
        .unwrap();
    let generator = SequenceGenerator::new(Technique::new(config).unwrap());

    let generated = generator.generate_report(&mut StdRng::seed_from_u64(1));
    assert!(generated.used_fallback);
    assert!(generated.example.actions().all(|action| action >= 0));
}

#[test]
fn mixed_worksheet_uses_the_most_advanced_block() {
    let mut settings = WorksheetSettings {
        examples_count: 8,
        actions_count: 5,
        min_actions: Some(3),
        digit_count: 2,
        ..WorksheetSettings::default()
    };
    settings.blocks.insert(RuleKind::Brothers, BlockSettings::new([3, 4]));
    settings.blocks.insert(RuleKind::Friends, BlockSettings::new([8, 9]));

    let sheet = generate_worksheet(&settings, &mut StdRng::seed_from_u64(11)).unwrap();
    assert_eq!(sheet.technique, RuleKind::Friends);
    assert_eq!(sheet.examples.len(), 8);
    for example in &sheet.examples {
        assert!(example.is_consistent());
        assert!(example.len() <= 5);
        assert!(example.path().iter().all(|state| (0..=99).contains(state)));
    }
}
