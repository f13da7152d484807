// tests/context_disambiguation.rs
//
// Contextual bias analyzer through the public API: neutral vs. loaded use of
// the same identity term, slur handling, ranking and idempotence.

use biaslens::context::{BiasLevel, ContextSettings, Direction};
use biaslens::terms::{BiasCategory, TermPattern};
use biaslens::{analyze_text, ContextualBiasAnalyzer};

#[test]
fn neutral_cultural_reference_is_not_flagged() {
    assert!(analyze_text("The Yoruba culture is interesting.").is_empty());
    assert!(analyze_text("The Igbo language has many dialects.").is_empty());
}

#[test]
fn loaded_reference_is_high_confidence_ethnic_bias() {
    let dets = analyze_text("Yoruba domination must end, greedy Yoruba.");
    let top = dets.first().expect("one detection");
    assert_eq!(top.term, "yoruba");
    assert_eq!(top.category, BiasCategory::Ethnic);
    assert_eq!(top.bias_level, BiasLevel::High);
    assert!(top.confidence >= 0.7);
    assert_eq!(top.direction, Direction::Negative);
    assert_eq!(top.target(), "Yoruba");
}

#[test]
fn slurs_ignore_surrounding_words() {
    for text in [
        "I said nyamiri in passing.",
        "What a lovely wonderful day, nyamiri.",
        "nyamiri",
    ] {
        let dets = analyze_text(text);
        let d = dets
            .iter()
            .find(|d| d.term == "nyamiri")
            .unwrap_or_else(|| panic!("no slur detection for {text:?}"));
        assert_eq!(d.bias_level, BiasLevel::High);
        assert!((d.confidence - 0.95).abs() < 1e-9);
    }
}

#[test]
fn repeated_calls_are_identical() {
    let text = "Aboki traders and greedy Igbo merchants, Yoruba domination everywhere.";
    let a = analyze_text(text);
    let b = analyze_text(text);
    assert_eq!(a, b);
    for w in a.windows(2) {
        assert!(w[0].confidence >= w[1].confidence);
    }
}

#[test]
fn custom_terms_from_config_are_matched() {
    let extra = vec![TermPattern::new(
        "Ogoni",
        BiasCategory::Ethnic,
        &["ogoni people"],
        &["ogoni saboteurs"],
    )];
    let analyzer = ContextualBiasAnalyzer::new(ContextSettings::default(), extra);

    let dets = analyzer.analyze_text("Those ogoni saboteurs again.");
    assert!(dets.iter().any(|d| d.term == "ogoni" && d.bias_level == BiasLevel::High));
    assert!(analyzer.analyze_text("The Ogoni people held a festival.").is_empty());
}
