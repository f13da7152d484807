// src/lexicon.rs
//! Tiered sentiment lexicon and the tokenizer shared by the context analyzer
//! and the lexicon-backed classifier stand-ins.
//!
//! Tiers carry signed weights: mild ±0.3, moderate ±0.6, strong ±1.0.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;

pub const MILD: f64 = 0.3;
pub const MODERATE: f64 = 0.6;
pub const STRONG: f64 = 1.0;

#[derive(Debug, Deserialize)]
struct TierFile {
    strong_negative: Vec<String>,
    moderate_negative: Vec<String>,
    mild_negative: Vec<String>,
    mild_positive: Vec<String>,
    moderate_positive: Vec<String>,
    strong_positive: Vec<String>,
}

static LEXICON: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    let raw = include_str!("../sentiment_lexicon.json");
    let tiers: TierFile = serde_json::from_str(raw).expect("valid sentiment lexicon");
    let mut map = HashMap::new();
    for (words, weight) in [
        (tiers.strong_negative, -STRONG),
        (tiers.moderate_negative, -MODERATE),
        (tiers.mild_negative, -MILD),
        (tiers.mild_positive, MILD),
        (tiers.moderate_positive, MODERATE),
        (tiers.strong_positive, STRONG),
    ] {
        for w in words {
            map.insert(w.to_lowercase(), weight);
        }
    }
    map
});

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?u)\b\w+\b").expect("tokenizer regex"));

/// Signed lexicon weight for a lowercase word, if it carries sentiment.
#[inline]
pub fn word_weight(word: &str) -> Option<f64> {
    LEXICON.get(word).copied()
}

/// A single token with byte span and sequential index.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    /// Lowercased `text`.
    pub norm: String,
    pub start: usize,
    pub end: usize,
    pub index: usize,
}

/// Unicode-friendly word tokenizer.
pub fn tokenize(input: &str) -> Vec<Token> {
    TOKEN_RE
        .find_iter(input)
        .enumerate()
        .map(|(i, m)| Token {
            text: m.as_str().to_string(),
            norm: m.as_str().to_lowercase(),
            start: m.start(),
            end: m.end(),
            index: i,
        })
        .collect()
}

/// Byte position → token index lookup (length = text.len()+1).
/// Bytes between tokens map to the following token.
pub fn byte_to_token(text_len: usize, tokens: &[Token]) -> Vec<Option<usize>> {
    let mut map = vec![None; text_len + 1];
    for t in tokens {
        for slot in map.iter_mut().take(t.end).skip(t.start) {
            *slot = Some(t.index);
        }
    }
    // Backfill gaps (punctuation, whitespace) from the next token.
    let mut next = None;
    for slot in map.iter_mut().rev() {
        if let Some(idx) = *slot {
            next = Some(idx);
        } else {
            *slot = next;
        }
    }
    map
}

/// Small negator set. "n't" contractions tokenize to a trailing "t".
fn is_negator(tok: &str) -> bool {
    matches!(tok, "not" | "no" | "never" | "nor" | "cannot" | "without" | "t")
}

/// Whole-text lexicon score with negation: a negator in the previous 1..=3
/// tokens flips the sign of a hit. Returns `(score, hits, token_count)`.
pub fn score_text(text: &str) -> (f64, usize, usize) {
    let tokens = tokenize(text);
    let mut score = 0.0;
    let mut hits = 0;

    for i in 0..tokens.len() {
        let Some(base) = word_weight(&tokens[i].norm) else {
            continue;
        };
        let negated = (1..=3).any(|k| i >= k && is_negator(&tokens[i - k].norm));
        score += if negated { -base } else { base };
        hits += 1;
    }

    (score, hits, tokens.len())
}
