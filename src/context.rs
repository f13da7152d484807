// src/context.rs
//! Contextual bias analyzer: finds loaded political / ethnic / religious /
//! regional terms and decides, from the words around them, whether a mention
//! is neutral or biased.
//!
//! Per term the checks run in a fixed order:
//! slur → neutral-phrase override → biased-phrase override → windowed scoring.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::lexicon::{byte_to_token, tokenize, word_weight, Token};
use crate::terms::{builtin_terms, BiasCategory, TermPattern};

pub const DEFAULT_GENERAL_WINDOW: usize = 8;
pub const DEFAULT_NEUTRAL_WINDOW: usize = 10;

const SLUR_CONFIDENCE: f64 = 0.95;
const BIASED_PHRASE_CONFIDENCE: f64 = 0.9;
const NEUTRAL_PHRASE_LOW_CONFIDENCE: f64 = 0.4;
const GENERAL_CONFIDENCE_CAP: f64 = 0.85;
const DIRECTION_EPSILON: f64 = 0.1;

/// Political acronyms rendered uppercase in bias-type labels.
const ACRONYMS: &[&str] = &["apc", "pdp", "nnpp", "apga", "adc", "sdp", "ipob"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiasLevel {
    Low,
    Medium,
    High,
}

impl BiasLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Positive,
    Negative,
    Neutral,
}

impl Direction {
    fn from_score(score: f64) -> Self {
        if score < -DIRECTION_EPSILON {
            Self::Negative
        } else if score > DIRECTION_EPSILON {
            Self::Positive
        } else {
            Self::Neutral
        }
    }
}

/// One matched term and the verdict on how it was used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasDetection {
    pub term: String,
    pub category: BiasCategory,
    pub bias_level: BiasLevel,
    /// In [0,1].
    pub confidence: f64,
    pub direction: Direction,
    pub context: String,
    pub explanation: String,
}

impl BiasDetection {
    /// Human label such as "Anti-Yoruba ethnic bias" or "Pro-APC political bias".
    pub fn bias_type_label(&self) -> String {
        let target = display_term(&self.term);
        let cat = self.category.as_str();
        match self.direction {
            Direction::Negative => format!("Anti-{target} {cat} bias"),
            Direction::Positive => format!("Pro-{target} {cat} bias"),
            Direction::Neutral => format!("{target} {cat} bias"),
        }
    }

    /// Capitalised target, e.g. "Yoruba", "APC".
    pub fn target(&self) -> String {
        display_term(&self.term)
    }
}

fn display_term(term: &str) -> String {
    if ACRONYMS.contains(&term) {
        return term.to_uppercase();
    }
    term.split_whitespace()
        .map(|w| {
            let mut cs = w.chars();
            match cs.next() {
                Some(first) => first.to_uppercase().chain(cs).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Window sizes and thresholds for the context checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextSettings {
    /// ±tokens for general windowed scoring.
    pub general_window: usize,
    /// ±tokens when re-checking a neutral-phrase hit.
    pub neutral_window: usize,
    /// Below this magnitude a neutral-phrase hit is treated as neutral.
    pub neutral_threshold: f64,
    /// Up to this magnitude a neutral-phrase hit yields a low detection.
    pub neutral_upper: f64,
    pub high_threshold: f64,
    pub medium_threshold: f64,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            general_window: DEFAULT_GENERAL_WINDOW,
            neutral_window: DEFAULT_NEUTRAL_WINDOW,
            neutral_threshold: 0.3,
            neutral_upper: 0.6,
            high_threshold: 0.7,
            medium_threshold: 0.4,
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledTerm {
    pattern: TermPattern,
    re: Regex,
    /// Token count of the term itself ("labour party" → 2).
    token_len: usize,
}

/// Windowed sentiment around one term occurrence.
#[derive(Debug, Clone, Copy, PartialEq)]
struct WindowScore {
    score: f64,
    lo: usize,
    hi: usize,
}

#[derive(Debug, Clone)]
pub struct ContextualBiasAnalyzer {
    terms: Vec<CompiledTerm>,
    settings: ContextSettings,
}

impl Default for ContextualBiasAnalyzer {
    fn default() -> Self {
        Self::new(ContextSettings::default(), Vec::new())
    }
}

static DEFAULT_ANALYZER: Lazy<ContextualBiasAnalyzer> = Lazy::new(ContextualBiasAnalyzer::default);

/// Runs the built-in analyzer with default settings.
pub fn analyze_text(text: &str) -> Vec<BiasDetection> {
    DEFAULT_ANALYZER.analyze_text(text)
}

impl ContextualBiasAnalyzer {
    /// Built-in tables plus `extra` entries, grouped by category.
    pub fn new(settings: ContextSettings, extra: Vec<TermPattern>) -> Self {
        let mut patterns = builtin_terms();
        patterns.extend(extra.into_iter().map(TermPattern::normalized));
        // Stable: built-ins stay ahead of extras within a category.
        patterns.sort_by_key(|p| p.category);

        let terms = patterns
            .into_iter()
            .filter(|p| !p.term.is_empty())
            .filter_map(|p| {
                let src = format!(r"(?i)\b{}\b", regex::escape(&p.term));
                match Regex::new(&src) {
                    Ok(re) => Some(CompiledTerm {
                        token_len: tokenize(&p.term).len().max(1),
                        pattern: p,
                        re,
                    }),
                    Err(e) => {
                        warn!(target: "context", term = %p.term, error = %e, "skipping term");
                        None
                    }
                }
            })
            .collect();

        Self { terms, settings }
    }

    pub fn settings(&self) -> &ContextSettings {
        &self.settings
    }

    /// Ranked, deduplicated detections for `text`.
    pub fn analyze_text(&self, text: &str) -> Vec<BiasDetection> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let lowered = text.to_lowercase();
        let tokens = tokenize(text);
        let byte_map = byte_to_token(text.len(), &tokens);

        let mut out = Vec::new();
        for ct in &self.terms {
            let Some(m) = ct.re.find(text) else {
                continue;
            };
            let Some(idx) = byte_map.get(m.start()).copied().flatten() else {
                continue;
            };
            if let Some(det) = self.classify(ct, text, &lowered, &tokens, idx) {
                out.push(det);
            }
        }

        let ranked = rank(out);
        debug!(target: "context", detections = ranked.len(), tokens = tokens.len(), "context analysis");
        ranked
    }

    fn classify(
        &self,
        ct: &CompiledTerm,
        text: &str,
        lowered: &str,
        tokens: &[Token],
        idx: usize,
    ) -> Option<BiasDetection> {
        let p = &ct.pattern;
        let detection = |level, confidence, direction, ws: WindowScore, explanation: String| BiasDetection {
            term: p.term.clone(),
            category: p.category,
            bias_level: level,
            confidence,
            direction,
            context: window_text(text, tokens, ws.lo, ws.hi),
            explanation,
        };

        if !p.requires_context {
            let ws = window_score(tokens, idx, ct.token_len, self.settings.general_window);
            return Some(detection(
                BiasLevel::High,
                SLUR_CONFIDENCE,
                Direction::Negative,
                ws,
                format!("'{}' is a derogatory {} term", p.term, p.category.as_str()),
            ));
        }

        if p.neutral_contexts.iter().any(|c| lowered.contains(c.as_str())) {
            let ws = window_score(tokens, idx, ct.token_len, self.settings.neutral_window);
            let magnitude = ws.score.abs();
            if magnitude < self.settings.neutral_threshold {
                return None;
            }
            if magnitude <= self.settings.neutral_upper {
                return Some(detection(
                    BiasLevel::Low,
                    NEUTRAL_PHRASE_LOW_CONFIDENCE,
                    Direction::from_score(ws.score),
                    ws,
                    format!(
                        "'{}' appears in a neutral context but with loaded wording nearby (score {:.2})",
                        p.term, ws.score
                    ),
                ));
            }
        }

        if let Some(phrase) = p.biased_contexts.iter().find(|c| lowered.contains(c.as_str())) {
            let ws = window_score(tokens, idx, ct.token_len, self.settings.general_window);
            return Some(detection(
                BiasLevel::High,
                BIASED_PHRASE_CONFIDENCE,
                Direction::Negative,
                ws,
                format!("'{}' used in a biased construction: '{}'", p.term, phrase),
            ));
        }

        let ws = window_score(tokens, idx, ct.token_len, self.settings.general_window);
        let magnitude = ws.score.abs();
        let level = if magnitude >= self.settings.high_threshold {
            BiasLevel::High
        } else if magnitude >= self.settings.medium_threshold {
            BiasLevel::Medium
        } else {
            return None;
        };
        let direction = Direction::from_score(ws.score);
        let tone = match direction {
            Direction::Negative => "negative",
            Direction::Positive => "positive",
            Direction::Neutral => "loaded",
        };
        Some(detection(
            level,
            magnitude.min(GENERAL_CONFIDENCE_CAP),
            direction,
            ws,
            format!(
                "Strongly {} language within {} words of '{}' (score {:.2})",
                tone, self.settings.general_window, p.term, ws.score
            ),
        ))
    }
}

/// Sum of distance-weighted lexicon hits in ±`n` tokens around the term,
/// divided by the number of window tokens (term excluded).
fn window_score(tokens: &[Token], idx: usize, term_len: usize, n: usize) -> WindowScore {
    let term_end = (idx + term_len).min(tokens.len());
    let lo = idx.saturating_sub(n);
    let hi = (term_end + n).min(tokens.len());

    let mut sum = 0.0;
    let mut count = 0usize;
    for (j, tok) in tokens.iter().enumerate().take(hi).skip(lo) {
        if j >= idx && j < term_end {
            continue;
        }
        count += 1;
        let Some(weight) = word_weight(&tok.norm) else {
            continue;
        };
        let distance = if j < idx { idx - j } else { j + 1 - term_end };
        sum += weight * (1.0 - 0.15 * distance as f64).max(0.1);
    }

    let score = if count == 0 { 0.0 } else { sum / count as f64 };
    WindowScore { score, lo, hi }
}

fn window_text(text: &str, tokens: &[Token], lo: usize, hi: usize) -> String {
    match (tokens.get(lo), hi.checked_sub(1).and_then(|h| tokens.get(h))) {
        (Some(first), Some(last)) if first.start <= last.end => text[first.start..last.end].to_string(),
        _ => String::new(),
    }
}

/// Dedupe by (term, category) keeping the first, then stable sort by confidence.
fn rank(detections: Vec<BiasDetection>) -> Vec<BiasDetection> {
    let mut seen = HashSet::new();
    let mut out: Vec<BiasDetection> = detections
        .into_iter()
        .filter(|d| seen.insert((d.term.clone(), d.category)))
        .collect();
    out.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_cultural_mention_is_not_flagged() {
        assert!(analyze_text("The Yoruba culture is interesting.").is_empty());
    }

    #[test]
    fn neutral_phrase_with_loaded_wording_nearby_is_low() {
        // evil at distance 2: -0.7 over two window tokens.
        let out = analyze_text("Yoruba culture evil.");
        assert_eq!(out.len(), 1);
        let d = &out[0];
        assert_eq!(d.term, "yoruba");
        assert_eq!(d.bias_level, BiasLevel::Low);
        assert_eq!(d.confidence, NEUTRAL_PHRASE_LOW_CONFIDENCE);
        assert_eq!(d.direction, Direction::Negative);
        assert!(d.explanation.contains("neutral context"));

        // Diluted by one more token: below the neutral threshold.
        assert!(analyze_text("Yoruba culture is evil.").is_empty());
    }

    #[test]
    fn neutral_phrase_above_upper_bound_uses_general_window() {
        // -(0.7 + 0.55) / 3 ≈ -0.42
        let text = "Yoruba culture evil wicked.";
        let low = analyze_text(text);
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].bias_level, BiasLevel::Low);

        let strict = ContextualBiasAnalyzer::new(
            ContextSettings {
                neutral_upper: 0.1,
                ..Default::default()
            },
            Vec::new(),
        );
        let out = strict.analyze_text(text);
        assert_eq!(out.len(), 1);
        let d = &out[0];
        assert_eq!(d.bias_level, BiasLevel::Medium);
        assert_eq!(d.direction, Direction::Negative);
        assert!((d.confidence - 1.25 / 3.0).abs() < 1e-9);
        assert!(d.explanation.starts_with("Strongly negative"));
    }

    #[test]
    fn biased_construction_is_flagged_high() {
        let out = analyze_text("Yoruba domination must end, greedy Yoruba.");
        let d = out
            .iter()
            .find(|d| d.term == "yoruba" && d.category == BiasCategory::Ethnic)
            .expect("yoruba detection");
        assert_eq!(d.bias_level, BiasLevel::High);
        assert!(d.confidence >= 0.9);
        assert_eq!(d.direction, Direction::Negative);
        assert_eq!(d.bias_type_label(), "Anti-Yoruba ethnic bias");
    }

    #[test]
    fn slur_is_flagged_regardless_of_context() {
        let out = analyze_text("I said nyamiri in passing.");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].term, "nyamiri");
        assert_eq!(out[0].bias_level, BiasLevel::High);
        assert_eq!(out[0].confidence, 0.95);
        assert_eq!(out[0].context, "I said nyamiri in passing");
    }

    #[test]
    fn whole_word_matching_only() {
        // "obi" inside "Obinna", "edo" inside "tuxedo".
        assert!(analyze_text("Obinna wore a tuxedo.").is_empty());
    }

    #[test]
    fn general_window_scoring_flags_loaded_language() {
        let out = analyze_text("Wicked greedy Hausa.");
        let d = out.iter().find(|d| d.term == "hausa").expect("hausa detection");
        assert_eq!(d.bias_level, BiasLevel::High);
        assert_eq!(d.direction, Direction::Negative);
        assert!(d.confidence <= GENERAL_CONFIDENCE_CAP);
    }

    #[test]
    fn positive_window_gives_pro_label() {
        let out = analyze_text("I love APC, love APC.");
        let d = out.iter().find(|d| d.term == "apc").expect("apc detection");
        assert_eq!(d.direction, Direction::Positive);
        assert_eq!(d.bias_type_label(), "Pro-APC political bias");
    }

    #[test]
    fn ranking_is_stable_and_idempotent() {
        let text = "Greedy Yoruba and Igbo domination, said the aboki.";
        let a = analyze_text(text);
        let b = analyze_text(text);
        assert_eq!(a, b);
        assert!(a.windows(2).all(|w| w[0].confidence >= w[1].confidence));
        // aboki (0.95) outranks the biased-phrase hits (0.9); yoruba before igbo by table order.
        assert_eq!(a[0].term, "aboki");
        let order: Vec<_> = a.iter().map(|d| d.term.as_str()).collect();
        let y = order.iter().position(|t| *t == "yoruba").unwrap();
        let i = order.iter().position(|t| *t == "igbo").unwrap();
        assert!(y < i);
    }

    #[test]
    fn extra_terms_from_config_are_used() {
        let extra = vec![TermPattern::slur("ogoni scum", BiasCategory::Ethnic)];
        let analyzer = ContextualBiasAnalyzer::new(ContextSettings::default(), extra);
        let out = analyzer.analyze_text("They called him ogoni scum.");
        assert!(out.iter().any(|d| d.term == "ogoni scum"));
    }

    #[test]
    fn window_distance_is_measured_from_term_edges() {
        let tokens = tokenize("greedy labour party voters");
        let ws = window_score(&tokens, 1, 2, 8);
        // greedy (−1.0) at distance 1, two window tokens.
        assert!((ws.score - (-0.85 / 2.0)).abs() < 1e-9);
        assert_eq!((ws.lo, ws.hi), (0, 4));
    }
}
