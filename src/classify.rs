// src/classify.rs
//! Classifier boundary.
//!
//! Sentiment, emotion and bias classification are black boxes behind the
//! `SentimentModel`, `EmotionModel` and `BiasModel` traits. The derivation
//! helpers turn raw model output (class probabilities, a label plus
//! confidence, a toxicity score) into typed signals. The `Lexicon*` types are
//! deterministic stand-ins so the service runs without model weights.

use std::sync::Arc;

use crate::context::{BiasDetection, BiasLevel};
use crate::error::SignalError;
use crate::lexicon;
use crate::signals::{
    BiasClassifierSignal, BiasTypeAnalysis, EmotionIntensity, EmotionSignal, RiskLevel,
    SentimentLabel, SentimentScores, SentimentSignal,
};
use crate::terms::BiasCategory;

pub const BIAS_FLAG_THRESHOLD: f64 = 0.6;
pub const BIAS_HIGH_THRESHOLD: f64 = 0.8;
const CONTEXT_BOOST_CAP: f64 = 0.5;

pub trait SentimentModel: Send + Sync {
    fn analyze(&self, text: &str) -> Result<SentimentSignal, SignalError>;
}

pub trait EmotionModel: Send + Sync {
    fn classify(&self, text: &str) -> Result<EmotionSignal, SignalError>;
}

/// Receives the contextual detections so the score can be boosted by them.
pub trait BiasModel: Send + Sync {
    fn detect(
        &self,
        text: &str,
        detections: &[BiasDetection],
    ) -> Result<BiasClassifierSignal, SignalError>;
}

/// The three classifiers used by the analyzer.
#[derive(Clone)]
pub struct Classifiers {
    pub sentiment: Arc<dyn SentimentModel>,
    pub emotion: Arc<dyn EmotionModel>,
    pub bias: Arc<dyn BiasModel>,
}

impl Default for Classifiers {
    fn default() -> Self {
        Self {
            sentiment: Arc::new(LexiconSentiment),
            emotion: Arc::new(LexiconEmotion),
            bias: Arc::new(LexiconBias),
        }
    }
}

impl std::fmt::Debug for Classifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifiers").finish_non_exhaustive()
    }
}

/* ----------------------------
Derivation helpers
---------------------------- */

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// Signal from a 3-way probability distribution.
pub fn derive_sentiment(scores: SentimentScores) -> SentimentSignal {
    let (label, confidence) = [
        (SentimentLabel::Negative, scores.negative),
        (SentimentLabel::Neutral, scores.neutral),
        (SentimentLabel::Positive, scores.positive),
    ]
    .into_iter()
    .fold((SentimentLabel::Neutral, f64::MIN), |best, cur| {
        if cur.1 > best.1 {
            cur
        } else {
            best
        }
    });

    let bias_indicator = (label == SentimentLabel::Negative && confidence > 0.8)
        || (scores.neutral < 0.2 && confidence > 0.7);
    let polarization = round3((scores.positive - scores.negative).abs());

    SentimentSignal::new(
        label,
        round3(confidence),
        bias_indicator,
        polarization > 0.6,
        polarization,
    )
    .with_scores(scores)
}

const HIGH_INTENSITY: &[&str] = &["anger", "fear", "disgust", "grief", "excitement"];
const MEDIUM_INTENSITY: &[&str] = &["annoyance", "disappointment", "disapproval", "nervousness", "surprise"];
const LOW_INTENSITY: &[&str] = &["confusion", "curiosity", "realization", "neutral"];
const POSITIVE_EMOTIONS: &[&str] = &[
    "admiration", "amusement", "approval", "caring", "gratitude", "joy", "love", "optimism", "pride", "relief",
];

const HIGH_RISK_EMOTIONS: &[&str] = &["anger", "fear", "disgust", "grief"];
const MEDIUM_RISK_EMOTIONS: &[&str] = &["annoyance", "disappointment", "disapproval", "excitement"];

pub fn intensity_of(label: &str) -> EmotionIntensity {
    if HIGH_INTENSITY.contains(&label) {
        EmotionIntensity::HighIntensity
    } else if MEDIUM_INTENSITY.contains(&label) {
        EmotionIntensity::MediumIntensity
    } else if LOW_INTENSITY.contains(&label) {
        EmotionIntensity::LowIntensity
    } else if POSITIVE_EMOTIONS.contains(&label) {
        EmotionIntensity::Positive
    } else {
        EmotionIntensity::Unknown
    }
}

/// `confidence` in [0,1].
pub fn manipulation_risk(label: &str, confidence: f64) -> RiskLevel {
    let high = HIGH_RISK_EMOTIONS.contains(&label);
    let medium = MEDIUM_RISK_EMOTIONS.contains(&label);
    if high && confidence > 0.7 {
        RiskLevel::High
    } else if medium && confidence > 0.6 {
        RiskLevel::Medium
    } else if high || (medium && confidence > 0.4) {
        RiskLevel::Low
    } else {
        RiskLevel::Minimal
    }
}

/// Signal from a top emotion label and its probability in [0,1].
pub fn derive_emotion(label: &str, confidence: f64) -> EmotionSignal {
    let intensity = intensity_of(label);
    let charged = confidence > 0.7
        && matches!(
            intensity,
            EmotionIntensity::HighIntensity | EmotionIntensity::MediumIntensity
        );
    let mut signal = EmotionSignal::new(
        label,
        (confidence * 10_000.0).round() / 100.0,
        charged,
        manipulation_risk(label, confidence),
    );
    signal.intensity = Some(intensity);
    signal
}

/// Score boost from contextual detections: high 0.3, medium 0.2, low 0.1, capped.
pub fn contextual_boost(detections: &[BiasDetection]) -> f64 {
    let boost: f64 = detections
        .iter()
        .map(|d| match d.bias_level {
            BiasLevel::High => 0.3,
            BiasLevel::Medium => 0.2,
            BiasLevel::Low => 0.1,
        })
        .sum();
    boost.min(CONTEXT_BOOST_CAP)
}

fn category_confidence(category: BiasCategory) -> f64 {
    match category {
        BiasCategory::Political => 85.0,
        BiasCategory::Ethnic => 90.0,
        BiasCategory::Religious => 88.0,
        BiasCategory::Regional => 82.0,
    }
}

/// Bias type from the top contextual detection, else a generic verdict.
pub fn bias_type_analysis(score: f64, detections: &[BiasDetection]) -> BiasTypeAnalysis {
    match detections.first() {
        Some(top) => BiasTypeAnalysis {
            bias_type: top.bias_type_label(),
            confidence: category_confidence(top.category),
            specific_target: Some(top.target()),
            category: Some(top.category.as_str().to_string()),
        },
        None if score >= BIAS_FLAG_THRESHOLD => BiasTypeAnalysis::new("general bias", score * 100.0),
        None => BiasTypeAnalysis::new("neutral", (1.0 - score) * 100.0),
    }
}

/// Signal from a raw bias probability, boosted by contextual detections.
pub fn derive_bias(raw_score: f64, detections: &[BiasDetection]) -> BiasClassifierSignal {
    let score = (raw_score.clamp(0.0, 1.0) + contextual_boost(detections)).min(1.0);
    let flag = score >= BIAS_FLAG_THRESHOLD;
    let label = if flag {
        let level = if score >= BIAS_HIGH_THRESHOLD { "High" } else { "Medium" };
        let ctx = if detections.is_empty() { "" } else { " (regional context detected)" };
        format!("Potentially Biased - {level} Confidence ({score:.3}){ctx}")
    } else {
        format!("Likely Neutral (confidence: {:.3})", 1.0 - score)
    };
    BiasClassifierSignal::new(flag, label, bias_type_analysis(score, detections))
}

/* ----------------------------
Lexicon stand-ins
---------------------------- */

/// Maps lexicon polarity onto a 3-way distribution.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconSentiment;

impl SentimentModel for LexiconSentiment {
    fn analyze(&self, text: &str) -> Result<SentimentSignal, SignalError> {
        if text.trim().is_empty() {
            return Err(SignalError::EmptyText);
        }
        let (score, _, _) = lexicon::score_text(text);
        let p = (score / 2.0).tanh();
        let negative = round3((-p).max(0.0) * 0.9 + 0.05);
        let positive = round3(p.max(0.0) * 0.9 + 0.05);
        let neutral = round3(1.0 - negative - positive);
        Ok(derive_sentiment(SentimentScores {
            negative,
            neutral,
            positive,
        }))
    }
}

const EMOTION_CUES: &[(&str, &[&str])] = &[
    ("anger", &["angry", "anger", "outrage", "outraged", "furious", "rage", "hate", "hatred", "enraged"]),
    ("fear", &["fear", "afraid", "scared", "terrified", "panic", "danger", "dangerous", "threat", "kill", "killed", "killing"]),
    ("disgust", &["disgusting", "disgust", "disgusted", "vile", "shameful", "sickening"]),
    ("grief", &["grief", "mourn", "mourning", "tragic", "tragedy", "heartbreaking", "devastating", "cry"]),
    ("excitement", &["amazing", "incredible", "unbelievable", "thrilling", "excited"]),
    ("annoyance", &["annoying", "annoyed", "irritating", "nonsense"]),
    ("disappointment", &["disappointed", "disappointing", "failed", "failure", "letdown"]),
    ("disapproval", &["condemn", "condemned", "unacceptable", "disgrace", "wrong"]),
    ("nervousness", &["nervous", "anxious", "worried", "uneasy"]),
    ("surprise", &["surprise", "surprising", "unexpected", "shock", "shocked", "shocking"]),
    ("joy", &["happy", "joy", "delighted", "celebrate", "celebration"]),
    ("gratitude", &["thank", "thanks", "grateful"]),
    ("optimism", &["hope", "hopeful", "optimistic", "promising"]),
    ("admiration", &["brilliant", "admire", "impressive", "outstanding"]),
    ("approval", &["approve", "approved", "welcome", "welcomed"]),
];

/// Counts emotion cue words; exclamation marks raise confidence.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconEmotion;

impl EmotionModel for LexiconEmotion {
    fn classify(&self, text: &str) -> Result<EmotionSignal, SignalError> {
        if text.trim().is_empty() {
            return Err(SignalError::EmptyText);
        }
        let tokens = lexicon::tokenize(text);
        let mut best: Option<(&str, usize)> = None;
        for (emotion, cues) in EMOTION_CUES {
            let hits = tokens.iter().filter(|t| cues.contains(&t.norm.as_str())).count();
            if hits > 0 && best.map_or(true, |(_, n)| hits > n) {
                best = Some((*emotion, hits));
            }
        }

        let Some((label, hits)) = best else {
            return Ok(derive_emotion("neutral", 0.6));
        };
        let exclaims = text.matches('!').count().min(3) as f64;
        let confidence = (0.55 + 0.15 * hits as f64 + 0.05 * exclaims).min(0.97);
        Ok(derive_emotion(label, confidence))
    }
}

/// Toxicity proxy: net negative lexicon weight, saturating at −4.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconBias;

impl BiasModel for LexiconBias {
    fn detect(
        &self,
        text: &str,
        detections: &[BiasDetection],
    ) -> Result<BiasClassifierSignal, SignalError> {
        if text.trim().is_empty() {
            return Err(SignalError::EmptyText);
        }
        let (score, _, _) = lexicon::score_text(text);
        let raw = (-score / 4.0).clamp(0.0, 1.0);
        Ok(derive_bias(raw, detections))
    }
}
