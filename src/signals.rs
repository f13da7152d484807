// src/signals.rs
//! Typed signal records consumed by the trust fusion step.
//!
//! Every external classifier and every internal extractor hands its result over
//! as one of these records. Optional fields are optional in the type; numeric
//! fields are clamped at construction so downstream code never re-checks bounds.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Positive => "positive",
        }
    }
}

/// Shared four-step level used by emotion manipulation risk and pattern extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Minimal,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Probability mass per sentiment class, as reported by a 3-way classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
}

impl SentimentScores {
    /// Used when no classifier output is available.
    pub fn uniform() -> Self {
        Self {
            negative: 0.33,
            neutral: 0.34,
            positive: 0.33,
        }
    }

    pub fn get(&self, label: SentimentLabel) -> f64 {
        match label {
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Positive => self.positive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSignal {
    pub label: SentimentLabel,
    /// In [0,1].
    pub confidence: f64,
    pub bias_indicator: bool,
    pub is_polarized: bool,
    /// In [0,1].
    pub polarization_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<SentimentScores>,
}

impl SentimentSignal {
    pub fn new(
        label: SentimentLabel,
        confidence: f64,
        bias_indicator: bool,
        is_polarized: bool,
        polarization_score: f64,
    ) -> Self {
        Self {
            label,
            confidence: clamp01(confidence),
            bias_indicator,
            is_polarized,
            polarization_score: clamp01(polarization_score),
            scores: None,
        }
    }

    pub fn neutral() -> Self {
        Self::new(SentimentLabel::Neutral, 0.5, false, false, 0.0)
    }

    pub fn with_scores(mut self, scores: SentimentScores) -> Self {
        self.scores = Some(scores);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionIntensity {
    HighIntensity,
    MediumIntensity,
    LowIntensity,
    Positive,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionSignal {
    pub label: String,
    /// Percentage in [0,100].
    pub confidence: f64,
    pub is_emotionally_charged: bool,
    pub manipulation_risk: RiskLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<EmotionIntensity>,
}

impl EmotionSignal {
    pub fn new(
        label: impl Into<String>,
        confidence: f64,
        is_emotionally_charged: bool,
        manipulation_risk: RiskLevel,
    ) -> Self {
        Self {
            label: label.into(),
            confidence: confidence.clamp(0.0, 100.0),
            is_emotionally_charged,
            manipulation_risk,
            intensity: None,
        }
    }

    pub fn calm() -> Self {
        Self::new("neutral", 0.0, false, RiskLevel::Minimal)
    }

    /// True when the signal shows neither manipulation nor charge.
    pub fn is_calm(&self) -> bool {
        !self.is_emotionally_charged
            && matches!(self.manipulation_risk, RiskLevel::Minimal | RiskLevel::Low)
    }

    /// Legacy scalar intensity in [0,1]; a non-positive confidence falls back to 0.3.
    pub fn legacy_score(&self) -> f64 {
        if self.is_emotionally_charged && self.confidence > 0.0 {
            self.confidence / 100.0
        } else {
            0.3
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasTypeAnalysis {
    #[serde(rename = "type")]
    pub bias_type: String,
    /// Percentage in [0,100].
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl BiasTypeAnalysis {
    pub fn new(bias_type: impl Into<String>, confidence: f64) -> Self {
        Self {
            bias_type: bias_type.into(),
            confidence: confidence.clamp(0.0, 100.0),
            specific_target: None,
            category: None,
        }
    }

    pub fn neutral() -> Self {
        Self::new("neutral", 0.0)
    }

    pub fn is_neutral(&self) -> bool {
        matches!(self.bias_type.as_str(), "neutral" | "no bias")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasClassifierSignal {
    pub flag: bool,
    pub label: String,
    pub type_analysis: BiasTypeAnalysis,
}

impl BiasClassifierSignal {
    pub fn new(flag: bool, label: impl Into<String>, type_analysis: BiasTypeAnalysis) -> Self {
        Self {
            flag,
            label: label.into(),
            type_analysis,
        }
    }
}

/// Output of one regex pattern extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSignal {
    pub has_matches: bool,
    pub matches: Vec<String>,
    /// Matches per 100 words, rounded to 2 decimals.
    pub percent_score: f64,
    /// `percent_score` mapped into [0,1].
    pub density_score: f64,
    pub level: RiskLevel,
}

impl PatternSignal {
    pub fn empty() -> Self {
        Self {
            has_matches: false,
            matches: Vec::new(),
            percent_score: 0.0,
            density_score: 0.0,
            level: RiskLevel::Minimal,
        }
    }
}

/// Signed contribution of an auxiliary scorer plus the scorer's own report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scored<I> {
    pub adjustment: f64,
    pub info: I,
}

/// NaN passes through untouched; the fusion engine rejects it explicitly.
pub(crate) fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}
