// src/trust.rs
//! Trust-score fusion.
//!
//! `calculate` walks a fixed sequence of deduction steps (bias, emotion,
//! sentiment, fake news, regional patterns, virality), dampens the summed
//! deduction with diminishing returns, then applies balance bonuses and the
//! signed credibility / recency / verification adjustments. The result is
//! clamped to [0,100] and turned into an indicator, tip and summary.

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::context::{self, BiasDetection};
use crate::credibility::{CredibilityInfo, SourceCredibility};
use crate::error::ScoringError;
use crate::patterns::PatternAnalysis;
use crate::recency::{self, RecencyInfo, RecencyStatus};
use crate::signals::{
    BiasClassifierSignal, EmotionSignal, RiskLevel, Scored, SentimentLabel, SentimentSignal,
};
use crate::tips;
use crate::verification::{self, VerificationInfo, VerificationStatus};

/// Contextual detections above this confidence add the regional-bias penalty.
const CONTEXT_PENALTY_CONFIDENCE: f64 = 0.7;
const CONTEXT_PENALTY: f64 = 15.0;

pub const CAUTION_INDICATOR: &str = "🟡 Caution";

/// Diminishing-returns knees and balance bonuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustSettings {
    /// Deductions up to here pass through unchanged.
    pub knee_low: f64,
    /// Deductions between the knees are scaled by `mid_factor`.
    pub knee_high: f64,
    pub mid_factor: f64,
    /// Scale for the portion above `knee_high`.
    pub high_factor: f64,
    pub balance_bonus: f64,
    pub near_neutral_bonus: f64,
    pub mild_bonus: f64,
}

impl Default for TrustSettings {
    fn default() -> Self {
        Self {
            knee_low: 50.0,
            knee_high: 80.0,
            mid_factor: 0.7,
            high_factor: 0.5,
            balance_bonus: 8.0,
            near_neutral_bonus: 4.0,
            mild_bonus: 2.0,
        }
    }
}

/// Scalar fallbacks used when a classifier signal is absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegacyScores {
    pub bias_score: f64,
    pub emotion_score: f64,
    pub sentiment_label: SentimentLabel,
}

impl Default for LegacyScores {
    fn default() -> Self {
        Self {
            bias_score: 0.0,
            emotion_score: 0.0,
            sentiment_label: SentimentLabel::Neutral,
        }
    }
}

/// Everything the fusion step consumes. Absent signals trigger the legacy path.
#[derive(Debug, Clone, Default)]
pub struct TrustInputs {
    pub text: String,
    pub url: Option<String>,
    pub reference_date: Option<NaiveDate>,
    pub sentiment: Option<SentimentSignal>,
    pub emotion: Option<EmotionSignal>,
    pub bias: Option<BiasClassifierSignal>,
    pub legacy: LegacyScores,
    /// Computed with the default analyzer when `None`.
    pub detections: Option<Vec<BiasDetection>>,
    /// Scanned from `text` when `None`.
    pub patterns: Option<PatternAnalysis>,
}

impl TrustInputs {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_legacy(mut self, bias_score: f64, emotion_score: f64, label: SentimentLabel) -> Self {
        self.legacy = LegacyScores {
            bias_score,
            emotion_score,
            sentiment_label: label,
        };
        self
    }

    pub fn with_sentiment(mut self, s: SentimentSignal) -> Self {
        self.sentiment = Some(s);
        self
    }

    pub fn with_emotion(mut self, e: EmotionSignal) -> Self {
        self.emotion = Some(e);
        self
    }

    pub fn with_bias(mut self, b: BiasClassifierSignal) -> Self {
        self.bias = Some(b);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn with_detections(mut self, d: Vec<BiasDetection>) -> Self {
        self.detections = Some(d);
        self
    }

    pub fn with_patterns(mut self, p: PatternAnalysis) -> Self {
        self.patterns = Some(p);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustLevel {
    HighlyTrusted,
    Trusted,
    ModerateCaution,
    HighCaution,
    Risky,
    HighlyRisky,
}

impl TrustLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            Self::HighlyTrusted
        } else if score >= 70.0 {
            Self::Trusted
        } else if score >= 55.0 {
            Self::ModerateCaution
        } else if score >= 40.0 {
            Self::HighCaution
        } else if score >= 25.0 {
            Self::Risky
        } else {
            Self::HighlyRisky
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            Self::HighlyTrusted => "🟢 Highly Trusted",
            Self::Trusted => "🟢 Trusted",
            Self::ModerateCaution => "🟡 Moderate Caution",
            Self::HighCaution => "🟠 High Caution",
            Self::Risky => "🔴 Risky",
            Self::HighlyRisky => "🔴 Highly Risky",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Self::HighlyTrusted => "This content appears highly trustworthy with minimal bias or manipulation.",
            Self::Trusted => "This content appears generally trustworthy but exercise normal caution.",
            Self::ModerateCaution => "This content shows some concerning patterns - verify from other sources.",
            Self::HighCaution => "This content has multiple red flags - approach with significant caution.",
            Self::Risky => "This content appears risky with several manipulation indicators.",
            Self::HighlyRisky => "This content shows strong signs of bias, manipulation, or misinformation.",
        }
    }
}

/// Signed auxiliary contributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuxiliaryScores {
    pub credibility: Scored<CredibilityInfo>,
    pub recency: Scored<RecencyInfo>,
    pub verification: Scored<VerificationInfo>,
}

impl AuxiliaryScores {
    pub fn total(&self) -> f64 {
        self.credibility.adjustment + self.recency.adjustment + self.verification.adjustment
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustReport {
    pub score: f64,
    pub indicator: String,
    pub trust_level: TrustLevel,
    pub explanation: Vec<String>,
    pub tip: String,
    pub risk_factors: Vec<String>,
    pub summary: String,
    pub pattern_analysis: PatternAnalysis,
    /// Sum of deductions before diminishing returns.
    pub raw_deduction: f64,
    pub adjusted_deduction: f64,
    pub bonus: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auxiliary: Option<AuxiliaryScores>,
}

impl TrustReport {
    /// Conservative result used when scoring itself fails.
    pub fn neutral_caution(reason: &str, pattern_analysis: PatternAnalysis) -> Self {
        Self {
            score: 50.0,
            indicator: CAUTION_INDICATOR.to_string(),
            trust_level: TrustLevel::from_score(50.0),
            explanation: vec![format!("Trust calculation failed: {reason}")],
            tip: "Unable to calculate trust score - verify this content manually.".to_string(),
            risk_factors: Vec::new(),
            summary: TrustLevel::from_score(50.0).summary().to_string(),
            pattern_analysis,
            raw_deduction: 0.0,
            adjusted_deduction: 0.0,
            bonus: 0.0,
            auxiliary: None,
        }
    }
}

/// Working state for one `calculate` call.
#[derive(Debug, Default)]
struct ScoreLedger {
    deductions: Vec<f64>,
    risk_factors: Vec<String>,
    explanation: Vec<String>,
}

impl ScoreLedger {
    fn deduct(&mut self, amount: f64, risk_factor: &str, explanation: impl Into<String>) {
        self.deductions.push(amount);
        self.risk_factors.push(risk_factor.to_string());
        self.explanation.push(explanation.into());
    }

    fn note(&mut self, explanation: impl Into<String>) {
        self.explanation.push(explanation.into());
    }

    fn flag(&mut self, risk_factor: &str) {
        self.risk_factors.push(risk_factor.to_string());
    }

    fn total(&self) -> f64 {
        self.deductions.iter().sum()
    }

    fn has_risk(&self, needle: &str) -> bool {
        self.risk_factors.iter().any(|r| r.contains(needle))
    }
}

/// Piecewise-linear dampening of the summed deduction.
pub fn diminish(total: f64, s: &TrustSettings) -> f64 {
    if total <= s.knee_low {
        total
    } else if total <= s.knee_high {
        s.knee_low + (total - s.knee_low) * s.mid_factor
    } else {
        s.knee_low + (s.knee_high - s.knee_low) * s.mid_factor + (total - s.knee_high) * s.high_factor
    }
}

fn title_case(s: &str) -> String {
    s.replace('_', " ")
        .split_whitespace()
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

fn ensure_finite(value: f64, field: &'static str) -> Result<(), ScoringError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ScoringError::NonFinite { field })
    }
}

fn validate(inputs: &TrustInputs) -> Result<(), ScoringError> {
    ensure_finite(inputs.legacy.bias_score, "legacy.bias_score")?;
    ensure_finite(inputs.legacy.emotion_score, "legacy.emotion_score")?;
    if let Some(s) = &inputs.sentiment {
        ensure_finite(s.confidence, "sentiment.confidence")?;
        ensure_finite(s.polarization_score, "sentiment.polarization_score")?;
    }
    if let Some(e) = &inputs.emotion {
        ensure_finite(e.confidence, "emotion.confidence")?;
    }
    if let Some(b) = &inputs.bias {
        ensure_finite(b.type_analysis.confidence, "bias.type_analysis.confidence")?;
    }
    if let Some(ds) = &inputs.detections {
        for d in ds {
            ensure_finite(d.confidence, "detections.confidence")?;
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct TrustScorer {
    settings: TrustSettings,
    credibility: SourceCredibility,
}

static DEFAULT_SCORER: Lazy<TrustScorer> = Lazy::new(TrustScorer::default);

/// Scores with default settings and the thread-local RNG for tip selection.
pub fn calculate(inputs: TrustInputs) -> Result<TrustReport, ScoringError> {
    DEFAULT_SCORER.calculate(inputs)
}

impl TrustScorer {
    pub fn new(settings: TrustSettings, credibility: SourceCredibility) -> Self {
        Self {
            settings,
            credibility,
        }
    }

    pub fn settings(&self) -> &TrustSettings {
        &self.settings
    }

    pub fn calculate(&self, inputs: TrustInputs) -> Result<TrustReport, ScoringError> {
        self.calculate_with_rng(inputs, &mut rand::rng())
    }

    pub fn calculate_with_rng<R: Rng + ?Sized>(
        &self,
        inputs: TrustInputs,
        rng: &mut R,
    ) -> Result<TrustReport, ScoringError> {
        validate(&inputs)?;

        let text = inputs.text.as_str();
        let patterns = inputs
            .patterns
            .clone()
            .unwrap_or_else(|| PatternAnalysis::scan(text));
        let detections = inputs
            .detections
            .clone()
            .unwrap_or_else(|| context::analyze_text(text));

        let mut ledger = ScoreLedger::default();
        bias_step(&mut ledger, &inputs, &detections);
        emotion_step(&mut ledger, &inputs);
        sentiment_step(&mut ledger, &inputs);
        fake_news_step(&mut ledger, &patterns);
        regional_pattern_step(&mut ledger, &patterns);
        viral_step(&mut ledger, &patterns);
        let auxiliary = self.auxiliary_step(&mut ledger, &inputs);

        let raw_deduction = ledger.total();
        let adjusted_deduction = diminish(raw_deduction, &self.settings);
        let bonus = self.bonus(&mut ledger, &inputs, adjusted_deduction);

        let score = (100.0 - adjusted_deduction + bonus + auxiliary.total()).clamp(0.0, 100.0);
        let trust_level = TrustLevel::from_score(score);
        let tip = tips::select_tip(&ledger.risk_factors, rng).to_string();

        Ok(TrustReport {
            score,
            indicator: trust_level.indicator().to_string(),
            trust_level,
            explanation: ledger.explanation,
            tip,
            risk_factors: ledger.risk_factors,
            summary: trust_level.summary().to_string(),
            pattern_analysis: patterns,
            raw_deduction,
            adjusted_deduction,
            bonus,
            auxiliary: Some(auxiliary),
        })
    }

    fn auxiliary_step(&self, ledger: &mut ScoreLedger, inputs: &TrustInputs) -> AuxiliaryScores {
        let credibility = self.credibility.score(inputs.url.as_deref());
        if credibility.info.domain.is_some() {
            ledger.note(credibility.info.explanation.clone());
        }
        if credibility.info.tier.is_risky() {
            ledger.flag("low_credibility_source");
        }

        let reference = inputs
            .reference_date
            .unwrap_or_else(|| Utc::now().date_naive());
        let recency = recency::score(&inputs.text, reference);
        if recency.info.status != RecencyStatus::Undated {
            ledger.note(recency.info.explanation.clone());
        }
        if recency.info.status == RecencyStatus::Stale {
            ledger.flag("outdated_content");
        }

        let verification = verification::score(&inputs.text);
        if verification.info.status != VerificationStatus::NoAttribution {
            ledger.note(verification.info.explanation.clone());
        }
        if verification.info.status == VerificationStatus::Unverified {
            ledger.flag("unverified_claims");
        }

        AuxiliaryScores {
            credibility,
            recency,
            verification,
        }
    }

    fn bonus(&self, ledger: &mut ScoreLedger, inputs: &TrustInputs, adjusted: f64) -> f64 {
        let s = &self.settings;
        if ledger.risk_factors.is_empty() {
            let neutral_sentiment = match &inputs.sentiment {
                Some(sig) => sig.label == SentimentLabel::Neutral,
                None => inputs.legacy.sentiment_label == SentimentLabel::Neutral,
            };
            let calm = match &inputs.emotion {
                Some(e) => e.is_calm(),
                None => inputs.legacy.emotion_score < 0.3,
            };
            let unflagged = match &inputs.bias {
                Some(b) => !b.flag,
                None => inputs.legacy.bias_score < 0.4,
            };
            if neutral_sentiment && calm && unflagged {
                ledger.note("Content appears balanced and factual.");
                return s.balance_bonus;
            }
            ledger.note("No significant risk factors detected.");
            return s.near_neutral_bonus;
        }
        if adjusted <= 10.0 && !ledger.has_risk("fake") {
            return s.mild_bonus;
        }
        0.0
    }
}

fn bias_step(ledger: &mut ScoreLedger, inputs: &TrustInputs, detections: &[BiasDetection]) {
    match &inputs.bias {
        Some(b) if b.flag => {
            let (amount, factor, text) = if b.label.contains("High Confidence") {
                (35.0, "high_bias", "High confidence bias detected in language patterns.")
            } else if b.label.contains("Medium Confidence") {
                (20.0, "moderate_bias", "Potential bias detected in language patterns.")
            } else if b.type_analysis.confidence >= 80.0 {
                (35.0, "high_bias", "High confidence bias detected in language patterns.")
            } else if b.type_analysis.confidence >= 60.0 {
                (20.0, "moderate_bias", "Potential bias detected in language patterns.")
            } else {
                (10.0, "mild_bias", "Mild bias detected in language patterns.")
            };
            ledger.deduct(amount, factor, text);

            let ta = &b.type_analysis;
            if ta.is_neutral() {
                ledger.note("Bias type analysis indicates neutrality.");
            } else if !ta.bias_type.is_empty() && ta.bias_type != "analysis_error" {
                ledger.note(format!("Dominant bias type identified: {}.", title_case(&ta.bias_type)));
            }
        }
        Some(_) => {}
        None => {
            let score = inputs.legacy.bias_score;
            if score >= 0.8 {
                ledger.deduct(35.0, "strong_bias", "Text shows strong biased or one-sided language.");
            } else if score >= 0.6 {
                ledger.deduct(20.0, "moderate_bias", "Text shows moderate bias.");
            } else if score >= 0.4 {
                ledger.deduct(10.0, "mild_bias", "Text shows mild bias.");
            }
        }
    }

    let strong: Vec<&BiasDetection> = detections
        .iter()
        .filter(|d| d.confidence > CONTEXT_PENALTY_CONFIDENCE)
        .collect();
    if !strong.is_empty() {
        let mut terms: Vec<String> = Vec::new();
        for d in &strong {
            let t = d.target();
            if !terms.contains(&t) && terms.len() < 3 {
                terms.push(t);
            }
        }
        ledger.deduct(
            CONTEXT_PENALTY,
            "nigerian_bias",
            format!("Loaded use of regional identity terms: {}.", terms.join(", ")),
        );
    }
}

fn emotion_step(ledger: &mut ScoreLedger, inputs: &TrustInputs) {
    match &inputs.emotion {
        Some(e) => match e.manipulation_risk {
            RiskLevel::High => ledger.deduct(
                30.0,
                "emotional_manipulation",
                "Content uses highly manipulative emotional language.",
            ),
            RiskLevel::Medium => ledger.deduct(
                18.0,
                "moderate_emotion",
                "Content shows signs of emotional manipulation.",
            ),
            _ if e.is_emotionally_charged => {
                ledger.deduct(12.0, "emotional_content", "Content is emotionally charged.")
            }
            _ => {}
        },
        None => {
            let score = inputs.legacy.emotion_score;
            if score >= 0.8 {
                ledger.deduct(25.0, "extreme_emotion", "Text is extremely emotionally charged.");
            } else if score >= 0.6 {
                ledger.deduct(15.0, "strong_emotion", "Text has strong emotional tone.");
            } else if score >= 0.4 {
                ledger.deduct(8.0, "mild_emotion", "Text has mild emotional tone.");
            }
        }
    }
}

fn sentiment_step(ledger: &mut ScoreLedger, inputs: &TrustInputs) {
    match &inputs.sentiment {
        Some(s) => {
            if s.bias_indicator {
                ledger.deduct(15.0, "sentiment_bias", "Sentiment analysis indicates potential bias.");
            }
            if s.is_polarized {
                ledger.deduct(15.0, "polarized_content", "Content shows highly polarized sentiment.");
            }
            if s.polarization_score > 0.7 {
                ledger.deduct(10.0, "divisive_sentiment", "Content has divisive sentiment patterns.");
            }
        }
        None => match inputs.legacy.sentiment_label {
            SentimentLabel::Negative => {
                ledger.deduct(8.0, "negative_sentiment", "Text expresses a negative tone.")
            }
            SentimentLabel::Positive => ledger.deduct(
                5.0,
                "positive_slant",
                "Text expresses a one-sided positive tone.",
            ),
            SentimentLabel::Neutral => {}
        },
    }
}

fn fake_news_step(ledger: &mut ScoreLedger, patterns: &PatternAnalysis) {
    let fake = &patterns.fake_news;
    let level = fake.risk_level();
    // A single vague attribution is left to the verification scorer.
    if !fake.is_suspicious {
        return;
    }
    match level {
        RiskLevel::High => ledger.deduct(
            40.0,
            "high_fake_risk",
            "High risk of fake news based on language patterns.",
        ),
        RiskLevel::Medium => ledger.deduct(
            25.0,
            "medium_fake_risk",
            "Medium risk of fake news based on language patterns.",
        ),
        RiskLevel::Low => ledger.deduct(12.0, "low_fake_risk", "Some suspicious patterns detected."),
        RiskLevel::Minimal => return,
    }

    let mut top: Vec<&str> = Vec::new();
    for m in fake.phrases.matches.iter().take(3) {
        if !top.iter().any(|t| t.eq_ignore_ascii_case(m)) {
            top.push(m);
        }
    }
    if !top.is_empty() {
        ledger.note(format!("Suspicious phrases: {}", top.join(", ")));
    }
}

fn density_tier(density: f64, table: [f64; 3]) -> f64 {
    if density > 0.7 {
        table[0]
    } else if density > 0.4 {
        table[1]
    } else {
        table[2]
    }
}

fn regional_pattern_step(ledger: &mut ScoreLedger, patterns: &PatternAnalysis) {
    let r = &patterns.regional;
    if r.triggers.has_matches {
        ledger.deduct(
            density_tier(r.triggers.density_score, [20.0, 14.0, 8.0]),
            "nigerian_triggers",
            "Contains Nigerian expressions commonly used in misleading content.",
        );
    }
    if r.clickbait.has_matches {
        ledger.deduct(
            density_tier(r.clickbait.density_score, [15.0, 10.0, 5.0]),
            "clickbait",
            "Contains clickbait patterns designed to attract clicks.",
        );
    }
}

fn viral_step(ledger: &mut ScoreLedger, patterns: &PatternAnalysis) {
    let v = &patterns.virality;
    if !v.has_matches {
        return;
    }
    match v.level {
        RiskLevel::High => ledger.deduct(
            25.0,
            "viral_manipulation",
            "Contains patterns designed to manipulate viral sharing.",
        ),
        RiskLevel::Medium => ledger.deduct(
            15.0,
            "mild_viral_manipulation",
            "Shows some viral manipulation tactics.",
        ),
        _ => ledger.deduct(
            8.0,
            "low_viral_manipulation",
            "Uses some share-pressure language.",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::BiasTypeAnalysis;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ref_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn diminishing_returns_knees() {
        let s = TrustSettings::default();
        assert_eq!(diminish(40.0, &s), 40.0);
        assert!((diminish(70.0, &s) - 64.0).abs() < 1e-9);
        assert!((diminish(90.0, &s) - 76.0).abs() < 1e-9);
        assert!((diminish(120.0, &s) - 91.0).abs() < 1e-9);
        assert!(diminish(120.0, &s) - diminish(90.0, &s) < 30.0);
    }

    #[test]
    fn trust_level_bands() {
        assert_eq!(TrustLevel::from_score(85.0), TrustLevel::HighlyTrusted);
        assert_eq!(TrustLevel::from_score(84.9), TrustLevel::Trusted);
        assert_eq!(TrustLevel::from_score(55.0), TrustLevel::ModerateCaution);
        assert_eq!(TrustLevel::from_score(40.0), TrustLevel::HighCaution);
        assert_eq!(TrustLevel::from_score(25.0), TrustLevel::Risky);
        assert_eq!(TrustLevel::from_score(0.0), TrustLevel::HighlyRisky);
    }

    #[test]
    fn neutral_text_gets_balance_bonus() {
        let inputs = TrustInputs::new("The government announced new policies today.")
            .with_legacy(0.2, 0.1, SentimentLabel::Neutral)
            .with_reference_date(ref_date());
        let r = TrustScorer::default()
            .calculate_with_rng(inputs, &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(r.score, 100.0);
        assert!(r.risk_factors.is_empty());
        assert_eq!(r.bonus, 8.0);
        assert!(r.indicator.contains("Trusted"));
        assert!(tips::DID_YOU_KNOW_TIPS.contains(&r.tip.as_str()));
    }

    #[test]
    fn bias_tier_from_label_then_confidence() {
        let text = "Plain words here.";
        let run = |b: BiasClassifierSignal| {
            calculate(TrustInputs::new(text).with_bias(b).with_detections(vec![]).with_reference_date(ref_date()))
                .unwrap()
        };

        let high = run(BiasClassifierSignal::new(
            true,
            "Potentially Biased - High Confidence (0.900)",
            BiasTypeAnalysis::new("political bias", 70.0),
        ));
        assert_eq!(high.raw_deduction, 35.0);
        assert!(high.risk_factors.contains(&"high_bias".to_string()));
        assert!(high
            .explanation
            .contains(&"Dominant bias type identified: Political Bias.".to_string()));

        let by_conf = run(BiasClassifierSignal::new(true, "flagged", BiasTypeAnalysis::new("ethnic bias", 65.0)));
        assert_eq!(by_conf.raw_deduction, 20.0);

        let mild = run(BiasClassifierSignal::new(true, "flagged", BiasTypeAnalysis::neutral()));
        assert_eq!(mild.raw_deduction, 10.0);
        assert!(mild
            .explanation
            .contains(&"Bias type analysis indicates neutrality.".to_string()));
    }

    #[test]
    fn contextual_penalty_applies_without_classifier() {
        let text = "Yoruba domination must end, greedy Yoruba.";
        let r = calculate(TrustInputs::new(text).with_reference_date(ref_date())).unwrap();
        assert!(r.risk_factors.contains(&"nigerian_bias".to_string()));
        assert!(r.explanation.iter().any(|e| e.contains("Yoruba")));
    }

    #[test]
    fn legacy_paths() {
        let r = calculate(
            TrustInputs::new("Plain words here.")
                .with_legacy(0.85, 0.65, SentimentLabel::Positive)
                .with_detections(vec![])
                .with_reference_date(ref_date()),
        )
        .unwrap();
        assert_eq!(
            r.risk_factors,
            vec!["strong_bias", "strong_emotion", "positive_slant"]
        );
        assert_eq!(r.raw_deduction, 35.0 + 15.0 + 5.0);
    }

    #[test]
    fn modern_signals_take_precedence_over_legacy() {
        let r = calculate(
            TrustInputs::new("Plain words here.")
                .with_legacy(0.9, 0.9, SentimentLabel::Negative)
                .with_sentiment(SentimentSignal::new(SentimentLabel::Negative, 0.9, true, true, 0.8))
                .with_emotion(EmotionSignal::new("anger", 90.0, true, RiskLevel::High))
                .with_detections(vec![])
                .with_reference_date(ref_date()),
        )
        .unwrap();
        assert_eq!(
            r.risk_factors,
            vec![
                "strong_bias",
                "emotional_manipulation",
                "sentiment_bias",
                "polarized_content",
                "divisive_sentiment"
            ]
        );
        // 35 + 30 + 15 + 15 + 10 = 105 → 50 + 21 + 12.5
        assert!((r.adjusted_deduction - 83.5).abs() < 1e-9);
        assert!((r.score - 16.5).abs() < 1e-9);
    }

    #[test]
    fn auxiliary_adjustments_are_signed() {
        let text = "Police confirmed the arrest. Officials said in a statement on 2025-05-20 that charges follow.";
        let r = calculate(
            TrustInputs::new(text)
                .with_url("https://www.premiumtimesng.com/news/1.html")
                .with_detections(vec![])
                .with_reference_date(ref_date()),
        )
        .unwrap();
        let aux = r.auxiliary.as_ref().unwrap();
        assert_eq!(aux.credibility.adjustment, 10.0);
        assert_eq!(aux.recency.adjustment, 3.0);
        assert_eq!(aux.verification.adjustment, 5.0);
        assert_eq!(r.score, 100.0);

        let satire = calculate(
            TrustInputs::new("Back in 2015, experts say the moon is cheese.")
                .with_url("theonion.com/x")
                .with_detections(vec![])
                .with_reference_date(ref_date()),
        )
        .unwrap();
        for f in ["low_credibility_source", "outdated_content", "unverified_claims"] {
            assert!(satire.risk_factors.contains(&f.to_string()), "{f}");
        }
        // One vague attribution is not fake news, so the mild bonus survives.
        // 100 + 2 - 20 - 8 - 10
        assert_eq!(satire.bonus, 2.0);
        assert_eq!(satire.score, 64.0);
    }

    #[test]
    fn lone_vague_attribution_is_not_fake_news() {
        // Density is high for a short text, but one red flag is not suspicious.
        let text = "Experts say the moon is cheese.";
        let patterns = PatternAnalysis::scan(text);
        assert!(!patterns.fake_news.is_suspicious);
        assert_eq!(patterns.fake_news.risk_level(), RiskLevel::High);

        let r = calculate(
            TrustInputs::new(text)
                .with_detections(vec![])
                .with_reference_date(ref_date()),
        )
        .unwrap();
        assert!(!r.risk_factors.iter().any(|f| f.contains("fake")));
        assert_eq!(r.risk_factors, vec!["unverified_claims"]);
        assert_eq!(r.raw_deduction, 0.0);
        // 100 + 2 - 10
        assert_eq!(r.score, 92.0);

        let two_flags = calculate(
            TrustInputs::new("Experts say studies show the moon is cheese.")
                .with_detections(vec![])
                .with_reference_date(ref_date()),
        )
        .unwrap();
        assert!(two_flags.risk_factors.contains(&"high_fake_risk".to_string()));
        assert_eq!(two_flags.raw_deduction, 40.0);
    }

    #[test]
    fn rejects_non_finite_inputs() {
        let err = calculate(TrustInputs::new("x").with_legacy(f64::NAN, 0.0, SentimentLabel::Neutral))
            .unwrap_err();
        assert_eq!(err, ScoringError::NonFinite { field: "legacy.bias_score" });
    }

    #[test]
    fn neutral_caution_report() {
        let r = TrustReport::neutral_caution("boom", PatternAnalysis::scan(""));
        assert_eq!(r.score, 50.0);
        assert_eq!(r.indicator, CAUTION_INDICATOR);
        assert_eq!(r.explanation, vec!["Trust calculation failed: boom".to_string()]);
    }
}
