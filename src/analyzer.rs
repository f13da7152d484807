// src/analyzer.rs
//! Orchestration: runs the extractors, the contextual analyzer and the three
//! classifiers over one text, then hands everything to the trust scorer.
//!
//! Classifier failures never abort an analysis. A failed signal is simply
//! absent (the scorer falls back to its legacy inputs) and the failure is
//! recorded in the report metadata.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::classify::Classifiers;
use crate::config::BiaslensConfig;
use crate::context::{BiasDetection, ContextualBiasAnalyzer};
use crate::error::SignalError;
use crate::metrics;
use crate::patterns::{FakeNewsReport, PatternAnalysis, RegionalPatternReport};
use crate::signals::{
    BiasClassifierSignal, EmotionSignal, RiskLevel, SentimentLabel, SentimentScores,
    SentimentSignal,
};
use crate::trust::{TrustInputs, TrustLevel, TrustReport, TrustScorer};

pub const ERROR_INDICATOR: &str = "Error";
const QUICK_BASE_SCORE: f64 = 80.0;
const QUICK_TIP: &str = "For a more comprehensive analysis, use the full analyze function.";

// Dev logging gate: BIASLENS_DEV_LOG=1 AND dev env (debug or SHUTTLE_ENV in {local,development,dev})
pub(crate) fn dev_logging_enabled() -> bool {
    let on = std::env::var("BIASLENS_DEV_LOG").ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var("SHUTTLE_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// Short stable id for a text; raw text never reaches the logs.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

pub(crate) fn truncate_vec<T: ToString>(v: &[T], max: usize) -> Vec<String> {
    v.iter().take(max).map(|x| x.to_string()).collect()
}

fn dev_log_analysis(mode: &str, text: &str, score: Option<f64>, risk_factors: &[String]) {
    if !dev_logging_enabled() {
        return;
    }
    let id = anon_hash(text);
    let risks = truncate_vec(risk_factors, 5);
    info!(
        target: "biaslens",
        %id, mode, score = ?score,
        text_len = text.len(),
        risks = ?risks
    );
}

fn elapsed_ms(start: Instant) -> f64 {
    (start.elapsed().as_secs_f64() * 1_000_000.0).round() / 1000.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeOptions {
    pub include_patterns: bool,
    pub include_detailed_results: bool,
    /// Runs a headline/content mismatch check against the text.
    pub headline: Option<String>,
    pub url: Option<String>,
    /// Defaults to today.
    pub reference_date: Option<NaiveDate>,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            include_patterns: true,
            include_detailed_results: false,
            headline: None,
            url: None,
            reference_date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub mode: String,
    /// Milliseconds per component.
    pub component_processing_times: BTreeMap<String, f64>,
    pub overall_processing_time: f64,
    pub text_length: usize,
    pub analysis_timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signal_failures: Vec<String>,
}

impl AnalysisMetadata {
    fn new(mode: &str, text: &str) -> Self {
        Self {
            mode: mode.to_string(),
            component_processing_times: BTreeMap::new(),
            overall_processing_time: 0.0,
            text_length: text.chars().count(),
            analysis_timestamp: Utc::now(),
            signal_failures: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedAnalysis {
    pub sentiment: Option<SentimentSignal>,
    pub emotion: Option<EmotionSignal>,
    pub bias: Option<BiasClassifierSignal>,
    pub contextual_bias: Vec<BiasDetection>,
    pub trust: TrustReport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// `None` only for error reports.
    pub score: Option<f64>,
    pub indicator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_level: Option<TrustLevel>,
    pub explanation: Vec<String>,
    pub tip: String,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub primary_bias_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_analysis: Option<PatternAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed: Option<DetailedAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline_analysis: Option<HeadlineMismatch>,
    pub metadata: AnalysisMetadata,
}

impl AnalysisReport {
    pub fn error(reason: &str, text: &str) -> Self {
        Self {
            score: None,
            indicator: ERROR_INDICATOR.to_string(),
            trust_level: None,
            explanation: vec![reason.to_string()],
            tip: "Analysis failed".to_string(),
            risk_factors: Vec::new(),
            summary: None,
            primary_bias_type: "unknown".to_string(),
            pattern_analysis: None,
            detailed: None,
            headline_analysis: None,
            metadata: AnalysisMetadata::new("error", text),
        }
    }

    pub fn is_error(&self) -> bool {
        self.score.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickReport {
    pub score: Option<f64>,
    pub indicator: String,
    pub explanation: Vec<String>,
    pub tip: String,
    pub risk_factors: Vec<String>,
    pub sentiment: Option<SentimentSignal>,
    pub regional: Option<RegionalPatternReport>,
    pub fake_news: Option<FakeNewsReport>,
    pub metadata: AnalysisMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MismatchLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentMismatch {
    /// Mean absolute difference of the class distributions.
    pub score: f64,
    pub headline_sentiment: SentimentLabel,
    pub content_sentiment: SentimentLabel,
    pub likely_clickbait: bool,
    pub level: MismatchLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineMismatch {
    pub sentiment: SentimentMismatch,
    pub headline_trust: Option<f64>,
    pub content_trust: Option<f64>,
    pub trust_difference: Option<f64>,
    pub headline_emotionally_charged: bool,
    pub content_emotionally_charged: bool,
    /// 0..=100.
    pub mismatch_score: f64,
    pub is_likely_clickbait: bool,
    pub mismatch_level: MismatchLevel,
    pub explanation: Vec<String>,
    /// Classifier errors from either trust run.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signal_failures: Vec<String>,
}

/// Signals collected for one text before fusion.
#[derive(Debug)]
struct Collected {
    patterns: PatternAnalysis,
    detections: Vec<BiasDetection>,
    sentiment: Option<SentimentSignal>,
    emotion: Option<EmotionSignal>,
    bias: Option<BiasClassifierSignal>,
}

#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    classifiers: Classifiers,
    context: ContextualBiasAnalyzer,
    scorer: TrustScorer,
}

impl Analyzer {
    pub fn new(
        classifiers: Classifiers,
        context: ContextualBiasAnalyzer,
        scorer: TrustScorer,
    ) -> Self {
        Self {
            classifiers,
            context,
            scorer,
        }
    }

    pub fn from_config(cfg: &BiaslensConfig) -> Self {
        Self {
            classifiers: Classifiers::default(),
            context: ContextualBiasAnalyzer::new(cfg.context.clone(), cfg.extra_terms.clone()),
            scorer: TrustScorer::new(cfg.trust.clone(), cfg.credibility()),
        }
    }

    pub fn with_classifiers(mut self, classifiers: Classifiers) -> Self {
        self.classifiers = classifiers;
        self
    }

    pub fn context(&self) -> &ContextualBiasAnalyzer {
        &self.context
    }

    pub fn analyze(&self, text: &str, opts: &AnalyzeOptions) -> AnalysisReport {
        self.analyze_with_rng(text, opts, &mut rand::rng())
    }

    /// Full analysis. `rng` only drives educational tip selection.
    pub fn analyze_with_rng<R: Rng + ?Sized>(
        &self,
        text: &str,
        opts: &AnalyzeOptions,
        rng: &mut R,
    ) -> AnalysisReport {
        let report = self.run_full(text, opts, rng);
        metrics::record_analysis("full", report.score);
        if report.score.is_some() {
            dev_log_analysis("full", text, report.score, &report.risk_factors);
        }
        report
    }

    /// The full pipeline without recording it as a top-level analysis.
    fn run_full<R: Rng + ?Sized>(
        &self,
        text: &str,
        opts: &AnalyzeOptions,
        rng: &mut R,
    ) -> AnalysisReport {
        if text.trim().is_empty() {
            return AnalysisReport::error("Empty or invalid text provided", text);
        }

        let started = Instant::now();
        let mut meta = AnalysisMetadata::new("full", text);
        let c = self.collect(text, &mut meta);

        let legacy_bias = match &c.bias {
            Some(b) if b.flag => 0.5,
            _ => 0.2,
        };
        let legacy_emotion = c.emotion.as_ref().map_or(0.3, EmotionSignal::legacy_score);
        let legacy_label = c
            .sentiment
            .as_ref()
            .map_or(SentimentLabel::Neutral, |s| s.label);

        let mut inputs = TrustInputs::new(text)
            .with_legacy(legacy_bias, legacy_emotion, legacy_label)
            .with_detections(c.detections.clone())
            .with_patterns(c.patterns.clone());
        inputs.sentiment = c.sentiment.clone();
        inputs.emotion = c.emotion.clone();
        inputs.bias = c.bias.clone();
        inputs.url = opts.url.clone();
        inputs.reference_date = opts.reference_date;

        let t = Instant::now();
        let trust = self
            .scorer
            .calculate_with_rng(inputs, rng)
            .unwrap_or_else(|e| {
                warn!(target: "biaslens", error = %e, "trust calculation failed");
                TrustReport::neutral_caution(&e.to_string(), c.patterns.clone())
            });
        meta.component_processing_times
            .insert("trust".to_string(), elapsed_ms(t));

        let headline_analysis = opts
            .headline
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .and_then(|h| match self.headline_mismatch(h, text) {
                Ok(m) => Some(m),
                Err(e) => {
                    warn!(target: "biaslens", error = %e, "headline check skipped");
                    None
                }
            });

        let primary_bias_type = primary_bias_type(c.bias.as_ref(), &c.detections);
        meta.overall_processing_time = elapsed_ms(started);

        AnalysisReport {
            score: Some(trust.score),
            indicator: trust.indicator.clone(),
            trust_level: Some(trust.trust_level),
            explanation: trust.explanation.clone(),
            tip: trust.tip.clone(),
            risk_factors: trust.risk_factors.clone(),
            summary: Some(trust.summary.clone()),
            primary_bias_type,
            pattern_analysis: opts.include_patterns.then(|| c.patterns.clone()),
            detailed: opts.include_detailed_results.then(|| DetailedAnalysis {
                sentiment: c.sentiment,
                emotion: c.emotion,
                bias: c.bias,
                contextual_bias: c.detections,
                trust,
            }),
            headline_analysis,
            metadata: meta,
        }
    }

    fn collect(&self, text: &str, meta: &mut AnalysisMetadata) -> Collected {
        let mut time = |name: &str, start: Instant| {
            meta.component_processing_times
                .insert(name.to_string(), elapsed_ms(start));
        };

        let t = Instant::now();
        let patterns = PatternAnalysis::scan(text);
        time("patterns", t);

        let t = Instant::now();
        let detections = self.context.analyze_text(text);
        time("contextual_bias", t);

        let t = Instant::now();
        let sentiment = self.classifiers.sentiment.analyze(text);
        time("sentiment", t);

        let t = Instant::now();
        let emotion = self.classifiers.emotion.classify(text);
        time("emotion", t);

        let t = Instant::now();
        let bias = self.classifiers.bias.detect(text, &detections);
        time("bias", t);

        let mut failures = Vec::new();
        let sentiment = absorb("sentiment", sentiment, &mut failures);
        let emotion = absorb("emotion", emotion, &mut failures);
        let bias = absorb("bias", bias, &mut failures);
        meta.signal_failures = failures;

        Collected {
            patterns,
            detections,
            sentiment,
            emotion,
            bias,
        }
    }

    /// Sentiment + regional patterns + fake news only.
    pub fn quick_analyze(&self, text: &str) -> QuickReport {
        let mut meta = AnalysisMetadata::new("basic_calculation", text);
        if text.trim().is_empty() {
            metrics::record_analysis("quick", None);
            return QuickReport {
                score: None,
                indicator: ERROR_INDICATOR.to_string(),
                explanation: vec!["Empty or invalid text provided".to_string()],
                tip: "Analysis failed".to_string(),
                risk_factors: Vec::new(),
                sentiment: None,
                regional: None,
                fake_news: None,
                metadata: meta,
            };
        }

        let started = Instant::now();
        let mut failures = Vec::new();
        let sentiment = absorb("sentiment", self.classifiers.sentiment.analyze(text), &mut failures);
        meta.signal_failures = failures;
        let regional = RegionalPatternReport::scan(text);
        let fake = FakeNewsReport::scan(text);

        let mut score = QUICK_BASE_SCORE;
        let mut risk_factors = Vec::new();
        let mut explanation = Vec::new();

        if sentiment.as_ref().is_some_and(|s| s.bias_indicator) {
            score -= 15.0;
            risk_factors.push("sentiment_bias".to_string());
            explanation.push("Sentiment analysis indicates potential bias.".to_string());
        }
        if regional.triggers.has_matches {
            score -= 20.0;
            risk_factors.push("nigerian_triggers".to_string());
            explanation.push("Contains Nigerian expressions commonly used in misleading content.".to_string());
        }
        if regional.clickbait.has_matches {
            score -= 15.0;
            risk_factors.push("clickbait".to_string());
            explanation.push("Contains clickbait patterns designed to attract clicks.".to_string());
        }
        let fake_deduction = match fake.risk_level() {
            RiskLevel::High => Some((25.0, "high_fake_risk")),
            RiskLevel::Medium => Some((15.0, "medium_fake_risk")),
            RiskLevel::Low => Some((8.0, "low_fake_risk")),
            RiskLevel::Minimal => None,
        };
        if let Some((amount, factor)) = fake_deduction {
            score -= amount;
            risk_factors.push(factor.to_string());
            explanation.push(format!(
                "{} risk of fake news based on language patterns.",
                capitalize(fake.risk_level().as_str())
            ));
        }

        let score = score.clamp(0.0, 100.0);
        meta.overall_processing_time = elapsed_ms(started);
        metrics::record_analysis("quick", Some(score));
        dev_log_analysis("quick", text, Some(score), &risk_factors);

        QuickReport {
            score: Some(score),
            indicator: TrustLevel::from_score(score).indicator().to_string(),
            explanation,
            tip: QUICK_TIP.to_string(),
            risk_factors,
            sentiment,
            regional: Some(regional),
            fake_news: Some(fake),
            metadata: meta,
        }
    }

    /// Compares a headline against its article body.
    pub fn headline_mismatch(
        &self,
        headline: &str,
        content: &str,
    ) -> Result<HeadlineMismatch, SignalError> {
        if headline.trim().is_empty() || content.trim().is_empty() {
            return Err(SignalError::EmptyText);
        }

        let hs = self.classifiers.sentiment.analyze(headline)?;
        let cs = self.classifiers.sentiment.analyze(content)?;
        let sentiment = sentiment_mismatch(&hs, &cs);

        let plain = AnalyzeOptions {
            include_patterns: false,
            include_detailed_results: true,
            ..Default::default()
        };
        let mut rng = rand::rng();
        let headline_run = self.run_full(headline, &plain, &mut rng);
        let content_run = self.run_full(content, &plain, &mut rng);
        let headline_trust = headline_run.score;
        let content_trust = content_run.score;
        let trust_difference = headline_trust
            .zip(content_trust)
            .map(|(h, c)| (h - c).abs());

        // Emotion comes from the same classification the trust runs used.
        let charged = |r: &AnalysisReport| {
            r.detailed
                .as_ref()
                .and_then(|d| d.emotion.as_ref())
                .is_some_and(|e| e.is_emotionally_charged)
        };
        let headline_charged = charged(&headline_run);
        let content_charged = charged(&content_run);
        let signal_failures: Vec<String> = headline_run
            .metadata
            .signal_failures
            .into_iter()
            .chain(content_run.metadata.signal_failures)
            .collect();

        let mut score: f64 = 0.0;
        let mut explanation = Vec::new();
        if sentiment.likely_clickbait {
            score += 30.0;
            explanation.push(format!(
                "Headline sentiment ({}) diverges from the content ({}).",
                sentiment.headline_sentiment.as_str(),
                sentiment.content_sentiment.as_str()
            ));
        }
        if let Some(diff) = trust_difference.filter(|d| *d > 30.0) {
            score += 20.0;
            explanation.push(format!("Headline and content trust scores differ by {diff:.0} points."));
        }
        if headline_charged && !content_charged {
            score += 25.0;
            explanation.push("Headline is emotionally charged while the content is not.".to_string());
        }
        let score = score.min(100.0);
        if explanation.is_empty() {
            explanation.push("Headline is consistent with the content.".to_string());
        }

        let mismatch_level = if score > 60.0 {
            MismatchLevel::High
        } else if score > 30.0 {
            MismatchLevel::Medium
        } else {
            MismatchLevel::Low
        };

        metrics::record_analysis("headline", Some(score));

        Ok(HeadlineMismatch {
            sentiment,
            headline_trust,
            content_trust,
            trust_difference,
            headline_emotionally_charged: headline_charged,
            content_emotionally_charged: content_charged,
            mismatch_score: score,
            is_likely_clickbait: score > 40.0,
            mismatch_level,
            explanation,
            signal_failures,
        })
    }
}

fn absorb<T>(
    signal: &'static str,
    result: Result<T, SignalError>,
    failures: &mut Vec<String>,
) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(target: "biaslens", signal, error = %e, "signal unavailable, using fallback");
            metrics::record_signal_failure(signal);
            failures.push(e.to_string());
            None
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut cs = s.chars();
    match cs.next() {
        Some(first) => first.to_uppercase().chain(cs).collect(),
        None => String::new(),
    }
}

fn primary_bias_type(bias: Option<&BiasClassifierSignal>, detections: &[BiasDetection]) -> String {
    match (bias, detections.first()) {
        (Some(b), _) if !b.type_analysis.bias_type.is_empty() => b.type_analysis.bias_type.clone(),
        (_, Some(top)) => top.bias_type_label(),
        _ => "neutral".to_string(),
    }
}

pub fn sentiment_mismatch(headline: &SentimentSignal, content: &SentimentSignal) -> SentimentMismatch {
    let h = headline.scores.unwrap_or_else(SentimentScores::uniform);
    let c = content.scores.unwrap_or_else(SentimentScores::uniform);
    let diff = ((h.negative - c.negative).abs()
        + (h.neutral - c.neutral).abs()
        + (h.positive - c.positive).abs())
        / 3.0;
    let score = (diff * 1000.0).round() / 1000.0;
    let level = if score > 0.5 {
        MismatchLevel::High
    } else if score > 0.3 {
        MismatchLevel::Medium
    } else {
        MismatchLevel::Low
    };
    SentimentMismatch {
        score,
        headline_sentiment: headline.label,
        content_sentiment: content.label,
        likely_clickbait: score > 0.3,
        level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{BiasModel, EmotionModel, SentimentModel};
    use crate::signals::BiasTypeAnalysis;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    struct Failing;

    impl SentimentModel for Failing {
        fn analyze(&self, _: &str) -> Result<SentimentSignal, SignalError> {
            Err(SignalError::unavailable("sentiment", "model not loaded"))
        }
    }
    impl EmotionModel for Failing {
        fn classify(&self, _: &str) -> Result<EmotionSignal, SignalError> {
            Err(SignalError::malformed("emotion", "no labels"))
        }
    }
    impl BiasModel for Failing {
        fn detect(&self, _: &str, _: &[BiasDetection]) -> Result<BiasClassifierSignal, SignalError> {
            Err(SignalError::unavailable("bias", "timeout"))
        }
    }

    struct FixedBias;

    impl BiasModel for FixedBias {
        fn detect(&self, _: &str, _: &[BiasDetection]) -> Result<BiasClassifierSignal, SignalError> {
            Ok(BiasClassifierSignal::new(
                true,
                "Potentially Biased - High Confidence (0.950)",
                BiasTypeAnalysis::new("political bias", 95.0),
            ))
        }
    }

    fn ref_opts() -> AnalyzeOptions {
        AnalyzeOptions {
            reference_date: NaiveDate::from_ymd_opt(2025, 6, 1),
            ..Default::default()
        }
    }

    #[test]
    fn anon_hash_is_short_and_stable() {
        let a = anon_hash("some text");
        assert_eq!(a.len(), 12);
        assert_eq!(a, anon_hash("some text"));
        assert_ne!(a, anon_hash("other text"));
    }

    #[test]
    fn empty_text_is_an_error_report() {
        let r = Analyzer::default().analyze("   ", &AnalyzeOptions::default());
        assert!(r.is_error());
        assert_eq!(r.indicator, "Error");
        assert_eq!(r.explanation, vec!["Empty or invalid text provided".to_string()]);
        assert_eq!(r.tip, "Analysis failed");
    }

    #[test]
    fn neutral_text_scores_trusted() {
        let r = Analyzer::default().analyze_with_rng(
            "The government announced new policies today.",
            &ref_opts(),
            &mut StdRng::seed_from_u64(3),
        );
        let score = r.score.unwrap();
        assert!(score >= 70.0, "score {score}");
        assert!(r.risk_factors.is_empty(), "{:?}", r.risk_factors);
        assert!(r.indicator.contains("Trusted"));
        assert_eq!(r.primary_bias_type, "neutral");
        for k in ["patterns", "contextual_bias", "sentiment", "emotion", "bias", "trust"] {
            assert!(r.metadata.component_processing_times.contains_key(k), "{k}");
        }
        assert!(r.pattern_analysis.is_some());
        assert!(r.detailed.is_none());
    }

    #[test]
    fn failing_classifiers_fall_back_to_legacy() {
        let failing = Arc::new(Failing);
        let analyzer = Analyzer::default().with_classifiers(Classifiers {
            sentiment: failing.clone(),
            emotion: failing.clone(),
            bias: failing,
        });
        let opts = AnalyzeOptions {
            include_detailed_results: true,
            ..ref_opts()
        };
        let r = analyzer.analyze("The government announced new policies today.", &opts);
        assert_eq!(r.metadata.signal_failures.len(), 3);
        assert!(r.score.is_some());
        let d = r.detailed.unwrap();
        assert!(d.sentiment.is_none() && d.emotion.is_none() && d.bias.is_none());
        // Legacy emotion baseline 0.3 is not calm enough for the full bonus.
        assert_eq!(d.trust.bonus, 4.0);
    }

    #[test]
    fn high_risk_text_with_bias_flag() {
        let analyzer = Analyzer::default().with_classifiers(Classifiers {
            bias: Arc::new(FixedBias),
            ..Classifiers::default()
        });
        let r = analyzer.analyze(
            "BREAKING: secret plan exposed, they don't want you to know",
            &ref_opts(),
        );
        let score = r.score.unwrap();
        assert!(score < 40.0, "score {score}");
        assert!(r.risk_factors.iter().any(|f| f.contains("fake")));
        assert!(r.risk_factors.iter().any(|f| f.contains("bias")));
        assert!(r.explanation.iter().any(|e| e.starts_with("Suspicious phrases:")));
        assert_eq!(r.primary_bias_type, "political bias");
    }

    #[test]
    fn quick_analysis_deductions() {
        let a = Analyzer::default();
        let clean = a.quick_analyze("The government announced new policies today.");
        assert_eq!(clean.score, Some(80.0));
        assert_eq!(clean.tip, QUICK_TIP);
        assert_eq!(clean.metadata.mode, "basic_calculation");

        let noisy = a.quick_analyze("Nawa o! You won't believe what happened next in Abuja today.");
        assert!(noisy.risk_factors.contains(&"nigerian_triggers".to_string()));
        assert!(noisy.risk_factors.contains(&"clickbait".to_string()));
        assert!(noisy.score.unwrap() <= 45.0);

        assert!(a.quick_analyze("").score.is_none());
    }

    #[test]
    fn headline_mismatch_flags_sensational_headline() {
        let a = Analyzer::default();
        let m = a
            .headline_mismatch(
                "SHOCKING! Terrified residents flee deadly danger, you won't believe it!",
                "The state water board said in a statement that scheduled maintenance on the main pipeline will finish on Friday.",
            )
            .unwrap();
        assert!(m.headline_emotionally_charged);
        assert!(!m.content_emotionally_charged);
        assert!(m.mismatch_score >= 25.0);
        assert!(m.mismatch_score <= 100.0);

        let same = a
            .headline_mismatch(
                "Water board schedules pipeline maintenance",
                "The water board scheduled maintenance on the main pipeline.",
            )
            .unwrap();
        assert_eq!(same.mismatch_level, MismatchLevel::Low);
        assert!(!same.is_likely_clickbait);

        assert_eq!(a.headline_mismatch(" ", "body"), Err(SignalError::EmptyText));
    }

    #[test]
    fn headline_trust_matches_full_analysis() {
        let a = Analyzer::default();
        let headline = "SHOCKING! Terrified residents flee deadly danger!";
        let content = "The water board scheduled maintenance on the main pipeline.";
        let m = a.headline_mismatch(headline, content).unwrap();
        let plain = AnalyzeOptions::default();
        assert_eq!(m.headline_trust, a.analyze(headline, &plain).score);
        assert_eq!(m.content_trust, a.analyze(content, &plain).score);
        assert!(m.signal_failures.is_empty());
    }

    #[test]
    fn headline_check_counts_once() {
        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        ::metrics::with_local_recorder(&recorder, || {
            Analyzer::default()
                .headline_mismatch("Pipeline maintenance", "The water board scheduled maintenance.")
                .unwrap();
        });
        let rendered = handle.render();
        assert!(rendered.contains(r#"mode="headline"} 1"#), "{rendered}");
        assert!(!rendered.contains(r#"mode="full""#), "{rendered}");
    }

    #[test]
    fn headline_emotion_failure_is_reported() {
        let analyzer = Analyzer::default().with_classifiers(Classifiers {
            emotion: Arc::new(Failing),
            ..Classifiers::default()
        });
        let m = analyzer
            .headline_mismatch(
                "SHOCKING! Terrified residents flee deadly danger!",
                "The water board scheduled maintenance on the main pipeline.",
            )
            .unwrap();
        assert_eq!(m.signal_failures.len(), 2);
        assert!(m.signal_failures.iter().all(|f| f.contains("emotion")));
        assert!(!m.headline_emotionally_charged);
        assert!(!m.content_emotionally_charged);
        assert!(m.headline_trust.is_some() && m.content_trust.is_some());
    }

    #[test]
    fn sentiment_mismatch_levels() {
        let neg = crate::classify::derive_sentiment(SentimentScores {
            negative: 0.9,
            neutral: 0.05,
            positive: 0.05,
        });
        let neu = crate::classify::derive_sentiment(SentimentScores {
            negative: 0.05,
            neutral: 0.9,
            positive: 0.05,
        });
        let m = sentiment_mismatch(&neg, &neu);
        // (0.85 + 0.85 + 0) / 3
        assert!((m.score - 0.567).abs() < 1e-9);
        assert_eq!(m.level, MismatchLevel::High);
        assert!(m.likely_clickbait);
        assert_eq!(sentiment_mismatch(&neu, &neu).level, MismatchLevel::Low);
    }
}
