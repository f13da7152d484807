// src/lib.rs
// Public library surface for the service binary and integration tests.

pub mod analyzer;
pub mod api;
pub mod classify;
pub mod config;
pub mod context;
pub mod credibility;
pub mod error;
pub mod lexicon;
pub mod metrics;
pub mod patterns;
pub mod recency;
pub mod signals;
pub mod terms;
pub mod tips;
pub mod trust;
pub mod verification;

// ---- Re-exports for stable public API ----
pub use crate::analyzer::{AnalysisReport, AnalyzeOptions, Analyzer};
pub use crate::api::router;
pub use crate::context::{analyze_text, BiasDetection, ContextualBiasAnalyzer};
pub use crate::error::{ConfigError, ScoringError, SignalError};
pub use crate::tips::select_tip;
pub use crate::trust::{calculate, TrustInputs, TrustReport, TrustScorer};
