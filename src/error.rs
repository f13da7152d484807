// src/error.rs
//! Error types shared across the analysis pipeline.

use thiserror::Error;

/// A classifier (or any other signal producer) could not deliver its signal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    #[error("{signal} classifier unavailable: {reason}")]
    Unavailable { signal: &'static str, reason: String },

    #[error("{signal} classifier returned malformed output: {reason}")]
    Malformed { signal: &'static str, reason: String },

    #[error("text is empty")]
    EmptyText,
}

impl SignalError {
    pub fn unavailable(signal: &'static str, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            signal,
            reason: reason.into(),
        }
    }

    pub fn malformed(signal: &'static str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            signal,
            reason: reason.into(),
        }
    }
}

/// The fusion engine refused its inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("non-finite value in `{field}`")]
    NonFinite { field: &'static str },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading config from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config from {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("parsing credibility table from {path}: {source}")]
    CredibilityTable {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
