// src/verification.rs
//! Verification scorer: weighs concrete attribution (named bodies, official
//! figures, direct quotes, links) against vague sourcing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::patterns::CREDIBILITY_FLAGS_RE;
use crate::signals::Scored;

const ATTRIBUTION_MARKERS: &[&str] = &[
    r"(?i)\bsaid in a statement\b",
    r"(?i)\b(?:official|government|published) (?:figures|data|statistics|records)\b",
    r"(?i)\b(?:ministry|commission|agency|police|court|bureau|inec|ncdc|nbs|cbn|efcc|spokesperson|spokesman|spokeswoman) (?:said|confirmed|stated|announced|reported)\b",
    r"(?i)\b(?:told|speaking to|briefing) (?:reporters|journalists|newsmen)\b",
    r"(?i)\b(?:peer-reviewed|published in the)\b",
    // Named source: capitalised name after "according to".
    r"\b[Aa]ccording to (?:the )?[A-Z][\w.&-]*(?:\s+[A-Z][\w.&-]*)*",
    // Direct quote of a dozen characters or more.
    r#"["“][^"“”]{12,}["”]"#,
    r"https?://\S+",
];

static MARKER_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    ATTRIBUTION_MARKERS
        .iter()
        .map(|p| Regex::new(p).expect("attribution marker regex"))
        .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    WellSourced,
    PartiallySourced,
    Unverified,
    NoAttribution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationInfo {
    pub markers: Vec<String>,
    pub vague_flags: Vec<String>,
    pub status: VerificationStatus,
    pub explanation: String,
}

pub fn attribution_markers(text: &str) -> Vec<String> {
    MARKER_RES
        .iter()
        .flat_map(|re| re.find_iter(text).map(|m| m.as_str().to_string()))
        .collect()
}

pub fn score(text: &str) -> Scored<VerificationInfo> {
    let markers = attribution_markers(text);
    let vague_flags: Vec<String> = CREDIBILITY_FLAGS_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    let (adjustment, status, explanation) = match markers.len() {
        n if n >= 2 => (
            5.0,
            VerificationStatus::WellSourced,
            format!("Claims are attributed to {n} verifiable sources."),
        ),
        1 => (
            2.0,
            VerificationStatus::PartiallySourced,
            "Claims are partly attributed to a verifiable source.".to_string(),
        ),
        _ if !vague_flags.is_empty() => (
            -10.0,
            VerificationStatus::Unverified,
            format!(
                "Claims rest on vague sourcing ({}) with no verifiable attribution.",
                vague_flags.join(", ")
            ),
        ),
        _ => (
            0.0,
            VerificationStatus::NoAttribution,
            "No attribution found.".to_string(),
        ),
    };

    Scored {
        adjustment,
        info: VerificationInfo {
            markers,
            vague_flags,
            status,
            explanation,
        },
    }
}
