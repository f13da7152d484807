// src/patterns.rs
//! Regex pattern extractors: regional trigger phrases, clickbait, fake-news
//! phrasing (plus vague-sourcing red flags) and viral-sharing pressure.
//!
//! Each extractor is "text in → matches + density out". Pattern lists are
//! joined into one case-insensitive alternation and compiled once.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::signals::{PatternSignal, RiskLevel};

/// Percent score at which `density_score` saturates to 1.0.
const DENSITY_SATURATION_PERCENT: f64 = 10.0;

const REGIONAL_TRIGGER_PHRASES: &[&str] = &[
    // Pidgin expressions
    r"aswear",
    r"na them",
    r"dem wan kill us",
    r"nawa o",
    r"wetin be this",
    r"shey na joke",
    r"this is madness",
    r"see wetin dey happen",
    r"dem don finish us",
    r"na wa o",
    r"which kind country be this",
    // Political
    r"this country is finished",
    r"government is lying",
    r"our leaders have failed us",
    r"politicians are thieves",
    r"dem no care about us",
    r"nigeria don spoil finish",
    // Sensationalist
    r"breaking[:\-]?",
    r"shocking truth",
    r"they don['’]?t want you to know",
    r"the real truth",
    r"hidden agenda",
    r"wake up nigeria",
    // Religious / ethnic
    r"christian vs muslim",
    r"yoruba vs igbo",
    r"hausa vs",
    r"religious war",
    r"ethnic cleansing",
    r"genocide",
    r"targeted killing",
];

const CLICKBAIT_PATTERNS: &[&str] = &[
    r"you won['’]?t believe",
    r"number \d+ will shock you",
    r"what happened next",
    r"see what \w+ did",
    r"this will amaze you",
    r"must see",
    r"viral video",
    r"gone wrong",
    r"you need to see this",
    r"incredible footage",
];

const FAKE_NEWS_PATTERNS: &[&str] = &[
    // Sensationalist words
    r"\bbreaking\b",
    r"\bshocking\b",
    r"\brevealed\b",
    r"\bexposed\b",
    r"\bscandal\b",
    r"\bcollapse\b",
    r"\btotal failure\b",
    r"\bmust watch\b",
    r"\bagenda\b",
    r"\bhidden truth\b",
    r"\bcover[- ]?up\b",
    // Conspiracy
    r"what they don['’]?t want you to know",
    r"wake up nigeria",
    r"the truth (?:about|behind)",
    r"secret (?:meeting|plan|agenda)",
    r"they are hiding",
    r"mainstream media won['’]?t tell you",
    // Emotional manipulation
    r"you will cry",
    r"heartbreaking",
    r"devastating news",
    r"this will make you angry",
    r"prepare to be shocked",
];

/// Vague or unverifiable attributions.
pub(crate) const CREDIBILITY_RED_FLAGS: &[&str] = &[
    r"according to sources",
    r"insider reveals",
    r"anonymous tip",
    r"leaked document",
    r"confidential source",
    r"whistleblower",
    r"experts say",
    r"studies show",
    r"research proves",
    r"scientists confirm",
    r"doctors warn",
];

const VIRAL_PATTERNS: &[&str] = &[
    // Urgency
    r"share (?:this|now|before)",
    r"retweet if you",
    r"tag your friends",
    r"urgent",
    r"time sensitive",
    r"delete this",
    r"censored",
    // Fear of missing out
    r"limited time",
    r"won['’]?t last long",
    r"before it['’]?s too late",
    r"last chance",
    r"final warning",
    r"don['’]?t miss this",
    // Social proof
    r"everyone is talking about",
    r"going viral",
    r"trending now",
    r"millions have seen",
    r"shared \d+ times",
];

fn compile_alternation(patterns: &[&str]) -> Regex {
    let joined = patterns
        .iter()
        .map(|p| format!("(?:{p})"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i){joined}")).expect("static pattern list compiles")
}

static REGIONAL_TRIGGERS_RE: Lazy<Regex> = Lazy::new(|| compile_alternation(REGIONAL_TRIGGER_PHRASES));
static CLICKBAIT_RE: Lazy<Regex> = Lazy::new(|| compile_alternation(CLICKBAIT_PATTERNS));
static FAKE_NEWS_RE: Lazy<Regex> = Lazy::new(|| compile_alternation(FAKE_NEWS_PATTERNS));
pub(crate) static CREDIBILITY_FLAGS_RE: Lazy<Regex> =
    Lazy::new(|| compile_alternation(CREDIBILITY_RED_FLAGS));
static VIRAL_RE: Lazy<Regex> = Lazy::new(|| compile_alternation(VIRAL_PATTERNS));

pub(crate) fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn find_all(re: &Regex, text: &str) -> Vec<String> {
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Matches per 100 words.
fn percent(matches: usize, words: usize) -> f64 {
    round2(matches as f64 / words.max(1) as f64 * 100.0)
}

fn density(percent_score: f64) -> f64 {
    (percent_score / DENSITY_SATURATION_PERCENT).clamp(0.0, 1.0)
}

fn density_level(density_score: f64, has_matches: bool) -> RiskLevel {
    if density_score > 0.7 {
        RiskLevel::High
    } else if density_score > 0.4 {
        RiskLevel::Medium
    } else if has_matches {
        RiskLevel::Low
    } else {
        RiskLevel::Minimal
    }
}

fn density_signal(matches: Vec<String>, words: usize) -> PatternSignal {
    let percent_score = percent(matches.len(), words);
    let density_score = density(percent_score);
    let has_matches = !matches.is_empty();
    PatternSignal {
        has_matches,
        level: density_level(density_score, has_matches),
        matches,
        percent_score,
        density_score,
    }
}

/// Regional (Nigerian) trigger phrases and clickbait hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalPatternReport {
    pub triggers: PatternSignal,
    pub clickbait: PatternSignal,
    pub total_flags: usize,
}

impl RegionalPatternReport {
    pub fn scan(text: &str) -> Self {
        let words = word_count(text);
        let triggers = density_signal(find_all(&REGIONAL_TRIGGERS_RE, text), words);
        let clickbait = density_signal(find_all(&CLICKBAIT_RE, text), words);
        let total_flags = triggers.matches.len() + clickbait.matches.len();
        Self {
            triggers,
            clickbait,
            total_flags,
        }
    }

    pub fn has_misleading_pattern(&self) -> bool {
        self.triggers.has_matches || self.clickbait.has_matches
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FakeNewsReport {
    /// Fake-news phrasing matches; `level` carries the overall risk.
    pub phrases: PatternSignal,
    pub credibility_flags: Vec<String>,
    /// Credibility red flags per 100 words.
    pub credibility_score: f64,
    pub is_suspicious: bool,
}

impl FakeNewsReport {
    pub fn scan(text: &str) -> Self {
        let words = word_count(text);
        let fake_matches = find_all(&FAKE_NEWS_RE, text);
        let credibility_flags = find_all(&CREDIBILITY_FLAGS_RE, text);

        let fake_percent = percent(fake_matches.len(), words);
        let credibility_score = percent(credibility_flags.len(), words);

        let is_suspicious = !fake_matches.is_empty() || credibility_flags.len() > 1;

        let mut level = if fake_percent > 5.0 || credibility_score > 3.0 {
            RiskLevel::High
        } else if fake_percent > 2.0 || credibility_score > 1.0 {
            RiskLevel::Medium
        } else if !fake_matches.is_empty() || !credibility_flags.is_empty() {
            RiskLevel::Low
        } else {
            RiskLevel::Minimal
        };
        if is_suspicious && level == RiskLevel::Minimal {
            level = RiskLevel::Low;
        }

        Self {
            phrases: PatternSignal {
                has_matches: !fake_matches.is_empty(),
                matches: fake_matches,
                percent_score: fake_percent,
                density_score: density(fake_percent),
                level,
            },
            credibility_flags,
            credibility_score,
            is_suspicious,
        }
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.phrases.level
    }

    pub fn total_flags(&self) -> usize {
        self.phrases.matches.len() + self.credibility_flags.len()
    }
}

/// Share-pressure, urgency and social-proof phrasing.
pub fn scan_virality(text: &str) -> PatternSignal {
    let words = word_count(text);
    let matches = find_all(&VIRAL_RE, text);
    let percent_score = percent(matches.len(), words);
    let level = if percent_score > 3.0 {
        RiskLevel::High
    } else if percent_score > 1.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };
    PatternSignal {
        has_matches: !matches.is_empty(),
        matches,
        percent_score,
        density_score: density(percent_score),
        level,
    }
}

/// All regex extractors over one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternAnalysis {
    pub regional: RegionalPatternReport,
    pub fake_news: FakeNewsReport,
    pub virality: PatternSignal,
}

impl PatternAnalysis {
    pub fn scan(text: &str) -> Self {
        Self {
            regional: RegionalPatternReport::scan(text),
            fake_news: FakeNewsReport::scan(text),
            virality: scan_virality(text),
        }
    }
}
