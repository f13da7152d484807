// src/credibility.rs
//! # Source Credibility
//!
//! Maps the domain of an article URL to a credibility tier and a signed
//! score adjustment.
//!
//! - Loads from a JSON table (domains + aliases) or the built-in seed.
//! - Lookup order: aliases → exact domain → parent-domain suffix → unknown.
//! - `www.`, `m.` and `amp.` prefixes are ignored.

use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::Path};
use url::Url;

use crate::error::ConfigError;
use crate::signals::Scored;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredibilityTier {
    High,
    Medium,
    Low,
    Satire,
    Unknown,
}

impl CredibilityTier {
    pub fn adjustment(self) -> f64 {
        match self {
            Self::High => 10.0,
            Self::Medium => 4.0,
            Self::Low => -15.0,
            Self::Satire => -20.0,
            Self::Unknown => 0.0,
        }
    }

    /// Low and satire sources count as a risk factor.
    pub fn is_risky(self) -> bool {
        matches!(self, Self::Low | Self::Satire)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Satire => "satire",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredibilityInfo {
    pub domain: Option<String>,
    pub tier: CredibilityTier,
    pub explanation: String,
}

/// Domain → tier table.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceCredibility {
    #[serde(default)]
    pub domains: HashMap<String, CredibilityTier>,
    /// Alternate domains → canonical domain.
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

impl Default for SourceCredibility {
    fn default() -> Self {
        Self::default_seed()
    }
}

impl SourceCredibility {
    /// Load a JSON table. Keys are normalized on load.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let parsed: Self =
            serde_json::from_str(&raw).map_err(|source| ConfigError::CredibilityTable {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self {
            domains: parsed
                .domains
                .into_iter()
                .map(|(k, v)| (normalize_domain(&k), v))
                .collect(),
            aliases: parsed
                .aliases
                .into_iter()
                .map(|(k, v)| (normalize_domain(&k), normalize_domain(&v)))
                .collect(),
        })
    }

    /// Tier for an already-extracted host name.
    pub fn tier_for(&self, host: &str) -> CredibilityTier {
        let d = normalize_domain(host);
        if let Some(t) = self.lookup(&d) {
            return t;
        }

        // Parent domains: "news.bbc.co.uk" → "bbc.co.uk"; stops before "co.uk".
        let mut rest = d.as_str();
        while let Some((_, parent)) = rest.split_once('.') {
            if !parent.contains('.') {
                break;
            }
            if let Some(t) = self.lookup(parent) {
                return t;
            }
            rest = parent;
        }

        CredibilityTier::Unknown
    }

    fn lookup(&self, domain: &str) -> Option<CredibilityTier> {
        if let Some(canon) = self.aliases.get(domain) {
            if let Some(&t) = self.domains.get(canon) {
                return Some(t);
            }
        }
        self.domains.get(domain).copied()
    }

    /// Score a source URL. `None` or an unparsable URL scores as unknown.
    pub fn score(&self, url: Option<&str>) -> Scored<CredibilityInfo> {
        let Some(domain) = url.and_then(host_of) else {
            return Scored {
                adjustment: 0.0,
                info: CredibilityInfo {
                    domain: None,
                    tier: CredibilityTier::Unknown,
                    explanation: "No source URL provided.".to_string(),
                },
            };
        };

        let tier = self.tier_for(&domain);
        let explanation = match tier {
            CredibilityTier::High => format!("Source {domain} has a strong editorial track record."),
            CredibilityTier::Medium => format!("Source {domain} is generally reliable."),
            CredibilityTier::Low => format!("Source {domain} is known for unreliable reporting."),
            CredibilityTier::Satire => format!("Source {domain} publishes satire, not news."),
            CredibilityTier::Unknown => format!("Source {domain} is not in the credibility table."),
        };
        Scored {
            adjustment: tier.adjustment(),
            info: CredibilityInfo {
                domain: Some(domain),
                tier,
                explanation,
            },
        }
    }

    /// Built-in seed used when no table file is configured.
    pub(crate) fn default_seed() -> Self {
        let mut domains = HashMap::new();
        let mut aliases = HashMap::new();

        use CredibilityTier::*;
        for (d, t) in [
            ("reuters.com", High),
            ("apnews.com", High),
            ("bbc.com", High),
            ("aljazeera.com", High),
            ("premiumtimesng.com", High),
            ("thecable.ng", High),
            ("channelstv.com", High),
            ("punchng.com", High),
            ("guardian.ng", High),
            ("dailytrust.com", High),
            ("nan.ng", High),
            ("thisdaylive.com", Medium),
            ("vanguardngr.com", Medium),
            ("sunnewsonline.com", Medium),
            ("leadership.ng", Medium),
            ("tribuneonlineng.com", Medium),
            ("saharareporters.com", Medium),
            ("legit.ng", Medium),
            ("pulse.ng", Medium),
            ("infowars.com", Low),
            ("naturalnews.com", Low),
            ("beforeitsnews.com", Low),
            ("worldnewsdailyreport.com", Low),
            ("theonion.com", Satire),
            ("babylonbee.com", Satire),
            ("punocracy.com", Satire),
        ] {
            domains.insert(d.to_string(), t);
        }

        for (a, c) in [
            ("bbc.co.uk", "bbc.com"),
            ("reuters.co.uk", "reuters.com"),
            ("ap.org", "apnews.com"),
            ("naij.com", "legit.ng"),
            ("dailytrust.com.ng", "dailytrust.com"),
        ] {
            aliases.insert(a.to_string(), c.to_string());
        }

        Self { domains, aliases }
    }
}

/// Host of a URL; bare domains ("punchng.com/x") are accepted.
fn host_of(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let parsed = Url::parse(raw).or_else(|_| Url::parse(&format!("https://{raw}"))).ok()?;
    parsed.host_str().map(normalize_domain).filter(|h| h.contains('.'))
}

fn normalize_domain(d: &str) -> String {
    let mut out = d.trim().trim_end_matches('.').to_ascii_lowercase();
    for prefix in ["www.", "m.", "amp."] {
        if let Some(rest) = out.strip_prefix(prefix) {
            out = rest.to_string();
        }
    }
    out
}
