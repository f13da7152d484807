// src/config.rs
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path, path::PathBuf};
use tracing::warn;

use crate::context::ContextSettings;
use crate::credibility::SourceCredibility;
use crate::error::ConfigError;
use crate::terms::TermPattern;
use crate::trust::TrustSettings;

pub const DEFAULT_CONFIG_PATH: &str = "config/biaslens.toml";
pub const ENV_BIASLENS_CONFIG_PATH: &str = "BIASLENS_CONFIG_PATH";

fn default_neutral_threshold() -> f64 {
    0.3
}
fn default_neutral_upper() -> f64 {
    0.6
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiaslensConfig {
    pub context: ContextSettings,
    pub trust: TrustSettings,
    /// Appended to the built-in term tables.
    pub extra_terms: Vec<TermPattern>,
    /// JSON domain → tier table; the built-in seed is used when unset.
    pub credibility_table: Option<PathBuf>,
}

impl BiaslensConfig {
    /// Resolve the path from `BIASLENS_CONFIG_PATH` (default `config/biaslens.toml`).
    pub fn path() -> PathBuf {
        std::env::var(ENV_BIASLENS_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Missing file → defaults. Unreadable or malformed file → error.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_file(Self::path())
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(target: "config", error = %e, "falling back to built-in defaults");
                Self::default()
            }
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = match fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        Self::from_toml_str(&data).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        let mut cfg: Self = toml::from_str(s)?;
        cfg.sanitize();
        Ok(cfg)
    }

    /// Credibility table from `credibility_table`, or the seed when unset or unreadable.
    pub fn credibility(&self) -> SourceCredibility {
        let Some(path) = &self.credibility_table else {
            return SourceCredibility::default();
        };
        SourceCredibility::load_from_file(path).unwrap_or_else(|e| {
            warn!(target: "config", error = %e, "credibility table unusable, using seed");
            SourceCredibility::default()
        })
    }

    fn sanitize(&mut self) {
        let c = &mut self.context;
        if c.general_window == 0 {
            c.general_window = ContextSettings::default().general_window;
        }
        if c.neutral_window == 0 {
            c.neutral_window = ContextSettings::default().neutral_window;
        }
        if !(0.0..=1.0).contains(&c.neutral_threshold) {
            c.neutral_threshold = default_neutral_threshold();
        }
        if !(0.0..=1.0).contains(&c.neutral_upper) {
            c.neutral_upper = default_neutral_upper();
        }
        if c.neutral_threshold > c.neutral_upper {
            std::mem::swap(&mut c.neutral_threshold, &mut c.neutral_upper);
        }
        if !(0.0..=1.0).contains(&c.high_threshold) {
            c.high_threshold = ContextSettings::default().high_threshold;
        }
        if !(0.0..=1.0).contains(&c.medium_threshold) {
            c.medium_threshold = ContextSettings::default().medium_threshold;
        }
        if c.medium_threshold > c.high_threshold {
            std::mem::swap(&mut c.medium_threshold, &mut c.high_threshold);
        }

        let t = &mut self.trust;
        let d = TrustSettings::default();
        let finite_nonneg = |x: f64| x.is_finite() && x >= 0.0;
        if !(finite_nonneg(t.knee_low) && finite_nonneg(t.knee_high)) || t.knee_low > t.knee_high {
            t.knee_low = d.knee_low;
            t.knee_high = d.knee_high;
        }
        if !(0.0..=1.0).contains(&t.mid_factor) {
            t.mid_factor = d.mid_factor;
        }
        if !(0.0..=1.0).contains(&t.high_factor) {
            t.high_factor = d.high_factor;
        }
        for (v, dv) in [
            (&mut t.balance_bonus, d.balance_bonus),
            (&mut t.near_neutral_bonus, d.near_neutral_bonus),
            (&mut t.mild_bonus, d.mild_bonus),
        ] {
            if !finite_nonneg(*v) {
                *v = dv;
            }
        }

        self.extra_terms = std::mem::take(&mut self.extra_terms)
            .into_iter()
            .map(TermPattern::normalized)
            .filter(|t| !t.term.is_empty())
            .collect();
    }
}
