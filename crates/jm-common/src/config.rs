use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::matching::{relaxation::RelaxationConfig, scoring::ScoringConfig};

pub const ENV_MIN_PRIMARY_RESULTS: &str = "JM_RELAXATION_MIN_RESULTS";
pub const ENV_WEIGHT_SKILLS: &str = "JM_WEIGHT_SKILLS";
pub const ENV_WEIGHT_EXPERIENCE: &str = "JM_WEIGHT_EXPERIENCE";
pub const ENV_WEIGHT_WORKPLACE: &str = "JM_WEIGHT_WORKPLACE";
pub const ENV_WEIGHT_GOALS: &str = "JM_WEIGHT_GOALS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Tunable engine constants. Defaults reproduce the job board's behavior:
/// weights 40/30/20/10, neutral scores 25/15/10, fallback 50, threshold 3.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scoring: ScoringConfig,
    pub relaxation: RelaxationConfig,
}

impl EngineConfig {
    /// Defaults overridden by `JM_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// JSON config file (missing keys keep their defaults).
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), "loaded engine config");
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides from `lookup`; blank values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &'static str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(raw) = read(ENV_MIN_PRIMARY_RESULTS) {
            self.relaxation.min_primary_results =
                raw.trim().parse().map_err(|err: std::num::ParseIntError| {
                    ConfigError::InvalidValue {
                        key: ENV_MIN_PRIMARY_RESULTS,
                        value: raw.clone(),
                        reason: err.to_string(),
                    }
                })?;
        }

        let weights = &mut self.scoring.weights;
        for (key, slot) in [
            (ENV_WEIGHT_SKILLS, &mut weights.skills),
            (ENV_WEIGHT_EXPERIENCE, &mut weights.experience),
            (ENV_WEIGHT_WORKPLACE, &mut weights.workplace),
            (ENV_WEIGHT_GOALS, &mut weights.goals),
        ] {
            if let Some(raw) = read(key) {
                *slot = parse_weight(key, &raw)?;
            }
        }

        self.validate()?;
        Ok(self)
    }

    /// Weights must be finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = self.scoring.weights;
        for (key, value) in [
            (ENV_WEIGHT_SKILLS, weights.skills),
            (ENV_WEIGHT_EXPERIENCE, weights.experience),
            (ENV_WEIGHT_WORKPLACE, weights.workplace),
            (ENV_WEIGHT_GOALS, weights.goals),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    key,
                    value: value.to_string(),
                    reason: "weight must be a finite, non-negative number".into(),
                });
            }
        }
        Ok(())
    }
}

fn parse_weight(key: &'static str, raw: &str) -> Result<f64, ConfigError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|err| ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
            reason: err.to_string(),
        })
}
