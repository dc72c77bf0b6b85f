//! Run configuration.
//!
//! A `SimulationConfig` is read from TOML; every field has a default, so an
//! empty file (or no file at all) describes the standard 100-episode run.
//!
//! ```toml
//! dataset = "data/mixed_citation_sources.csv"
//! output_dir = "out"
//! episodes = 100
//! seed = 42
//! threshold = 60.0
//! variant = "extended-misinformation"
//! malformed = "skip"
//! age = { source = "synthesized", min = 0, max = 365 }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use ancestor_contracts::error::{AncestorError, AncestorResult};
use ancestor_core::DEFAULT_THRESHOLD;
use ancestor_policy::{RuleTableScorer, Variant};

use crate::dataset::MalformedPolicy;
use crate::sampler::AgeSource;

pub const RESULTS_FILE: &str = "results.csv";
pub const CHART_FILE: &str = "trust_plot.svg";
pub const BUILD_LOG_FILE: &str = "build_log.txt";
pub const BUILD_LOG_JSON_FILE: &str = "build_log.json";

/// Everything one simulation run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Citation dataset CSV.
    pub dataset: PathBuf,
    /// Directory the results table, chart and build logs are written to.
    pub output_dir: PathBuf,
    pub episodes: u32,
    /// Seed for the run's single random source.
    pub seed: u64,
    pub threshold: f64,
    /// Built-in rule table, used unless `rules` names a file.
    pub variant: Variant,
    /// Optional rule-table TOML overriding `variant`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<PathBuf>,
    pub age: AgeSource,
    pub malformed: MalformedPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("public_citation_sources.csv"),
            output_dir: PathBuf::from("."),
            episodes: 100,
            seed: 42,
            threshold: DEFAULT_THRESHOLD,
            variant: Variant::default(),
            rules: None,
            age: AgeSource::default(),
            malformed: MalformedPolicy::default(),
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a TOML run configuration.
    pub fn from_toml_str(s: &str) -> AncestorResult<Self> {
        let config: SimulationConfig = toml::from_str(s).map_err(|e| AncestorError::ConfigError {
            reason: format!("failed to parse run config TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> AncestorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| AncestorError::ConfigError {
            reason: format!("failed to read run config '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> AncestorResult<()> {
        if !self.threshold.is_finite() {
            return Err(AncestorError::ConfigError {
                reason: format!("threshold {} must be a finite number", self.threshold),
            });
        }
        if let AgeSource::Synthesized { min, max } = self.age {
            if min > max {
                return Err(AncestorError::ConfigError {
                    reason: format!("synthesized age range {min}..={max} is empty"),
                });
            }
        }
        Ok(())
    }

    /// Build the scorer this config selects: the `rules` file if given,
    /// otherwise the named variant.
    pub fn scorer(&self) -> AncestorResult<RuleTableScorer> {
        match &self.rules {
            Some(path) => RuleTableScorer::from_file(path),
            None => RuleTableScorer::for_variant(self.variant),
        }
    }

    pub fn results_path(&self) -> PathBuf {
        self.output_dir.join(RESULTS_FILE)
    }

    pub fn chart_path(&self) -> PathBuf {
        self.output_dir.join(CHART_FILE)
    }

    pub fn build_log_path(&self) -> PathBuf {
        self.output_dir.join(BUILD_LOG_FILE)
    }

    pub fn build_log_json_path(&self) -> PathBuf {
        self.output_dir.join(BUILD_LOG_JSON_FILE)
    }
}
