//! Generation settings loaded from YAML and the environment.
//!
//! Precedence, highest first:
//! 1. Environment variables (`CDR_` prefix)
//! 2. Configuration file
//! 3. Default values

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::encode::UnsupportedGatePolicy;
use crate::error::{TrainError, TrainResult};
use crate::options::SigmaOptions;
use crate::replace::ReplacementMethod;
use crate::select::SelectionMethod;
use crate::training::TrainingSetGenerator;

/// Settings for one training-set generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrainingConfig {
    #[serde(default = "default_num_training_circuits")]
    pub num_training_circuits: usize,

    #[serde(default = "default_fraction_non_clifford")]
    pub fraction_non_clifford: f64,

    #[serde(default)]
    pub method_select: SelectionMethod,

    #[serde(default)]
    pub method_replace: ReplacementMethod,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigma_select: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigma_replace: Option<f64>,

    /// Fixed RNG seed; absent means OS entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    #[serde(default)]
    pub unsupported_gates: UnsupportedGatePolicy,
}

fn default_num_training_circuits() -> usize {
    10
}

fn default_fraction_non_clifford() -> f64 {
    0.2
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_training_circuits: default_num_training_circuits(),
            fraction_non_clifford: default_fraction_non_clifford(),
            method_select: SelectionMethod::default(),
            method_replace: ReplacementMethod::default(),
            sigma_select: None,
            sigma_replace: None,
            seed: None,
            unsupported_gates: UnsupportedGatePolicy::default(),
        }
    }
}

fn parse_env<T>(key: &str, value: &str) -> TrainResult<T>
where
    T: FromStr,
{
    value
        .trim()
        .parse()
        .map_err(|_| TrainError::Config(format!("{key}: cannot parse \"{value}\"")))
}

impl TrainingConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> TrainResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TrainError::Config(format!("{}: {e}", path.display())))?;
        Self::from_yaml_str(&contents)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml_str(contents: &str) -> TrainResult<Self> {
        serde_yaml_ng::from_str(contents).map_err(|e| TrainError::Config(e.to_string()))
    }

    /// Load with precedence: defaults, then the optional file, then `CDR_*`
    /// environment variables. The result is validated.
    pub fn load(config_file: Option<&Path>) -> TrainResult<Self> {
        let config = Self::load_unvalidated(config_file)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`load`](Self::load), but leaves range checks to the caller so
    /// further overrides can be layered on first.
    pub fn load_unvalidated(config_file: Option<&Path>) -> TrainResult<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.merge_env()
    }

    /// Apply overrides from the process environment.
    pub fn merge_env(self) -> TrainResult<Self> {
        self.merge_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    ///
    /// Only variables that are present override the current values.
    pub fn merge_env_with<F>(mut self, lookup: F) -> TrainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("CDR_NUM_TRAINING_CIRCUITS") {
            self.num_training_circuits = parse_env("CDR_NUM_TRAINING_CIRCUITS", &v)?;
        }
        if let Some(v) = lookup("CDR_FRACTION_NON_CLIFFORD") {
            self.fraction_non_clifford = parse_env("CDR_FRACTION_NON_CLIFFORD", &v)?;
        }
        if let Some(v) = lookup("CDR_METHOD_SELECT") {
            self.method_select = v.parse()?;
        }
        if let Some(v) = lookup("CDR_METHOD_REPLACE") {
            self.method_replace = v.parse()?;
        }
        if let Some(v) = lookup("CDR_SIGMA_SELECT") {
            self.sigma_select = Some(parse_env("CDR_SIGMA_SELECT", &v)?);
        }
        if let Some(v) = lookup("CDR_SIGMA_REPLACE") {
            self.sigma_replace = Some(parse_env("CDR_SIGMA_REPLACE", &v)?);
        }
        if let Some(v) = lookup("CDR_SEED") {
            self.seed = Some(parse_env("CDR_SEED", &v)?);
        }
        if let Some(v) = lookup("CDR_UNSUPPORTED_GATES") {
            self.unsupported_gates = v.parse()?;
        }
        Ok(self)
    }

    /// Check value ranges.
    pub fn validate(&self) -> TrainResult<()> {
        if self.num_training_circuits == 0 {
            return Err(TrainError::invalid(
                "num_training_circuits must be at least 1",
            ));
        }
        let f = self.fraction_non_clifford;
        if !f.is_finite() || !(0.0..=1.0).contains(&f) {
            return Err(TrainError::invalid(format!(
                "fraction_non_clifford must lie in [0, 1], got {f}"
            )));
        }
        self.sigma_options().resolve()?;
        Ok(())
    }

    pub fn sigma_options(&self) -> SigmaOptions {
        SigmaOptions {
            sigma_select: self.sigma_select,
            sigma_replace: self.sigma_replace,
        }
    }

    /// Build the generator these settings describe.
    pub fn generator(&self) -> TrainingSetGenerator {
        TrainingSetGenerator::new(self.num_training_circuits, self.fraction_non_clifford)
            .with_selection(self.method_select)
            .with_replacement(self.method_replace)
            .with_options(self.sigma_options())
            .with_unsupported_gates(self.unsupported_gates)
    }

    /// RNG seeded from `seed`, or from OS entropy when unset.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
