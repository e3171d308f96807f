//! Width parameters of the probabilistic policies.

use serde::{Deserialize, Serialize};

use crate::clifford::DEFAULT_SIGMA;
use crate::error::{TrainError, TrainResult};

/// User-supplied σ values. Missing entries resolve to [`DEFAULT_SIGMA`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SigmaOptions {
    /// Width of the probabilistic selection distribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigma_select: Option<f64>,
    /// Width of the probabilistic replacement distribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigma_replace: Option<f64>,
}

/// Validated σ values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSigmas {
    pub select: f64,
    pub replace: f64,
}

impl SigmaOptions {
    /// Options with every value defaulted.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sigma_select(mut self, sigma: f64) -> Self {
        self.sigma_select = Some(sigma);
        self
    }

    #[must_use]
    pub fn with_sigma_replace(mut self, sigma: f64) -> Self {
        self.sigma_replace = Some(sigma);
        self
    }

    /// Build options from `key = value` pairs.
    ///
    /// Unknown keys and unparsable values are rejected, so any non-empty set
    /// of pairs names at least one σ.
    pub fn from_pairs<'a, I>(pairs: I) -> TrainResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = Self::default();
        for (key, value) in pairs {
            let key = key.trim();
            let slot = match key {
                "sigma_select" => &mut options.sigma_select,
                "sigma_replace" => &mut options.sigma_replace,
                other => {
                    return Err(TrainError::invalid(format!(
                        "unknown option \"{other}\"; expected sigma_select or sigma_replace"
                    )));
                }
            };
            let parsed: f64 = value.trim().parse().map_err(|_| {
                TrainError::invalid(format!("option {key} must be a number, got \"{value}\""))
            })?;
            *slot = Some(parsed);
        }
        Ok(options)
    }

    /// Apply defaults and check every σ is finite and positive.
    pub fn resolve(&self) -> TrainResult<ResolvedSigmas> {
        Ok(ResolvedSigmas {
            select: check_sigma("sigma_select", self.sigma_select)?,
            replace: check_sigma("sigma_replace", self.sigma_replace)?,
        })
    }
}

fn check_sigma(name: &str, value: Option<f64>) -> TrainResult<f64> {
    let sigma = value.unwrap_or(DEFAULT_SIGMA);
    if sigma.is_finite() && sigma > 0.0 {
        Ok(sigma)
    } else {
        Err(TrainError::invalid(format!(
            "{name} must be a positive number, got {sigma}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_to_half() {
        let r = SigmaOptions::new().resolve().unwrap();
        assert_eq!(r, ResolvedSigmas { select: 0.5, replace: 0.5 });
    }

    #[test]
    fn builder_overrides_one_value() {
        let r = SigmaOptions::new().with_sigma_replace(0.2).resolve().unwrap();
        assert_eq!(r.select, DEFAULT_SIGMA);
        assert_eq!(r.replace, 0.2);
    }

    #[test]
    fn pairs_are_parsed() {
        let o = SigmaOptions::from_pairs([("sigma_select", "0.3"), ("sigma_replace", " 1.5 ")])
            .unwrap();
        assert_eq!(o.sigma_select, Some(0.3));
        assert_eq!(o.sigma_replace, Some(1.5));
        assert_eq!(SigmaOptions::from_pairs(std::iter::empty()).unwrap(), SigmaOptions::default());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = SigmaOptions::from_pairs([("sigma", "0.3")]).unwrap_err();
        assert!(matches!(err, TrainError::InvalidArgument(_)));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(SigmaOptions::from_pairs([("sigma_select", "abc")]).is_err());
        assert!(SigmaOptions::new().with_sigma_select(0.0).resolve().is_err());
        assert!(SigmaOptions::new().with_sigma_replace(-1.0).resolve().is_err());
        assert!(SigmaOptions::new().with_sigma_select(f64::NAN).resolve().is_err());
    }
}
