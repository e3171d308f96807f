//! Replacement policies: the new Clifford angle of each selected rotation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::clifford::{closest_clifford, probabilistic_clifford, random_clifford};
use crate::encode::GateRecord;
use crate::error::TrainError;

/// How a selected rotation's new angle is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplacementMethod {
    /// Nearest Clifford angle, ties broken at random.
    #[default]
    #[serde(alias = "nearest")]
    Closest,
    /// Uniform Clifford angle.
    Random,
    /// Clifford angle drawn from the distance-weighted distribution.
    Probabilistic,
}

impl ReplacementMethod {
    /// Accepted spellings, for error messages and help text.
    pub const VARIANTS: &'static [&'static str] = &["closest", "random", "probabilistic"];

    /// Draw the new angle for a gate currently at `angle`.
    pub fn replace_angle<R: Rng + ?Sized>(self, angle: f64, sigma: f64, rng: &mut R) -> f64 {
        match self {
            Self::Closest => closest_clifford(angle, rng),
            Self::Random => random_clifford(rng),
            Self::Probabilistic => probabilistic_clifford(angle, sigma, rng),
        }
    }
}

impl FromStr for ReplacementMethod {
    type Err = TrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "closest" | "nearest" => Ok(Self::Closest),
            "random" => Ok(Self::Random),
            "probabilistic" => Ok(Self::Probabilistic),
            _ => Err(TrainError::invalid(format!(
                "method_replace must be one of {:?}, got \"{s}\"",
                Self::VARIANTS
            ))),
        }
    }
}

impl fmt::Display for ReplacementMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Closest => "closest",
            Self::Random => "random",
            Self::Probabilistic => "probabilistic",
        })
    }
}

/// Rewritten records plus the angle bookkeeping, all in selection order.
#[derive(Debug, Clone, Default)]
pub struct Replacement {
    /// Copies of the selected records carrying their new angles.
    pub records: Vec<GateRecord>,
    /// Angles before replacement.
    pub original_angles: Vec<f64>,
    /// Angles after replacement.
    pub replaced_angles: Vec<f64>,
}

/// Assign a new Clifford angle to every record in `selected`.
pub fn replace_selected<R: Rng + ?Sized>(
    selected: &[GateRecord],
    method: ReplacementMethod,
    sigma: f64,
    rng: &mut R,
) -> Replacement {
    let mut out = Replacement {
        records: Vec::with_capacity(selected.len()),
        original_angles: Vec::with_capacity(selected.len()),
        replaced_angles: Vec::with_capacity(selected.len()),
    };
    for record in selected {
        let Some(angle) = record.angle else {
            // Only rotations are ever selected.
            out.records.push(record.clone());
            continue;
        };
        let new_angle = method.replace_angle(angle, sigma, rng);
        out.records.push(record.with_angle(new_angle));
        out.original_angles.push(angle);
        out.replaced_angles.push(new_angle);
    }
    out
}
