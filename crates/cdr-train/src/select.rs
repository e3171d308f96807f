//! Selection policies: which non-Clifford rotations get replaced.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::clifford::angle_distance_weights;
use crate::encode::GateRecord;
use crate::error::TrainError;
use crate::sampling::sample_without_replacement;

/// How the gates to replace are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMethod {
    /// Uniformly, without replacement.
    #[default]
    Random,
    /// Weighted towards gates that are already nearly Clifford.
    Probabilistic,
}

impl SelectionMethod {
    /// Accepted spellings, for error messages and help text.
    pub const VARIANTS: &'static [&'static str] = &["random", "probabilistic"];
}

impl FromStr for SelectionMethod {
    type Err = TrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "probabilistic" => Ok(Self::Probabilistic),
            _ => Err(TrainError::invalid(format!(
                "method_select must be one of {:?}, got \"{s}\"",
                Self::VARIANTS
            ))),
        }
    }
}

impl fmt::Display for SelectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Random => "random",
            Self::Probabilistic => "probabilistic",
        })
    }
}

/// Number of gates to replace so that `floor(fraction · total)` stay
/// non-Clifford.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn num_to_replace(total: usize, fraction: f64) -> usize {
    let keep = ((fraction * total as f64).floor() as usize).min(total);
    total - keep
}

/// Pick `amount` positions into `candidates`, in draw order.
///
/// Under [`SelectionMethod::Probabilistic`] each gate is weighted by the sum
/// of its distance weights with width `sigma`.
pub fn select<R: Rng + ?Sized>(
    candidates: &[GateRecord],
    amount: usize,
    method: SelectionMethod,
    sigma: f64,
    rng: &mut R,
) -> Vec<usize> {
    let amount = amount.min(candidates.len());
    match method {
        SelectionMethod::Random => {
            rand::seq::index::sample(rng, candidates.len(), amount).into_vec()
        }
        SelectionMethod::Probabilistic => {
            let weights: Vec<f64> = candidates
                .iter()
                .map(|r| {
                    r.angle
                        .map_or(0.0, |a| angle_distance_weights(a, sigma).iter().sum())
                })
                .collect();
            sample_without_replacement(&weights, amount, rng)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_lenient;
    use cdr_ir::{Circuit, QubitId};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    fn rotations(angles: &[f64]) -> Vec<GateRecord> {
        let mut c = Circuit::with_size("sel", 1, 0);
        for &a in angles {
            c.rz(a, QubitId(0)).unwrap();
        }
        encode_lenient(&c).records
    }

    #[test]
    fn replace_count_floors_the_kept_share() {
        assert_eq!(num_to_replace(10, 0.2), 8);
        assert_eq!(num_to_replace(7, 0.5), 4);
        assert_eq!(num_to_replace(5, 0.0), 5);
        assert_eq!(num_to_replace(5, 1.0), 0);
        assert_eq!(num_to_replace(0, 0.3), 0);
    }

    #[test]
    fn random_selection_is_distinct_and_in_range() {
        let records = rotations(&[0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
        let mut rng = StdRng::seed_from_u64(10);
        let mut picked = select(&records, 4, SelectionMethod::Random, 0.5, &mut rng);
        assert_eq!(picked.len(), 4);
        picked.sort_unstable();
        picked.dedup();
        assert_eq!(picked.len(), 4);
        assert!(picked.iter().all(|&i| i < records.len()));
    }

    #[test]
    fn probabilistic_selection_prefers_nearly_clifford() {
        // Index 0 sits next to π/2; index 1 is maximally far from every
        // Clifford angle.
        let records = rotations(&[FRAC_PI_2 - 0.01, FRAC_PI_4]);
        let mut rng = StdRng::seed_from_u64(11);
        let near_first = (0..400)
            .filter(|_| {
                select(&records, 1, SelectionMethod::Probabilistic, 0.1, &mut rng)[0] == 0
            })
            .count();
        assert!(near_first > 380, "nearly-Clifford gate chosen {near_first}/400");
    }

    #[test]
    fn amount_is_clamped() {
        let records = rotations(&[0.1, 0.2]);
        let mut rng = StdRng::seed_from_u64(12);
        assert_eq!(select(&records, 5, SelectionMethod::Random, 0.5, &mut rng).len(), 2);
    }

    #[test]
    fn method_parsing() {
        assert_eq!("random".parse::<SelectionMethod>().unwrap(), SelectionMethod::Random);
        assert_eq!(
            "Probabilistic".parse::<SelectionMethod>().unwrap(),
            SelectionMethod::Probabilistic
        );
        let err = "bogus".parse::<SelectionMethod>().unwrap_err();
        assert!(err.to_string().contains("probabilistic"));
        assert_eq!(SelectionMethod::Probabilistic.to_string(), "probabilistic");
    }
}
