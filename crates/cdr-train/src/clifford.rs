//! Clifford angle oracle.
//!
//! An `Rz(θ)` gate is Clifford exactly when θ is a multiple of π/2, i.e. one
//! of [`CLIFFORD_ANGLES`] after reduction modulo 2π. This module classifies
//! angles, projects them onto the Clifford set (nearest, uniformly random,
//! or distance-weighted), and provides the distance metric shared by the
//! probabilistic selection and replacement policies.
//!
//! The distance between `Rz(θ) ≃ diag(1, e^{iθ})` and the reference phase
//! gate `Sᵏ = diag(1, iᵏ)` is the Frobenius norm of their difference, which
//! reduces to `|e^{iθ} − iᵏ|`. The weight of each reference is
//! `exp(-(d/σ)²)`.
//!
//! Every function works on a single angle; callers map over sequences.
//! Randomness is always injected so that seeded runs are reproducible.

use num_complex::Complex64;
use rand::Rng;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::sampling::sample_index;

/// The four Clifford rotation angles, in canonical order.
pub const CLIFFORD_ANGLES: [f64; 4] = [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2];

/// Default tolerance for [`is_clifford_angle`].
pub const CLIFFORD_TOLERANCE: f64 = 1e-5;

/// Default width σ of the distance-weighted distributions.
pub const DEFAULT_SIGMA: f64 = 0.5;

/// Scaled coordinates closer than this to a half-integer midpoint are ties.
const TIE_TOLERANCE: f64 = 1e-6;

/// Midpoints (in units of π/2) that are broken at random.
const TIE_MIDPOINTS: [f64; 3] = [0.5, 1.5, 2.5];

/// `iᵏ` for the reference phase gates, aligned with [`CLIFFORD_ANGLES`].
const CLIFFORD_PHASES: [Complex64; 4] = [
    Complex64::new(1.0, 0.0),
    Complex64::new(0.0, 1.0),
    Complex64::new(-1.0, 0.0),
    Complex64::new(0.0, -1.0),
];

/// Reduce an angle into `[0, 2π)`.
#[inline]
fn reduce(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

/// Index of the nearest Clifford angle for a scaled coordinate in `[0, 4]`.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn nearest_index(scaled: f64) -> usize {
    (scaled.round() as usize) % CLIFFORD_ANGLES.len()
}

fn tie_midpoint(scaled: f64) -> Option<f64> {
    TIE_MIDPOINTS
        .into_iter()
        .find(|m| (scaled - m).abs() <= TIE_TOLERANCE)
}

/// Check whether `angle` is a Clifford angle, within [`CLIFFORD_TOLERANCE`].
pub fn is_clifford_angle(angle: f64) -> bool {
    is_clifford_angle_with_tolerance(angle, CLIFFORD_TOLERANCE)
}

/// Check whether `angle` lies within `tolerance` of a Clifford angle.
///
/// The comparison uses circular distance rather than the plain difference
/// between the reduced angle and its nearest Clifford angle. Angles just
/// below 2π (including tiny negative angles such as `-1e-9`) therefore count
/// as close to 0, where the plain difference would reject them.
pub fn is_clifford_angle_with_tolerance(angle: f64, tolerance: f64) -> bool {
    let reduced = reduce(angle);
    let nearest = CLIFFORD_ANGLES[nearest_index(reduced / FRAC_PI_2)];
    let diff = (reduced - nearest).abs();
    diff.min(TAU - diff) < tolerance
}

/// Project `angle` onto the nearest Clifford angle.
///
/// Angles exactly halfway between two Clifford angles (π/4, 3π/4, 5π/4)
/// are resolved by a fair coin flip drawn from `rng`.
pub fn closest_clifford<R: Rng + ?Sized>(angle: f64, rng: &mut R) -> f64 {
    let scaled = reduce(angle) / FRAC_PI_2;
    match tie_midpoint(scaled) {
        None => CLIFFORD_ANGLES[nearest_index(scaled)],
        Some(midpoint) => {
            let below = nearest_index(midpoint - 0.5);
            let index = if rng.gen_bool(0.5) {
                below
            } else {
                (below + 1) % CLIFFORD_ANGLES.len()
            };
            CLIFFORD_ANGLES[index]
        }
    }
}

/// Draw a Clifford angle uniformly at random.
pub fn random_clifford<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    CLIFFORD_ANGLES[rng.gen_range(0..CLIFFORD_ANGLES.len())]
}

/// Unnormalised weights `exp(-(dₖ/σ)²)` of `Rz(angle)` against each
/// reference Clifford phase gate, in [`CLIFFORD_ANGLES`] order.
pub fn angle_distance_weights(angle: f64, sigma: f64) -> [f64; 4] {
    let phase = Complex64::from_polar(1.0, reduce(angle));
    CLIFFORD_PHASES.map(|reference| {
        let distance = (phase - reference).norm();
        (-(distance / sigma).powi(2)).exp()
    })
}

/// Draw a Clifford angle with probability proportional to
/// [`angle_distance_weights`].
pub fn probabilistic_clifford<R: Rng + ?Sized>(angle: f64, sigma: f64, rng: &mut R) -> f64 {
    let weights = angle_distance_weights(angle, sigma);
    CLIFFORD_ANGLES[sample_index(&weights, rng)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::FRAC_PI_4;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn clifford_angles_are_fixed_points() {
        let mut rng = StdRng::seed_from_u64(0);
        for &c in &CLIFFORD_ANGLES {
            assert!(is_clifford_angle(c));
            assert_eq!(closest_clifford(c, &mut rng), c);
        }
    }

    #[test]
    fn multiples_outside_one_turn_are_clifford() {
        assert!(is_clifford_angle(-FRAC_PI_2));
        assert!(is_clifford_angle(5.0 * PI));
        assert!(is_clifford_angle(TAU));
        assert!(is_clifford_angle(-1e-9));
        assert!(!is_clifford_angle(FRAC_PI_4));
        assert!(!is_clifford_angle(0.1));
    }

    #[test]
    fn distance_wraps_around_a_full_turn() {
        assert!(is_clifford_angle(TAU - 1e-7));
        assert!(is_clifford_angle(-1e-6));
        assert!(!is_clifford_angle(TAU - 1e-4));
        assert!(is_clifford_angle_with_tolerance(-1e-4, 1e-3));
    }

    #[test]
    fn tolerance_is_respected() {
        assert!(is_clifford_angle(PI + 1e-6));
        assert!(!is_clifford_angle(PI + 1e-4));
        assert!(is_clifford_angle_with_tolerance(PI + 1e-4, 1e-3));
    }

    #[test]
    fn closest_rounds_to_nearest() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(closest_clifford(0.2, &mut rng), 0.0);
        assert_eq!(closest_clifford(1.4, &mut rng), FRAC_PI_2);
        assert_eq!(closest_clifford(3.0, &mut rng), PI);
        assert_eq!(closest_clifford(-1.4, &mut rng), 3.0 * FRAC_PI_2);
        // 7π/4 is not a tie midpoint: it rounds up to 2π ≡ 0.
        assert_eq!(closest_clifford(7.0 * FRAC_PI_4, &mut rng), 0.0);
        assert_eq!(closest_clifford(TAU - 0.1, &mut rng), 0.0);
    }

    #[test]
    fn ties_reach_both_neighbours() {
        let mut rng = StdRng::seed_from_u64(2);
        for (angle, low, high) in [
            (FRAC_PI_4, 0.0, FRAC_PI_2),
            (3.0 * FRAC_PI_4, FRAC_PI_2, PI),
            (5.0 * FRAC_PI_4, PI, 3.0 * FRAC_PI_2),
        ] {
            let draws: Vec<f64> = (0..64).map(|_| closest_clifford(angle, &mut rng)).collect();
            assert!(draws.iter().all(|&d| d == low || d == high));
            assert!(draws.contains(&low), "tie at {angle} never chose {low}");
            assert!(draws.contains(&high), "tie at {angle} never chose {high}");
        }
    }

    #[test]
    fn random_clifford_covers_the_set() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let a = random_clifford(&mut rng);
            let i = CLIFFORD_ANGLES.iter().position(|&c| c == a).unwrap();
            seen[i] = true;
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn distance_weights_peak_at_matching_angle() {
        let w = angle_distance_weights(0.0, DEFAULT_SIGMA);
        assert!((w[0] - 1.0).abs() < EPSILON);
        // |1 - i| = √2, so the weight is exp(-(√2 / 0.5)²) = exp(-8).
        assert!((w[1] - (-8.0_f64).exp()).abs() < EPSILON);
        // |1 - (-1)| = 2, so exp(-16).
        assert!((w[2] - (-16.0_f64).exp()).abs() < EPSILON);
        assert!((w[1] - w[3]).abs() < EPSILON);

        let w = angle_distance_weights(PI, DEFAULT_SIGMA);
        assert!((w[2] - 1.0).abs() < EPSILON);
    }

    #[test]
    fn distance_weights_are_periodic() {
        let a = angle_distance_weights(0.3, 0.7);
        let b = angle_distance_weights(0.3 + TAU, 0.7);
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < 1e-9);
        }
    }

    #[test]
    fn probabilistic_prefers_close_angles() {
        let mut rng = StdRng::seed_from_u64(4);
        let near_pi = (0..200)
            .filter(|_| probabilistic_clifford(PI - 0.05, DEFAULT_SIGMA, &mut rng) == PI)
            .count();
        assert!(near_pi > 190, "drew π only {near_pi}/200 times");
    }
}
