//! Weighted index sampling shared by the probabilistic policies.

use rand::Rng;

/// Draw one index with probability proportional to `weights` (CDF method).
///
/// The weights need not be normalised. When every weight is zero (for
/// example after `exp(-(d/σ)²)` underflows for a very narrow σ) the draw
/// falls back to uniform.
///
/// `weights` must be non-empty.
pub(crate) fn sample_index<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return rng.gen_range(0..weights.len());
    }

    let u = rng.r#gen::<f64>() * total;
    let mut cumsum = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumsum += w;
        if u < cumsum {
            return i;
        }
    }
    // Floating-point rounding: return the last index that can be drawn.
    weights
        .iter()
        .rposition(|&w| w > 0.0)
        .unwrap_or(weights.len() - 1)
}

/// Draw `amount` distinct indices by successive weighted draws, removing
/// each drawn index from the pool before the next draw.
///
/// Indices are returned in draw order. `amount` must not exceed
/// `weights.len()`.
pub(crate) fn sample_without_replacement<R: Rng + ?Sized>(
    weights: &[f64],
    amount: usize,
    rng: &mut R,
) -> Vec<usize> {
    debug_assert!(amount <= weights.len());

    let mut pool: Vec<usize> = (0..weights.len()).collect();
    let mut chosen = Vec::with_capacity(amount);
    for _ in 0..amount {
        let pool_weights: Vec<f64> = pool.iter().map(|&i| weights[i]).collect();
        let k = sample_index(&pool_weights, rng);
        chosen.push(pool.remove(k));
    }
    chosen
}
