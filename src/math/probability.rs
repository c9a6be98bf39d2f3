//! Discrete distribution helpers for inverse-CDF sampling
//!
//! The sampler draws pixel positions from a weight field by building a
//! prefix-sum cumulative distribution over the flattened field and mapping
//! uniform draws through a binary search. Degenerate weight fields (total
//! mass at or below zero) fall back to a uniform distribution rather than
//! failing, so sampling never errors.

/// Build a normalized prefix-sum CDF from non-negative weights
///
/// Returns `None` when the total mass is not strictly positive; callers
/// substitute [`uniform_cdf`] in that case. The final entry of a returned CDF
/// is forced to exactly 1.0 so the inverse lookup can never fall off the end
/// from accumulated rounding.
pub fn prefix_sum_cdf<I>(weights: I) -> Option<Vec<f64>>
where
    I: IntoIterator<Item = f64>,
{
    let mut cdf: Vec<f64> = Vec::new();
    let mut running = 0.0_f64;
    for w in weights {
        running += w.max(0.0);
        cdf.push(running);
    }
    if running <= 0.0 || !running.is_finite() {
        return None;
    }
    for value in &mut cdf {
        *value /= running;
    }
    if let Some(last) = cdf.last_mut() {
        *last = 1.0;
    }
    Some(cdf)
}

/// CDF of the uniform distribution over `len` cells
pub fn uniform_cdf(len: usize) -> Vec<f64> {
    let total = len as f64;
    (1..=len).map(|i| i as f64 / total).collect()
}

/// First index whose cumulative probability reaches `draw`
///
/// `draw` is expected in `[0, 1)`; the result is clamped to the final cell so
/// a draw of exactly 1.0 (or a CDF shortened by rounding) still resolves.
pub fn inverse_cdf_index(cdf: &[f64], draw: f64) -> usize {
    let idx = cdf.partition_point(|&cumulative| cumulative < draw);
    idx.min(cdf.len().saturating_sub(1))
}
