//! Importance sampling of pixel positions from the combined error field
//!
//! The combined map weights each pixel by its current reconstruction error,
//! damped where local variance is high so the search prefers large low-detail
//! regions over pixel noise. Sampling goes through a flattened prefix-sum CDF
//! and an inverse lookup; the CDF is rebuilt whenever any cell of the
//! combined map changes.

use crate::math::probability::{inverse_cdf_index, prefix_sum_cdf, uniform_cdf};
use crate::spatial::Rect;
use ndarray::Array2;
use rand::Rng;
use rand::rngs::StdRng;

/// Weighted-random pixel position sampler over the combined error map
#[derive(Debug, Clone)]
pub struct ImportanceSampler {
    combined: Array2<f64>,
    cdf: Vec<f64>,
    var_alpha: f64,
}

impl ImportanceSampler {
    /// Build the sampler from the initial error and variance maps
    pub fn new(error_map: &Array2<f64>, variance_map: &Array2<f32>, var_alpha: f32) -> Self {
        let mut sampler = Self {
            combined: Array2::zeros(error_map.dim()),
            cdf: Vec::new(),
            var_alpha: f64::from(var_alpha),
        };
        sampler.rebuild(error_map, variance_map);
        sampler
    }

    /// Recompute the combined map over the full image and rebuild the CDF
    pub fn rebuild(&mut self, error_map: &Array2<f64>, variance_map: &Array2<f32>) {
        let (rows, cols) = error_map.dim();
        for i in 0..rows {
            for j in 0..cols {
                self.combined[[i, j]] = combine(error_map[[i, j]], variance_map[[i, j]], self.var_alpha);
            }
        }
        self.rebuild_cdf();
    }

    /// Recompute the combined map inside `region` only, then rebuild the CDF
    ///
    /// The region is the committed rectangle padded by the caller; everything
    /// outside it is untouched, which bounds the refresh to the changed area.
    /// The CDF rebuild itself still spans the whole image and is the one
    /// non-sub-linear per-round cost.
    pub fn refresh_region(&mut self, error_map: &Array2<f64>, variance_map: &Array2<f32>, region: Rect) {
        for i in region.row_span() {
            for j in region.col_span() {
                self.combined[[i, j]] = combine(error_map[[i, j]], variance_map[[i, j]], self.var_alpha);
            }
        }
        self.rebuild_cdf();
    }

    /// Draw `count` independent weighted pixel positions as `(row, col)`
    pub fn sample(&self, count: usize, rng: &mut StdRng) -> Vec<(usize, usize)> {
        let cols = self.combined.dim().1;
        (0..count)
            .map(|_| {
                let draw = rng.random::<f64>();
                let flat = inverse_cdf_index(&self.cdf, draw);
                (flat / cols, flat % cols)
            })
            .collect()
    }

    /// The current combined weight map
    pub const fn combined(&self) -> &Array2<f64> {
        &self.combined
    }

    /// The current flattened CDF
    pub fn cdf(&self) -> &[f64] {
        &self.cdf
    }

    // Degenerate mass (all-zero error, or numeric collapse) falls back to a
    // uniform distribution; sampling never fails
    fn rebuild_cdf(&mut self) {
        self.cdf = prefix_sum_cdf(self.combined.iter().copied())
            .unwrap_or_else(|| uniform_cdf(self.combined.len()));
    }
}

// Error damped by local variance: high-variance neighborhoods yield less
// probability mass per unit of error
fn combine(error: f64, variance: f32, var_alpha: f64) -> f64 {
    (error / (1.0 + f64::from(variance) * var_alpha)).max(0.0)
}
