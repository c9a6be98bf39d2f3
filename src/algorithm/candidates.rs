//! Candidate rectangle generation from sampled pixel positions
//!
//! A sampled pixel anchors a rectangle whose maximum extent follows the
//! round-dependent sigmoid schedule, shrunk where the local variance says the
//! neighborhood is busy. Width and height are then drawn independently so
//! candidate shapes stay diverse rather than collapsing to squares.

use crate::math::schedule::{sigmoid_extent, variance_damping};
use crate::spatial::Rect;
use rand::Rng;
use rand::rngs::StdRng;

/// Turns sampled pixels into concrete candidate rectangles
#[derive(Debug, Clone, Copy)]
pub struct CandidateGenerator {
    rounds: usize,
    min_size: usize,
    steepness: f32,
    damping: f32,
    rows: usize,
    cols: usize,
    max_size: usize,
}

impl CandidateGenerator {
    /// Create a generator for a `rows × cols` image
    ///
    /// The scheduled maximum extent is capped at the shorter image side.
    pub fn new(rows: usize, cols: usize, rounds: usize, min_size: usize, steepness: f32, damping: f32) -> Self {
        Self {
            rounds,
            min_size,
            steepness,
            damping,
            rows,
            cols,
            max_size: rows.min(cols),
        }
    }

    /// Propose a rectangle anchored at `pixel` for the given round
    ///
    /// Returns `None` when clamping to the image bounds leaves no area; such
    /// candidates are skipped, not evaluated.
    pub fn propose(
        &self,
        pixel: (usize, usize),
        round: usize,
        local_var: f32,
        rng: &mut StdRng,
    ) -> Option<Rect> {
        let base = sigmoid_extent(round, self.rounds, self.max_size, self.min_size, self.steepness);
        let scale = variance_damping(local_var, self.damping);
        let damped = ((base as f32 * scale) as usize).max(self.min_size);

        let w = rng.random_range(self.min_size..=damped);
        let h = rng.random_range(self.min_size..=damped);

        Rect::from_anchor(pixel.0, pixel.1, w, h, self.rows, self.cols)
    }
}
