//! Best-candidate selection without committing losers
//!
//! Every candidate is scored by the fitness the canvas would have after the
//! commit, computed from error-map sums alone; no canvas pixels move until
//! the round's single winner (if any) is applied. Only a strict improvement
//! over the pre-round fitness survives; ties and regressions are discarded,
//! so a round may select nothing.

use crate::algorithm::buffers::FrameBuffers;
use crate::spatial::Rect;

/// A scored candidate: the rectangle, its fill color, and the fitness the
/// canvas would reach if it were committed
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    /// Candidate rectangle
    pub rect: Rect,
    /// Mean target color inside the rectangle
    pub color: [f32; 3],
    /// Hypothetical post-commit fitness
    pub fitness: f64,
}

/// Score one candidate rectangle against the current buffers
pub fn evaluate(buffers: &FrameBuffers, rect: Rect) -> Candidate {
    let color = buffers.region_mean_color(rect);
    let old_err_sum = buffers.error_sum(rect);
    let new_err_sum = buffers.projected_error_sum(rect, color);
    let new_total = buffers.total_error() - old_err_sum + new_err_sum;
    Candidate {
        rect,
        color,
        fitness: new_total / buffers.num_pixels() as f64,
    }
}

/// Pick the strictly-improving candidate with the lowest hypothetical fitness
///
/// The baseline is the committed fitness before the round; a candidate that
/// merely matches it is not an improvement.
pub fn select_best<I>(buffers: &FrameBuffers, rects: I) -> Option<Candidate>
where
    I: IntoIterator<Item = Rect>,
{
    let mut best_fitness = buffers.fitness();
    let mut best = None;
    for rect in rects {
        let candidate = evaluate(buffers, rect);
        if candidate.fitness < best_fitness {
            best_fitness = candidate.fitness;
            best = Some(candidate);
        }
    }
    best
}
