//! Round orchestration: sampling, selection, commits, and map refresh
//!
//! A [`Decomposer`] owns all per-call state (buffers, variance field,
//! sampler, RNG, round counter) and is constructed fresh per frame. Rounds
//! execute strictly in sequence; each round's sampling distribution depends
//! on the previous round's commit. Termination is by exhausting the
//! configured round count, never by an error threshold, which keeps per-frame
//! cost bounded and predictable.

use crate::algorithm::buffers::{FrameBuffers, flat_canvas, mean_color};
use crate::algorithm::candidates::CandidateGenerator;
use crate::algorithm::sampler::ImportanceSampler;
use crate::algorithm::selection::{Candidate, select_best};
use crate::analysis::variance::{absolute_difference, local_variance, luminance};
use crate::io::configuration::{
    CANDIDATES_BASE, DEFAULT_MIN_SIZE, DEFAULT_ROUNDS, DEFAULT_STEEPNESS, MAX_CANDIDATES,
    VAR_ALPHA, VAR_WINDOW, VARIANCE_DAMPING_K,
};
use crate::io::error::{DecomposeError, Result, invalid_parameter};
use crate::io::visualization::VisualizationCapture;
use crate::math::schedule::candidate_count;
use crate::spatial::Rect;
use ndarray::{Array2, Array3};
use rand::rngs::StdRng;

/// Tuning parameters for one decomposition call
///
/// See [`crate::io::configuration`] for the default constants.
#[derive(Debug, Clone, Copy)]
pub struct DecomposerConfig {
    /// Number of rounds; each round commits at most one block
    pub rounds: usize,
    /// Base term of the candidate count schedule
    pub candidates_base: usize,
    /// Ceiling of the candidate count schedule
    pub max_candidates: usize,
    /// Smallest rectangle extent ever proposed
    pub min_size: usize,
    /// Steepness of the sigmoid size schedule
    pub steepness: f32,
    /// Side length of the local variance window
    pub var_window: usize,
    /// Damping constant dividing error by local variance in the sampler
    pub var_alpha: f32,
    /// Damping constant shrinking candidate extents by local variance
    pub damping: f32,
}

impl Default for DecomposerConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            candidates_base: CANDIDATES_BASE,
            max_candidates: MAX_CANDIDATES,
            min_size: DEFAULT_MIN_SIZE,
            steepness: DEFAULT_STEEPNESS,
            var_window: VAR_WINDOW,
            var_alpha: VAR_ALPHA,
            damping: VARIANCE_DAMPING_K,
        }
    }
}

impl DecomposerConfig {
    /// Validate parameter ranges
    ///
    /// # Errors
    ///
    /// Returns [`DecomposeError::InvalidParameter`] for a zero round count,
    /// candidate ceiling, window, or minimum size.
    pub fn validate(&self) -> Result<()> {
        if self.rounds == 0 {
            return Err(invalid_parameter("rounds", &self.rounds, &"must be at least 1"));
        }
        if self.max_candidates == 0 {
            return Err(invalid_parameter("max_candidates", &self.max_candidates, &"must be at least 1"));
        }
        if self.min_size == 0 {
            return Err(invalid_parameter("min_size", &self.min_size, &"must be at least 1"));
        }
        if self.var_window == 0 {
            return Err(invalid_parameter("var_window", &self.var_window, &"must be at least 1"));
        }
        Ok(())
    }
}

/// A committed rectangle with its solid fill color
///
/// `x`/`w` index rows, `y`/`h` index columns (see [`Rect`]). The color is
/// the committed average RGB quantized to 0–255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// First row covered
    pub x: usize,
    /// First column covered
    pub y: usize,
    /// Extent along rows
    pub w: usize,
    /// Extent along columns
    pub h: usize,
    /// Committed average color, 0–255 RGB
    pub color: [u8; 3],
}

impl Block {
    /// Build a block from a rectangle and its unquantized mean color
    pub fn new(rect: Rect, color: [f32; 3]) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
            color: quantize_color(color),
        }
    }

    /// The covered rectangle
    pub const fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        }
    }

    /// Hex encoding of the color, `#rrggbb`
    pub fn hex_color(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.color[0], self.color[1], self.color[2])
    }
}

/// Quantize a [0,1] float color to 0–255 bytes, rounded and clamped
pub fn quantize_color(color: [f32; 3]) -> [u8; 3] {
    let q = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
    [q(color[0]), q(color[1]), q(color[2])]
}

/// Result of a completed decomposition call
#[derive(Debug, Clone)]
pub struct Decomposition {
    /// Committed blocks in commit order
    pub blocks: Vec<Block>,
    /// Final canvas, reusable as the next call's previous canvas
    pub canvas: Array3<f32>,
    /// Final mean squared error per pixel
    pub fitness: f64,
}

/// One decomposition call over a single target frame
#[derive(Debug)]
pub struct Decomposer {
    buffers: FrameBuffers,
    variance_map: Array2<f32>,
    sampler: ImportanceSampler,
    generator: CandidateGenerator,
    config: DecomposerConfig,
    rng: StdRng,
    blocks: Vec<Block>,
    round: usize,
    visualization: Option<VisualizationCapture>,
}

impl Decomposer {
    /// Set up a decomposition of `target`, warm-started from `previous`
    /// when its shape matches
    ///
    /// A `previous` canvas of mismatched shape is discarded and the call
    /// cold-starts instead; that is the one explicit fallback branch, never
    /// an error. A cold start fills the canvas with the target's flat mean
    /// color and prepends the full-canvas background block. The variance
    /// field is computed once here: from the luminance of |target −
    /// previous| on a warm start, from the target's own luminance otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`DecomposeError::InvalidDimensions`] for an empty image,
    /// [`DecomposeError::InvalidParameter`] for a non-RGB buffer or an
    /// out-of-range configuration value.
    pub fn new(
        target: Array3<f32>,
        previous: Option<Array3<f32>>,
        config: DecomposerConfig,
        rng: StdRng,
    ) -> Result<Self> {
        let (rows, cols, channels) = target.dim();
        if rows == 0 || cols == 0 {
            return Err(DecomposeError::InvalidDimensions { rows, cols });
        }
        if channels != 3 {
            return Err(invalid_parameter("target", &channels, &"expected 3 color channels"));
        }
        config.validate()?;

        let warm = previous.filter(|prev| prev.dim() == target.dim());
        let (canvas, blocks, signal) = match warm {
            Some(prev) => {
                let signal = luminance(&absolute_difference(&target, &prev));
                (prev, Vec::new(), signal)
            }
            None => {
                let background = mean_color(&target);
                let canvas = flat_canvas(rows, cols, background);
                let signal = luminance(&target);
                let blocks = vec![Block::new(Rect::full(rows, cols), background)];
                (canvas, blocks, signal)
            }
        };

        let variance_map = local_variance(&signal, config.var_window);
        let buffers = FrameBuffers::new(target, canvas);
        let sampler = ImportanceSampler::new(buffers.error_map(), &variance_map, config.var_alpha);
        let generator = CandidateGenerator::new(
            rows,
            cols,
            config.rounds,
            config.min_size,
            config.steepness,
            config.damping,
        );

        Ok(Self {
            buffers,
            variance_map,
            sampler,
            generator,
            config,
            rng,
            blocks,
            round: 0,
            visualization: None,
        })
    }

    /// Record commits for later GIF export of the progressive reconstruction
    pub fn enable_visualization(&mut self) {
        self.visualization = Some(VisualizationCapture::new(self.buffers.canvas()));
    }

    /// Access the visualization capture, if enabled
    pub const fn visualization(&self) -> Option<&VisualizationCapture> {
        self.visualization.as_ref()
    }

    /// Whether all rounds have executed
    pub const fn is_done(&self) -> bool {
        self.round >= self.config.rounds
    }

    /// Rounds executed so far
    pub const fn round(&self) -> usize {
        self.round
    }

    /// Current committed fitness (mean squared error per pixel)
    pub fn fitness(&self) -> f64 {
        self.buffers.fitness()
    }

    /// Blocks committed so far, in commit order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The current reconstruction
    pub const fn canvas(&self) -> &Array3<f32> {
        self.buffers.canvas()
    }

    /// Execute one round; returns whether a block was committed
    ///
    /// Samples candidate positions from the importance distribution, turns
    /// them into rectangles, and commits the single strictly-improving
    /// winner if one exists. A winnerless round is a no-op that still counts
    /// toward the round cap. Returns `false` without effect once all rounds
    /// have executed.
    pub fn execute_round(&mut self) -> bool {
        if self.is_done() {
            return false;
        }
        let count = candidate_count(
            self.round,
            self.config.rounds,
            self.config.candidates_base,
            self.config.max_candidates,
        );
        let positions = self.sampler.sample(count, &mut self.rng);
        let mut rects = Vec::with_capacity(positions.len());
        for position in positions {
            let local_var = self.variance_map[[position.0, position.1]];
            if let Some(rect) = self.generator.propose(position, self.round, local_var, &mut self.rng) {
                rects.push(rect);
            }
        }

        let winner = select_best(&self.buffers, rects);
        let committed = winner.is_some();
        if let Some(candidate) = winner {
            self.commit(candidate);
        }
        self.round += 1;
        committed
    }

    /// Run all remaining rounds and return the finished decomposition
    pub fn run(mut self) -> Decomposition {
        while !self.is_done() {
            self.execute_round();
        }
        self.finish()
    }

    /// Finish early (or after `run`-style driving) and take the results
    pub fn finish(self) -> Decomposition {
        Decomposition {
            blocks: self.blocks,
            fitness: self.buffers.fitness(),
            canvas: self.buffers.into_canvas(),
        }
    }

    // Apply the winner, append its block, and refresh the sampler over the
    // commit's padded bounding box
    fn commit(&mut self, candidate: Candidate) {
        self.buffers.apply(candidate.rect, candidate.color);
        let block = Block::new(candidate.rect, candidate.color);
        if let Some(viz) = &mut self.visualization {
            viz.record_commit(block);
        }
        self.blocks.push(block);

        let pad = candidate.rect.refresh_padding();
        let region = candidate.rect.padded(pad, self.buffers.rows(), self.buffers.cols());
        self.sampler
            .refresh_region(self.buffers.error_map(), &self.variance_map, region);
    }
}
