//! Frame-to-frame continuity for live and video decomposition
//!
//! A session owns the canvas between frames: each processed frame warm-starts
//! from the previous frame's reconstruction, so consecutive frames stay
//! coherent and cheap to update. The canvas is exclusively owned here while
//! no call is in flight and exclusively owned by the decomposer during one,
//! matching the single-holder contract for carried canvases.

use crate::algorithm::decomposer::{Block, Decomposer, DecomposerConfig};
use crate::io::error::Result;
use ndarray::Array3;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Blocks and fitness produced for one frame of a stream
#[derive(Debug, Clone)]
pub struct FrameResult {
    /// Committed blocks in commit order
    pub blocks: Vec<Block>,
    /// Final mean squared error per pixel for the frame
    pub fitness: f64,
    /// Zero-based index of the frame within the session
    pub frame_index: u64,
}

/// Decomposes a sequence of frames with a carried canvas
pub struct StreamSession {
    config: DecomposerConfig,
    seed: u64,
    previous: Option<Array3<f32>>,
    frame_index: u64,
}

impl StreamSession {
    /// Create a session; each frame derives its RNG from `seed` and the
    /// frame index, so a replayed sequence reproduces exactly
    pub const fn new(config: DecomposerConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            previous: None,
            frame_index: 0,
        }
    }

    /// Decompose the next frame, warm-starting from the carried canvas
    ///
    /// A resolution change mid-stream shows up as a shape mismatch and
    /// downgrades that frame to a cold start inside the decomposer; the
    /// session then carries the new shape forward.
    ///
    /// # Errors
    ///
    /// Propagates decomposer construction errors (empty or non-RGB target,
    /// invalid configuration).
    pub fn process_frame(&mut self, target: Array3<f32>) -> Result<FrameResult> {
        let rng = StdRng::seed_from_u64(self.seed.wrapping_add(self.frame_index));
        let decomposer = Decomposer::new(target, self.previous.take(), self.config, rng)?;
        let result = decomposer.run();

        let frame_index = self.frame_index;
        self.frame_index += 1;
        self.previous = Some(result.canvas);

        Ok(FrameResult {
            blocks: result.blocks,
            fitness: result.fitness,
            frame_index,
        })
    }

    /// The carried canvas, if any frame has completed
    pub const fn canvas(&self) -> Option<&Array3<f32>> {
        self.previous.as_ref()
    }

    /// Seed the session from an externally persisted canvas
    ///
    /// Used to resume continuity across process invocations from the
    /// previous-frame artifact; a stale shape is harmless because the next
    /// frame falls back to a cold start.
    pub fn restore_canvas(&mut self, canvas: Array3<f32>) {
        self.previous = Some(canvas);
    }

    /// Frames processed so far
    pub const fn frames_processed(&self) -> u64 {
        self.frame_index
    }
}
