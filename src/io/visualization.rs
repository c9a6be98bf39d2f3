//! Commit capture and GIF export of the progressive reconstruction
//!
//! Records the starting canvas once plus each committed block, then replays
//! the commits at export time to encode one GIF frame per block. Replay
//! keeps the capture cheap during decomposition: no per-round canvas
//! snapshots, just the block records the algorithm produces anyway.

use crate::algorithm::decomposer::Block;
use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{DecomposeError, Result};
use image::{Frame, Rgba, RgbaImage};
use ndarray::Array3;
use std::path::Path;

/// Captures commits for later replay into an animated GIF
#[derive(Debug, Clone)]
pub struct VisualizationCapture {
    base: RgbaImage,
    commits: Vec<Block>,
}

impl VisualizationCapture {
    /// Snapshot the starting canvas
    pub fn new(canvas: &Array3<f32>) -> Self {
        let (rows, cols, _) = canvas.dim();
        let base = RgbaImage::from_fn(cols as u32, rows as u32, |x, y| {
            let channel = |c: usize| {
                let v = canvas[[y as usize, x as usize, c]].clamp(0.0, 1.0);
                (v * 255.0).round() as u8
            };
            Rgba([channel(0), channel(1), channel(2), 255])
        });
        Self {
            base,
            commits: Vec::new(),
        }
    }

    /// Record one committed block
    pub fn record_commit(&mut self, block: Block) {
        self.commits.push(block);
    }

    /// Number of recorded commits
    pub const fn commit_count(&self) -> usize {
        self.commits.len()
    }

    /// Export the replayed commits as an animated GIF
    ///
    /// The frame delay is clamped to the minimum viewers reliably honor, and
    /// the final frame is held longer so the finished reconstruction stays
    /// visible.
    ///
    /// # Errors
    ///
    /// Returns an error if no commits were recorded, the output directory
    /// cannot be created, or GIF encoding fails.
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.commits.is_empty() {
            return Err(DecomposeError::InvalidParameter {
                parameter: "visualization",
                value: "empty".to_string(),
                reason: "No commits captured for visualization".to_string(),
            });
        }

        let delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let mut frames = Vec::with_capacity(self.commits.len() + 2);
        let mut canvas = self.base.clone();
        frames.push(make_frame(canvas.clone(), delay_ms));

        for block in &self.commits {
            paint_block(&mut canvas, *block);
            frames.push(make_frame(canvas.clone(), delay_ms));
        }

        // Hold the finished reconstruction
        frames.push(make_frame(canvas, delay_ms * 25));

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| DecomposeError::FileSystem {
                    path: parent.to_path_buf(),
                    operation: "create directory",
                    source: e,
                })?;
            }
        }

        let file = std::fs::File::create(output_path).map_err(|e| DecomposeError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| DecomposeError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }
}

fn make_frame(img: RgbaImage, delay_ms: u32) -> Frame {
    Frame::from_parts(img, 0, 0, image::Delay::from_numer_denom_ms(delay_ms, 1))
}

// Blocks index rows with x/w and columns with y/h; image pixels are (col, row)
fn paint_block(canvas: &mut RgbaImage, block: Block) {
    let color = Rgba([block.color[0], block.color[1], block.color[2], 255]);
    for row in block.x..block.x + block.w {
        for col in block.y..block.y + block.h {
            if col < canvas.width() as usize && row < canvas.height() as usize {
                canvas.put_pixel(col as u32, row as u32, color);
            }
        }
    }
}
