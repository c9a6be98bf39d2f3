//! Command-line interface for decomposing PNG files into block lists
//!
//! Processes a single PNG or a sorted directory of PNGs (a frame sequence).
//! Each frame yields a block list (`<stem>_blocks.txt`, one `x y w h
//! #rrggbb` line per block) and a reconstructed canvas
//! (`<stem>_result.png`). With warm starts enabled the canvas is chained
//! from frame to frame and persisted as the previous-frame artifact, so a
//! later invocation over new frames picks up where the last one stopped.

use crate::algorithm::decomposer::{Decomposer, DecomposerConfig};
use crate::io::configuration::{
    BLOCKS_SUFFIX, DEFAULT_MIN_SIZE, DEFAULT_ROUNDS, DEFAULT_SEED, GIF_FRAME_DELAY_MS,
    OUTPUT_SUFFIX, PREV_FRAME_FILE,
};
use crate::io::error::Result;
use crate::io::image::{export_canvas_png, load_image, load_previous_canvas};
use crate::io::progress::ProgressManager;
use clap::Parser;
use ndarray::Array3;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "greedyrect")]
#[command(
    author,
    version,
    about = "Decompose images into solid-colored rectangles by randomized greedy search"
)]
/// Command-line arguments for the decomposition tool
pub struct Cli {
    /// Input PNG file or directory of frames to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible decomposition
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Decomposition rounds per frame
    #[arg(short, long, default_value_t = DEFAULT_ROUNDS)]
    pub rounds: usize,

    /// Smallest rectangle extent proposed
    #[arg(short, long, default_value_t = DEFAULT_MIN_SIZE)]
    pub min_size: usize,

    /// Chain the canvas across frames and persist the previous-frame artifact
    #[arg(short, long)]
    pub warm_start: bool,

    /// Export the progressive reconstruction as an animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates decomposition of one file or a frame sequence
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
    previous: Option<Array3<f32>>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);
        Self {
            cli,
            progress_manager,
            previous: None,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, decomposition, or file export
    /// fails.
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if self.cli.target.extension().and_then(|s| s.to_str()) == Some("png") {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(crate::io::error::io_error("Target file must be a PNG image"))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if path.extension().and_then(|s| s.to_str()) == Some("png")
                    && !is_generated_output(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(crate::io::error::io_error(
                "Target must be a PNG file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() || self.cli.warm_start {
            // Warm-start sequences must visit every frame to keep the canvas chained
            return true;
        }

        let output_path = derived_path(input_path, OUTPUT_SUFFIX, "png");
        if output_path.exists() {
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let target = load_image(input_path)?;

        // A canvas carried from the previous frame wins over the on-disk
        // artifact; the artifact only seeds the first frame of a run
        let previous = if self.cli.warm_start {
            self.previous
                .take()
                .or_else(|| load_previous_canvas(&self.artifact_path()))
        } else {
            None
        };

        let config = DecomposerConfig {
            rounds: self.cli.rounds,
            min_size: self.cli.min_size,
            ..DecomposerConfig::default()
        };
        let rng = StdRng::seed_from_u64(self.cli.seed.wrapping_add(index as u64));
        let mut decomposer = Decomposer::new(target, previous, config, rng)?;

        if self.cli.visualize {
            decomposer.enable_visualization();
        }

        if let Some(ref pm) = self.progress_manager {
            pm.start_file(input_path, self.cli.rounds);
        }

        while !decomposer.is_done() {
            decomposer.execute_round();
            if let Some(ref pm) = self.progress_manager {
                pm.update_round(decomposer.round(), self.cli.rounds);
            }
        }

        if let Some(viz) = decomposer.visualization() {
            if viz.commit_count() > 0 {
                let viz_path = derived_path(input_path, "_visualization", "gif");
                viz.export_gif(&viz_path, GIF_FRAME_DELAY_MS)?;
            }
        }

        let result = decomposer.finish();

        write_block_list(&derived_path(input_path, BLOCKS_SUFFIX, "txt"), &result.blocks)?;
        export_canvas_png(&result.canvas, &derived_path(input_path, OUTPUT_SUFFIX, "png"))?;

        if self.cli.warm_start {
            export_canvas_png(&result.canvas, &self.artifact_path())?;
            self.previous = Some(result.canvas);
        }

        if let Some(ref pm) = self.progress_manager {
            pm.complete_file();
        }

        Ok(())
    }

    // The artifact lives next to the processed frames
    fn artifact_path(&self) -> PathBuf {
        let dir = if self.cli.target.is_dir() {
            self.cli.target.clone()
        } else {
            self.cli
                .target
                .parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        };
        dir.join(PREV_FRAME_FILE)
    }
}

/// Write blocks as one `x y w h #rrggbb` line per committed rectangle
///
/// # Errors
///
/// Returns a [`crate::io::error::DecomposeError::FileSystem`] error when the
/// file cannot be written.
pub fn write_block_list(path: &Path, blocks: &[crate::algorithm::decomposer::Block]) -> Result<()> {
    let mut contents = String::with_capacity(blocks.len() * 32);
    for block in blocks {
        let _ = writeln!(
            contents,
            "{} {} {} {} {}",
            block.x,
            block.y,
            block.w,
            block.h,
            block.hex_color()
        );
    }
    std::fs::write(path, contents).map_err(|e| crate::io::error::DecomposeError::FileSystem {
        path: path.to_path_buf(),
        operation: "write block list",
        source: e,
    })
}

// Generated canvases and the warm-start artifact must not be re-consumed as
// input frames on a directory pass
fn is_generated_output(path: &Path) -> bool {
    let stem = path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    stem.ends_with(OUTPUT_SUFFIX) || name == PREV_FRAME_FILE
}

fn derived_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{}.{}", stem.to_string_lossy(), suffix, extension);
    input_path
        .parent()
        .map_or_else(|| PathBuf::from(&name), |parent| parent.join(&name))
}
