//! Randomized greedy rectangle decomposition for progressive image approximation
//!
//! The core takes a raster image (or a live sequence of frames) and produces
//! an ordered list of axis-aligned, solid-colored rectangles that
//! progressively approximates it under mean squared error. Importance
//! sampling over a combined error/variance field places large low-detail
//! rectangles first and small detail corrections last; a previous frame's
//! reconstruction can seed the next call so consecutive video frames stay
//! coherent and cheap to update.

#![forbid(unsafe_code)]

/// Core decomposition: buffers, sampling, candidate generation, selection,
/// and round orchestration
pub mod algorithm;
/// Luminance and local variance analysis feeding the sampler
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Mathematical utilities for schedules and sampling
pub mod math;
/// Spatial rectangle primitives
pub mod spatial;
/// Multi-frame streaming support
pub mod stream;

pub use algorithm::{Block, Decomposer, DecomposerConfig, Decomposition};
pub use io::error::{DecomposeError, Result};
pub use spatial::Rect;
