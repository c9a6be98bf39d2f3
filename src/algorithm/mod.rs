//! Core decomposition algorithm: buffers, sampling, candidates, selection,
//! and round orchestration

/// Target/canvas buffers with incremental error bookkeeping
pub mod buffers;
/// Candidate rectangle generation from sampled positions
pub mod candidates;
/// Round orchestration and the public decomposition entry points
pub mod decomposer;
/// Importance sampling over the combined error/variance field
pub mod sampler;
/// Best-candidate selection
pub mod selection;

pub use decomposer::{Block, Decomposer, DecomposerConfig, Decomposition};
