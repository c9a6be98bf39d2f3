//! Multi-frame plumbing: frame hand-off and cross-frame canvas continuity

/// Canvas-carrying session over a frame sequence
pub mod session;
/// Latest-wins single-slot frame exchange
pub mod slot;

pub use session::{FrameResult, StreamSession};
pub use slot::FrameSlot;
