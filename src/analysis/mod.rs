//! Signal analysis feeding the importance sampler and size schedule

/// Luminance extraction and windowed local variance
pub mod variance;
