//! Mathematical utilities for the decomposition algorithm

/// Discrete CDF construction and inverse lookup
pub mod probability;
/// Sigmoid size schedule and candidate count schedule
pub mod schedule;
