//! Algorithm constants and runtime configuration defaults

// Each round commits at most one rectangle
/// Default number of decomposition rounds per frame
pub const DEFAULT_ROUNDS: usize = 100;

/// Base term of the candidate count schedule
pub const CANDIDATES_BASE: usize = 6;

/// Ceiling of the candidate count schedule
pub const MAX_CANDIDATES: usize = 30;

/// Smallest rectangle extent ever proposed
pub const DEFAULT_MIN_SIZE: usize = 6;

/// Steepness of the sigmoid size schedule
pub const DEFAULT_STEEPNESS: f32 = 2.0;

/// Side length of the local variance window
pub const VAR_WINDOW: usize = 15;

/// Damping constant dividing error by local variance in the importance map
pub const VAR_ALPHA: f32 = 50.0;

/// Damping constant shrinking candidate extents by local variance
pub const VARIANCE_DAMPING_K: f32 = 30.0;

/// Fixed seed for reproducible decomposition
pub const DEFAULT_SEED: u64 = 42;

// Output settings
/// Suffix added to reconstructed canvas filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Suffix added to block list filenames
pub const BLOCKS_SUFFIX: &str = "_blocks";
/// Filename of the persisted previous-frame artifact for warm starts
pub const PREV_FRAME_FILE: &str = "prev_frame.png";
/// Delay between GIF visualization frames
pub const GIF_FRAME_DELAY_MS: u32 = 50;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
