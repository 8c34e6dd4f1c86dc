//! Error types for reveal

use thiserror::Error;

/// Errors raised while constructing engine values
///
/// Interaction paths (scroll, clicks, teardown) never surface errors; they
/// degrade to no-ops. Only construction-time validation produces these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RevealError {
    /// Entry threshold outside of `(0, 1]`
    #[error("entry threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f32),

    /// Initial and final visual states are identical
    #[error("initial and final visual states must differ in at least one property")]
    IndistinctStates,

    /// A carousel item has a negative or non-finite width
    #[error("carousel item {index} has invalid width {width}")]
    InvalidItemWidth { index: usize, width: f32 },

    /// Velocity is negative or non-finite
    #[error("invalid velocity: {0}")]
    InvalidVelocity(f32),

    /// Region handle does not refer to a mounted region
    #[error("region is not mounted")]
    UnmountedRegion,
}

/// Result type for reveal operations
pub type Result<T> = std::result::Result<T, RevealError>;
