//! Error types for wall generation.

use thiserror::Error;

/// Errors that can occur around wall generation.
///
/// Wall generation itself has no failure modes: an offset that produces
/// an empty contour set is the normal end of a region's wall sequence,
/// not an error.
#[derive(Error, Debug)]
pub enum WallsError {
    /// Invalid wall settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type for wall generation operations.
pub type Result<T> = std::result::Result<T, WallsError>;
