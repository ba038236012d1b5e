//! Error types shared across the core crate

use thiserror_no_std::Error;

/// Errors raised by chart configuration and data-feed operations
///
/// Lifecycle calls (setup/update/draw) never fail on their own; they only
/// propagate the display's `DrawTarget::Error`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartError {
    /// A lane selector outside `1..=3` was supplied
    #[error("Invalid lane number: {number} (expected 1..=3)")]
    InvalidLane {
        /// The rejected lane number
        number: u8,
    },

    /// The button binding table has no free slot
    #[error("Button map full (max: {max})")]
    ButtonMapFull {
        /// Maximum number of bindings
        max: usize,
    },

    /// Chart geometry with a zero width, lane height or window
    #[error("Invalid chart geometry")]
    InvalidGeometry,

    /// Configuration blob could not be encoded or decoded
    #[error("Config encoding error: {0}")]
    Config(postcard::Error),
}

impl From<postcard::Error> for ChartError {
    fn from(err: postcard::Error) -> Self {
        Self::Config(err)
    }
}

/// Result type for chart operations
pub type ChartResult<T> = Result<T, ChartError>;
