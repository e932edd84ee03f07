//! Error types for the fist alert library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// `OpenCV` operation failed
    #[cfg(feature = "gui")]
    #[error("OpenCV error: {0}")]
    OpenCV(#[from] opencv::Error),

    /// File or pipe I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Landmark provider sent a response that is not valid JSON
    #[error("Malformed provider response: {0}")]
    Json(#[from] serde_json::Error),

    /// A hand landmark set did not contain the expected number of points
    #[error("Classification error: expected {expected} hand landmarks, got {actual}")]
    InvalidLandmarkCount {
        /// Number of points the classifier requires
        expected: usize,
        /// Number of points actually supplied
        actual: usize,
    },

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Landmark provider reported a failure or broke the protocol
    #[error("Landmark provider error: {0}")]
    Provider(String),

    /// Camera could not be opened or a frame could not be captured
    #[error("Camera error: {0}")]
    Camera(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic I/O error with description
    #[error("I/O error: {0}")]
    IoError(String),
}

impl Error {
    /// Whether the error only spoils the current frame.
    ///
    /// Provider hiccups and contract violations are confined to a single
    /// frame; camera, configuration and I/O failures are not.
    #[must_use]
    pub fn is_frame_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidLandmarkCount { .. } | Self::Provider(_) | Self::Json(_) | Self::InvalidInput(_)
        )
    }
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
