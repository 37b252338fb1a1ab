//! Error types for wordshot

use thiserror::Error;

/// Result type alias for wordshot operations
pub type Result<T> = std::result::Result<T, WordshotError>;

/// Failure reported by a render surface while capturing pixels
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct CaptureError(pub String);

impl CaptureError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Wordshot error types
#[derive(Error, Debug)]
pub enum WordshotError {
    #[error("Invalid style rule: {0}")]
    InvalidStyleRule(String),

    #[error("Capture failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Placeholder marker must not be empty")]
    InvalidMarker,

    #[error("Archive encoding failed: {0}")]
    ArchiveEncoding(String),

    #[error("Export cancelled before any image was captured")]
    Cancelled,

    #[error("{0}")]
    Usage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<zip::result::ZipError> for WordshotError {
    fn from(e: zip::result::ZipError) -> Self {
        WordshotError::ArchiveEncoding(e.to_string())
    }
}
