//! Error types for accessor views.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for accessor operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Layout, buffer size or sparse relationship is inconsistent
    #[error("Invalid accessor format: {0}")]
    Format(String),

    /// Element index outside `[0, len)`
    #[error("Index {index} out of range (len: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Value not representable by the storage encoding
    #[error("Value {value} exceeds encoding range (max: {max})")]
    Range { value: f64, max: f64 },

    /// Structural mutation on a fixed-length view
    #[error("Unsupported operation on fixed-length accessor: {0}")]
    UnsupportedOperation(&'static str),

    /// Destination of a bulk copy cannot hold the view
    #[error("Destination too small: need {needed} elements, have {available}")]
    DestinationTooSmall { needed: usize, available: usize },

    /// File does not exist or cannot be accessed
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Memory mapping failed
    #[error("Memory mapping failed: {0}")]
    MmapFailed(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON descriptor
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a format error.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Create an out-of-range error for `index` into a view of length `len`.
    #[inline]
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}

/// Result type alias for accessor operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::out_of_range(5, 3);
        assert!(e.to_string().contains("5"));
        assert!(e.to_string().contains("3"));

        let e = Error::Range { value: 256.0, max: 255.0 };
        assert!(e.to_string().contains("256"));

        let e = Error::UnsupportedOperation("insert");
        assert!(e.to_string().contains("insert"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
