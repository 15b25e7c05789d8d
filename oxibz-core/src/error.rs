//! Error types for oxibz operations.
//!
//! A single error enum covers both layers of the stack: substrate I/O
//! failures from the bit stream, and structural errors detected while
//! undoing the transform pipeline.

use std::io;
use thiserror::Error;

/// The main error type for oxibz operations.
#[derive(Debug, Error)]
pub enum OxibzError {
    /// I/O error from the underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stream ended in the middle of a code or token.
    #[error("unexpected end of stream")]
    UnexpectedEof,

    /// A transform block exceeds the maximum supported size.
    #[error("block too large: {size} bytes exceeds the {max} byte limit")]
    BlockTooLarge {
        /// Size of the offending block.
        size: usize,
        /// Maximum supported block size.
        max: usize,
    },

    /// Output buffer is too small to hold the result.
    #[error("output buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// The alphabet trailer at the end of a payload is inconsistent.
    #[error("malformed alphabet trailer: {message}")]
    MalformedTrailer {
        /// Description of the inconsistency.
        message: String,
    },

    /// A block contains more distinct byte values than the trailer can frame.
    #[error("alphabet too large: {count} distinct bytes exceed the 255-entry trailer limit")]
    AlphabetTooLarge {
        /// Number of distinct bytes observed.
        count: usize,
    },

    /// Data that cannot be decoded by the stage that received it.
    #[error("corrupted data: {message}")]
    CorruptedData {
        /// Description of the corruption.
        message: String,
    },
}

/// Result type alias for oxibz operations.
pub type Result<T> = std::result::Result<T, OxibzError>;

impl OxibzError {
    /// Create a malformed trailer error.
    pub fn malformed_trailer(message: impl Into<String>) -> Self {
        Self::MalformedTrailer {
            message: message.into(),
        }
    }

    /// Create a corrupted data error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::CorruptedData {
            message: message.into(),
        }
    }

    /// Create a buffer too small error.
    pub fn buffer_too_small(needed: usize, available: usize) -> Self {
        Self::BufferTooSmall { needed, available }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OxibzError::buffer_too_small(10, 4);
        assert!(err.to_string().contains("need 10 bytes"));

        let err = OxibzError::malformed_trailer("length byte is 0");
        assert!(err.to_string().contains("length byte is 0"));

        let err = OxibzError::AlphabetTooLarge { count: 256 };
        assert!(err.to_string().contains("256"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: OxibzError = io_err.into();
        assert!(matches!(err, OxibzError::Io(_)));
    }
}
