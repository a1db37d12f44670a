//! Error types for model parsing.

use thiserror::Error;

/// Result type for model parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors that can occur while decoding an uploaded model buffer.
///
/// The pipeline boundary recovers from all of these by substituting the
/// placeholder cube; none of them aborts an upload.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Unrecognized file extension.
    #[error("unknown model format: .{extension}")]
    UnknownFormat {
        /// The unrecognized extension.
        extension: String,
    },

    /// Buffer too small to contain the format's fixed preamble.
    #[error("buffer too short for {format}: {len} bytes")]
    TooShort {
        /// Format that was being decoded.
        format: &'static str,
        /// Actual buffer length.
        len: usize,
    },

    /// The buffer decoded, but yielded no triangles.
    #[error("no triangles decodable from {format} buffer")]
    NoTriangles {
        /// Format that was being decoded.
        format: &'static str,
    },

    /// Invalid content inside an otherwise readable container.
    #[error("invalid model content: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// I/O error while reading from an in-memory archive.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Float parsing error in XML attribute data.
    #[error("float parsing error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),

    /// Integer parsing error in XML attribute data.
    #[error("integer parsing error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}

impl ParseError {
    /// Create an `InvalidContent` error with the given message.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }
}
