//! Error types for AMCache value decoding.
//!
//! Every error in this crate is non-fatal by design: a fault while decoding
//! one registry value is reported to the caller's sink as a warning, the
//! affected field is left unset, and the traversal continues. Nothing here
//! ever aborts a decode run.

use std::io;
use thiserror::Error;

/// Result type alias for decode operations.
pub type Result<T> = std::result::Result<T, AmcacheError>;

/// Errors that can occur while decoding an AMCache registry value.
#[derive(Error, Debug)]
pub enum AmcacheError {
    /// I/O error surfaced by the hive-reader collaborator.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Value payload is shorter than its declared integer width.
    #[error("truncated data in value '{name}': expected {expected} bytes, got {actual}")]
    TruncatedValue {
        /// Name of the value whose payload was truncated.
        name: String,
        /// Bytes required by the value's type tag.
        expected: usize,
        /// Bytes actually present in the payload.
        actual: usize,
    },

    /// Value payload is not valid UTF-16LE string data.
    #[error("invalid UTF-16 string in value '{name}'")]
    InvalidUtf16 {
        /// Name of the value whose payload failed to decode.
        name: String,
    },
}

impl AmcacheError {
    /// Creates a truncated value error with context.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the affected value
    /// * `expected` - Bytes required by the declared type
    /// * `actual` - Bytes present in the payload
    pub fn truncated_value(name: &str, expected: usize, actual: usize) -> Self {
        Self::TruncatedValue {
            name: name.to_string(),
            expected,
            actual,
        }
    }

    /// Creates an invalid UTF-16 error for the named value.
    pub fn invalid_utf16(name: &str) -> Self {
        Self::InvalidUtf16 {
            name: name.to_string(),
        }
    }
}
