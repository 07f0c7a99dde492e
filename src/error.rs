//! Error types for respwire
//!
//! Provides a unified error type for encoding, decoding and stream I/O.

use thiserror::Error;

/// Result type alias using RespError
pub type Result<T> = std::result::Result<T, RespError>;

/// Unified error type for respwire operations
#[derive(Debug, Error)]
pub enum RespError {
    // -------------------------------------------------------------------------
    // Encoding Errors
    // -------------------------------------------------------------------------
    /// Input to an encode function had the wrong shape. No output was produced.
    #[error("Encode type error: {0}")]
    EncodeType(String),

    // -------------------------------------------------------------------------
    // Decoding Errors
    // -------------------------------------------------------------------------
    #[error("Decode syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// Bytes remained after a bounded decode received all expected values.
    #[error("Surplus data: {remaining} bytes left after {consumed} consumed")]
    SurplusData { consumed: usize, remaining: usize },

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RespError {
    /// Returns the syntax error if this is a decode failure.
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            RespError::Syntax(e) => Some(e),
            _ => None,
        }
    }
}

/// Malformed frame detected while parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// Input ended before a complete value was available.
    #[error("incomplete frame: unexpected end of input")]
    Incomplete,

    #[error("invalid chunk: unknown type prefix {0:#04x}")]
    InvalidPrefix(u8),

    #[error("invalid integer: {0:?}")]
    InvalidInteger(String),

    /// A bulk length or array count below -1.
    #[error("invalid length: {0}")]
    InvalidLength(i64),

    /// The two bytes after a bulk payload were not CRLF.
    #[error("invalid CRLF after bulk payload")]
    MissingCrlf,

    #[error("array nesting exceeds maximum depth of {0}")]
    NestingTooDeep(usize),

    #[error("bulk length {0} exceeds configured maximum")]
    BulkTooLarge(i64),

    #[error("array count {0} exceeds configured maximum")]
    TooManyElements(i64),
}
