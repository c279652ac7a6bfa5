//! Error types for Courier Core.

use thiserror::Error;

/// Errors raised while writing or reading a versioned binary stream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StreamError {
    /// The stream ended before a field could be fully read.
    #[error("unexpected end of stream: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    /// The version tag is not in the known version table.
    #[error("unknown protocol version id: {0}")]
    UnknownVersion(u32),

    /// A variable-length integer used more bytes than its type allows.
    #[error("variable-length integer is too long")]
    VarIntTooLong,

    /// A length or count does not fit the wire representation.
    #[error("length {0} exceeds the maximum encodable length")]
    LengthOverflow(usize),

    /// A string field is not valid UTF-8.
    #[error("invalid UTF-8 in string field")]
    InvalidUtf8,

    /// A field holds a value outside its domain.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Bytes remain after the last expected field.
    #[error("{0} unexpected trailing bytes")]
    TrailingBytes(usize),
}

/// Result type for stream operations.
pub type Result<T> = std::result::Result<T, StreamError>;
