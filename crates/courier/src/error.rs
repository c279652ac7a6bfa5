//! Error types for the codec.

use courier_context::ContextError;
use courier_core::StreamError;
use courier_perms::PermsError;
use thiserror::Error;

/// Errors that can occur while encoding, decoding, or transporting a
/// remote access token.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The context holds no remote access header.
    ///
    /// Means "no delegated credential", not a format fault.
    #[error("remote access header [{0}] is not present")]
    NotPresent(String),

    /// Encoding failed. Nothing was produced.
    #[error("failed to serialize remote access authentication: {0}")]
    Serialization(String),

    /// The token is malformed.
    #[error("failed to deserialize remote access authentication: {0}")]
    Deserialization(#[from] DecodeError),

    /// A permission block could not be parsed.
    #[error("permission error: {0}")]
    Permissions(#[from] PermsError),

    /// The context store refused the header.
    #[error("context error: {0}")]
    Context(#[from] ContextError),
}

/// Why a token could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The token text is not standard, padded Base64.
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The binary stream is truncated, has an unknown version, a bad field,
    /// or bytes past the last declared block.
    #[error("{0}")]
    Stream(#[from] StreamError),

    /// The declared number of permission sets exceeds the configured limit.
    #[error("token declares {declared} permission sets, limit is {max}")]
    TooManyPermissionSets { declared: usize, max: usize },

    /// A permission block exceeds the configured size limit.
    #[error("permission block of {len} bytes exceeds limit of {max}")]
    BlockTooLarge { len: usize, max: usize },
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
