//! Error types for the permissions module.

use thiserror::Error;

/// Errors that can occur while writing or parsing permission blocks.
#[derive(Debug, Error)]
pub enum PermsError {
    /// A permission block is not a valid JSON object, or a descriptor body
    /// does not satisfy its own schema.
    #[error("malformed permission data: {0}")]
    MalformedPermissionData(String),

    /// A block names the same descriptor twice and duplicates are rejected.
    #[error("duplicate permission name in block: {0}")]
    DuplicatePermissionName(String),

    /// A permission set could not be serialized to JSON.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for permission operations.
pub type Result<T> = std::result::Result<T, PermsError>;
