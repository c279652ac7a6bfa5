//! Error types for the context module.

use thiserror::Error;

/// Errors that can occur during context operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    /// A value is already stored under this header.
    #[error("value for header [{0}] already present")]
    HeaderAlreadyPresent(String),
}

/// Result type for context operations.
pub type Result<T> = std::result::Result<T, ContextError>;
