//! # Courier Context
//!
//! Request-scoped header storage. A remote access token travels between
//! services as a single header value in a [`ContextStore`].
//!
//! ## Key Types
//!
//! - [`ContextStore`] - The trait the codec reads and writes headers through
//! - [`ThreadContext`] - An in-memory, lock-guarded implementation
//!
//! ## Design Notes
//!
//! - **No overwrite**: [`ThreadContext`] rejects a second value for a header
//!   that is already set, returning [`ContextError::HeaderAlreadyPresent`]
//! - **Propagation**: whether a context is inherited by sub-operations is up
//!   to the caller; the store itself is a plain map

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{ContextError, Result};
pub use memory::ThreadContext;
pub use traits::ContextStore;
