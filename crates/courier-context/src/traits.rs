//! ContextStore trait: the header map a token is carried in.

use crate::error::Result;

/// A request-scoped header map.
///
/// Implementations must be thread-safe (Send + Sync). Whether a second
/// `put_header` for the same key overwrites or fails is the implementation's
/// choice; callers must not assume either.
pub trait ContextStore: Send + Sync {
    /// Store `value` under `key`.
    fn put_header(&self, key: &str, value: String) -> Result<()>;

    /// Get the value stored under `key`, if any.
    fn get_header(&self, key: &str) -> Option<String>;
}
