//! In-memory implementation of the ContextStore trait.
//!
//! Headers live for as long as the context does. Thread-safe via RwLock.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::error::{ContextError, Result};
use crate::traits::ContextStore;

/// Headers for one logical request.
#[derive(Debug, Default)]
pub struct ThreadContext {
    headers: RwLock<HashMap<String, String>>,
}

impl ThreadContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a header, returning its value.
    pub fn remove_header(&self, key: &str) -> Option<String> {
        self.headers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }

    /// Snapshot of every header currently set.
    pub fn headers(&self) -> HashMap<String, String> {
        self.headers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ContextStore for ThreadContext {
    fn put_header(&self, key: &str, value: String) -> Result<()> {
        let mut headers = self.headers.write().unwrap_or_else(PoisonError::into_inner);
        if headers.contains_key(key) {
            return Err(ContextError::HeaderAlreadyPresent(key.to_string()));
        }
        tracing::trace!("put header [{}] ({} bytes)", key, value.len());
        headers.insert(key.to_string(), value);
        Ok(())
    }

    fn get_header(&self, key: &str) -> Option<String> {
        self.headers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}
