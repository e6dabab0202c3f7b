//! Port for the raw key-value persistence behind the local mirror.
//!
//! Adapters are fallible; the mirror wrapping them is not. Keeping the port
//! honest about faults lets the mirror decide (once) that every fault
//! degrades to "as if empty" behaviour.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Faults raised by key-value store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be reached or read.
    #[error("local store unavailable: {message}")]
    Unavailable {
        /// Adapter-specific description.
        message: String,
    },
    /// The backing store refused the write (quota, permissions, disabled).
    #[error("local store rejected the write: {message}")]
    WriteRejected {
        /// Adapter-specific description.
        message: String,
    },
}

impl StoreError {
    /// Build an [`StoreError::Unavailable`] from a display message.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Build a [`StoreError::WriteRejected`] from a display message.
    pub fn write_rejected(message: impl Into<String>) -> Self {
        Self::WriteRejected {
            message: message.into(),
        }
    }
}

/// Raw string key-value persistence port.
///
/// Values are opaque strings; JSON encoding is the mirror's concern. The port
/// is synchronous: the backing stores are a local file or process memory, and
/// callers already treat every operation as a single uninterrupted step.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Read the value at `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` at `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the value at `key`; deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store used by tests and offline builds.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cells: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current contents, for assertions.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.cells
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .cells
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.cells
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.cells
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
