//! Typed, fault-tolerant view over the local key-value store.
//!
//! The mirror is the one place store faults are absorbed: a missing key, a
//! corrupt cached document, or an unavailable backing store all degrade to
//! the caller's fallback value. Nothing above this layer ever sees a store
//! error.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::ports::KeyValueStore;

/// Shared handle to the local mirror.
#[derive(Debug)]
pub struct LocalMirror<S> {
    store: Arc<S>,
}

impl<S> Clone for LocalMirror<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore> LocalMirror<S> {
    /// Wrap a backing store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Read and decode the value at `key`, or `None` when it is missing,
    /// corrupt, or the store is unavailable.
    pub fn peek<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.load(key) {
            Ok(raw) => raw?,
            Err(error) => {
                warn!(key, %error, "local store read failed; treating key as empty");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(key, %error, "cached document is corrupt; treating key as empty");
                None
            }
        }
    }

    /// Read and decode the value at `key`, returning `fallback` when the key
    /// is missing, corrupt, or the store is unavailable.
    pub fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        self.peek(key).unwrap_or(fallback)
    }

    /// Encode and write `value` at `key`; reports whether the write stuck.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> bool {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(error) => {
                warn!(key, %error, "value failed to encode; write skipped");
                return false;
            }
        };
        match self.store.save(key, &encoded) {
            Ok(()) => true,
            Err(error) => {
                warn!(key, %error, "local store write failed");
                false
            }
        }
    }

    /// Best-effort delete of the value at `key`.
    pub fn remove(&self, key: &str) {
        if let Err(error) = self.store.delete(key) {
            debug!(key, %error, "local store delete failed");
        }
    }
}
