//! JSON-file key-value store adapter.
//!
//! The whole store is one JSON object on disk, rewritten on every mutation.
//! That is deliberate: the mirror holds a handful of small collections for a
//! single session, and a whole-document write keeps the on-disk shape
//! trivially inspectable.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::domain::ports::{KeyValueStore, StoreError};

/// Durable key-value store backed by a single JSON document.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    cells: Mutex<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading any existing document.
    ///
    /// A missing file starts empty; an unreadable or corrupt one is treated
    /// as empty too, so opening never fails.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cells = load_document(&path);
        Self {
            path,
            cells: Mutex::new(cells),
        }
    }

    fn persist(&self, cells: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|error| StoreError::write_rejected(error.to_string()))?;
            }
        }
        let document = serde_json::to_string_pretty(cells)
            .map_err(|error| StoreError::write_rejected(error.to_string()))?;
        std::fs::write(&self.path, document)
            .map_err(|error| StoreError::write_rejected(error.to_string()))
    }
}

fn load_document(path: &Path) -> HashMap<String, String> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
        Err(error) => {
            warn!(path = %path.display(), %error, "store file unreadable; starting empty");
            return HashMap::new();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(cells) => cells,
        Err(error) => {
            warn!(path = %path.display(), %error, "store file corrupt; starting empty");
            HashMap::new()
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .cells
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        cells.insert(key.to_owned(), value.to_owned());
        self.persist(&cells)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        cells.remove(key);
        self.persist(&cells)
    }
}
