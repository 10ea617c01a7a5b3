//! Keyed persistent storage.
//!
//! The route list reads two entries: the mission snapshot written by the host
//! application and the manual step order owned by this crate. Both live in a
//! [`KeyValueStore`]; on disk that is one JSON file per key.

mod missions;
mod order;
mod watcher;

pub use missions::MissionSource;
pub use order::{KeyedOrderStore, OrderStore};
pub use watcher::{RefreshSignal, StoreWatcher};

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Errors from reading or writing a store entry
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error on store key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode store key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Trait abstracting a string key/value store for testability
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value for `key`, `None` when absent
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value for `key` in a single write
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// File-backed store: each key is `{dir}/{key}.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Map a file name back to the key it stores. Only the file name is
    /// inspected, the watcher reports canonical paths.
    pub fn key_for_path(&self, path: &Path) -> Option<String> {
        if path.extension().is_none_or(|e| e != "json") {
            return None;
        }
        path.file_stem()
            .and_then(|s| s.to_str())
            .map(ToString::to_string)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_err)?;

        // Write beside the target then rename so readers never see a partial file
        let path = self.path_for(key);
        let tmp_path = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp_path, value).map_err(io_err)?;
        fs::rename(&tmp_path, &path).map_err(io_err)?;

        tracing::trace!(key, path = %path.display(), "Wrote store entry");
        Ok(())
    }
}

/// In-memory store for tests and embedding
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    /// Record of keys written, in order
    pub write_log: Arc<Mutex<Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry without recording a write
    pub fn insert(&self, key: &str, value: &str) {
        self.lock_entries().insert(key.to_string(), value.to_string());
    }

    /// Number of writes made through [`KeyValueStore::set`]
    pub fn write_count(&self) -> usize {
        self.write_log
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock_entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock_entries().insert(key.to_string(), value.to_string());
        self.write_log
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(key.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_missing_key_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        assert!(store.get("missions").unwrap().is_none());
    }

    #[test]
    fn test_file_store_set_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("nested"));

        store.set("order", r#"["pickup-1"]"#).unwrap();
        assert_eq!(store.get("order").unwrap().as_deref(), Some(r#"["pickup-1"]"#));

        store.set("order", "[]").unwrap();
        assert_eq!(store.get("order").unwrap().as_deref(), Some("[]"));
        assert!(!temp_dir.path().join("nested/.order.json.tmp").exists());
    }

    #[test]
    fn test_key_for_path() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        assert_eq!(
            store.key_for_path(&store.path_for("missions")).as_deref(),
            Some("missions")
        );
        assert_eq!(store.key_for_path(&temp_dir.path().join("notes.txt")), None);
        assert_eq!(
            store.key_for_path(&temp_dir.path().join(".order.json.tmp")),
            None
        );
    }

    #[test]
    fn test_memory_store_records_writes() {
        let store = MemoryStore::new();
        store.insert("seeded", "1");
        assert_eq!(store.write_count(), 0);

        store.set("order", "[]").unwrap();
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.get("seeded").unwrap().as_deref(), Some("1"));
        assert_eq!(store.write_log.lock().unwrap().as_slice(), ["order".to_string()]);
    }
}
