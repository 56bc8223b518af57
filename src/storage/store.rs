//! Key-value persistence adapters
//!
//! The ledger keeps two keys, `categories` and `expenses`, each holding a
//! JSON array that is rewritten wholesale on every mutation.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;

use super::file_io::{read_text, write_text_atomic};

/// Store key for the category registry
pub const CATEGORIES_KEY: &str = "categories";

/// Store key for the expense ledger
pub const EXPENSES_KEY: &str = "expenses";

/// A durable string key-value store
///
/// A single `write` is atomic for its key; there is no multi-key transaction.
pub trait KeyValueStore {
    /// Read the value for `key`, `None` if it was never written
    fn read(&self, key: &str) -> Result<Option<String>, LedgerError>;

    /// Replace the value for `key`
    fn write(&self, key: &str, value: &str) -> Result<(), LedgerError>;
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, LedgerError> {
        read_text(self.path_for(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), LedgerError> {
        write_text_atomic(self.path_for(key), value)
    }
}

/// In-memory store for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, LedgerError> {
        let values = self
            .values
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), LedgerError> {
        let mut values = self
            .values
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.read(EXPENSES_KEY).unwrap(), None);

        store.write(EXPENSES_KEY, "[]").unwrap();
        assert_eq!(store.read(EXPENSES_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().to_path_buf());

        assert_eq!(store.read(CATEGORIES_KEY).unwrap(), None);

        store.write(CATEGORIES_KEY, r#"["Food"]"#).unwrap();
        assert!(temp_dir.path().join("categories.json").exists());
        assert_eq!(
            store.read(CATEGORIES_KEY).unwrap().as_deref(),
            Some(r#"["Food"]"#)
        );
    }
}
