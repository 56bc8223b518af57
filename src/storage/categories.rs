//! Category registry repository
//!
//! Holds the ordered list of category names stored under the `categories`
//! key as a JSON array of strings.

use std::sync::RwLock;

use crate::error::LedgerError;

use super::store::{KeyValueStore, CATEGORIES_KEY};

/// Repository for the category registry
#[derive(Debug, Default)]
pub struct CategoryRepository {
    names: RwLock<Vec<String>>,
}

impl CategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load categories from the store; an absent key is an empty registry
    ///
    /// Returns the raw stored text so the caller can tell whether the
    /// snapshot needs rewriting.
    pub fn load(&self, store: &dyn KeyValueStore) -> Result<Option<String>, LedgerError> {
        let raw = store.read(CATEGORIES_KEY)?;
        let loaded = match &raw {
            Some(text) => decode_categories(text)?,
            None => Vec::new(),
        };

        let mut names = self
            .names
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *names = loaded;

        Ok(raw)
    }

    /// All names in insertion order
    pub fn get_all(&self) -> Result<Vec<String>, LedgerError> {
        let names = self
            .names
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(names.clone())
    }

    /// Exact, case-sensitive membership test
    pub fn contains(&self, name: &str) -> Result<bool, LedgerError> {
        let names = self
            .names
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(names.iter().any(|n| n == name))
    }

    pub fn count(&self) -> Result<usize, LedgerError> {
        let names = self
            .names
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(names.len())
    }

    /// Swap in a new registry (after it has been persisted)
    pub fn replace(&self, next: Vec<String>) -> Result<(), LedgerError> {
        let mut names = self
            .names
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *names = next;
        Ok(())
    }
}

/// Serialize the registry for the store
pub fn encode_categories(names: &[String]) -> Result<String, LedgerError> {
    serde_json::to_string(names)
        .map_err(|e| LedgerError::Storage(format!("Failed to serialize categories: {}", e)))
}

/// Parse the stored registry
pub fn decode_categories(text: &str) -> Result<Vec<String>, LedgerError> {
    serde_json::from_str(text)
        .map_err(|e| LedgerError::Storage(format!("Failed to parse categories: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::store::MemoryStore;

    #[test]
    fn test_empty_load() {
        let store = MemoryStore::new();
        let repo = CategoryRepository::new();
        assert_eq!(repo.load(&store).unwrap(), None);
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_load_preserves_order() {
        let store = MemoryStore::new();
        store.write(CATEGORIES_KEY, r#"["Rent","Food","Travel"]"#).unwrap();

        let repo = CategoryRepository::new();
        repo.load(&store).unwrap();

        assert_eq!(repo.get_all().unwrap(), vec!["Rent", "Food", "Travel"]);
        assert!(repo.contains("Food").unwrap());
        assert!(!repo.contains("food").unwrap());
    }

    #[test]
    fn test_corrupt_snapshot_is_storage_error() {
        let store = MemoryStore::new();
        store.write(CATEGORIES_KEY, "{not json").unwrap();

        let repo = CategoryRepository::new();
        assert!(matches!(repo.load(&store), Err(LedgerError::Storage(_))));
    }

    #[test]
    fn test_encode_round_trip() {
        let names = vec!["A".to_string(), "B".to_string()];
        let text = encode_categories(&names).unwrap();
        assert_eq!(text, r#"["A","B"]"#);
        assert_eq!(decode_categories(&text).unwrap(), names);
    }
}
