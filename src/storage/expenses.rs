//! Expense ledger repository
//!
//! Holds the expense records in insertion order, stored under the
//! `expenses` key as a JSON array of expense objects.

use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{reassign_duplicate_ids, Expense, ExpenseId};

use super::store::{KeyValueStore, EXPENSES_KEY};

/// Repository for expense records
#[derive(Debug, Default)]
pub struct ExpenseRepository {
    data: RwLock<Vec<Expense>>,
}

impl ExpenseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load expenses from the store; an absent key is an empty ledger
    ///
    /// Returns the raw stored text so the caller can tell whether the
    /// snapshot needs rewriting.
    pub fn load(&self, store: &dyn KeyValueStore) -> Result<Option<String>, LedgerError> {
        let raw = store.read(EXPENSES_KEY)?;
        let loaded = match &raw {
            Some(text) => decode_expenses(text)?,
            None => Vec::new(),
        };

        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = loaded;

        Ok(raw)
    }

    /// All expenses in storage order
    pub fn get_all(&self) -> Result<Vec<Expense>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.clone())
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.iter().find(|e| e.id == id).cloned())
    }

    /// Find expenses whose id matches a full or shortened id string
    pub fn find_matching(&self, query: &str) -> Result<Vec<Expense>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.iter().filter(|e| e.id.matches(query)).cloned().collect())
    }

    pub fn count(&self) -> Result<usize, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }

    /// Swap in a new ledger (after it has been persisted)
    pub fn replace(&self, next: Vec<Expense>) -> Result<(), LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = next;
        Ok(())
    }
}

/// Serialize the ledger for the store
pub fn encode_expenses(expenses: &[Expense]) -> Result<String, LedgerError> {
    serde_json::to_string(expenses)
        .map_err(|e| LedgerError::Storage(format!("Failed to serialize expenses: {}", e)))
}

/// Parse the stored ledger, giving repeated ids fresh ones
pub fn decode_expenses(text: &str) -> Result<Vec<Expense>, LedgerError> {
    let mut expenses: Vec<Expense> = serde_json::from_str(text)
        .map_err(|e| LedgerError::Storage(format!("Failed to parse expenses: {}", e)))?;
    reassign_duplicate_ids(&mut expenses);
    Ok(expenses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Numeric;
    use crate::storage::store::MemoryStore;

    #[test]
    fn test_empty_load() {
        let store = MemoryStore::new();
        let repo = ExpenseRepository::new();
        repo.load(&store).unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_replace_and_get() {
        let repo = ExpenseRepository::new();
        let first = Expense::new("Coffee", 3.0, "Food");
        let second = Expense::new("Bus", 2.5, "Travel");
        let id = second.id;

        repo.replace(vec![first, second]).unwrap();

        assert_eq!(repo.count().unwrap(), 2);
        assert_eq!(repo.get(id).unwrap().unwrap().description, "Bus");
        assert!(repo.get(ExpenseId::new()).unwrap().is_none());
    }

    #[test]
    fn test_find_matching_short_id() {
        let repo = ExpenseRepository::new();
        let expense = Expense::new("Coffee", 3.0, "Food");
        let short = expense.id.short();
        repo.replace(vec![expense]).unwrap();

        assert_eq!(repo.find_matching(&short).unwrap().len(), 1);
    }

    #[test]
    fn test_load_legacy_snapshot() {
        let store = MemoryStore::new();
        store
            .write(
                EXPENSES_KEY,
                r#"[{"description":"Milk","amount":"","category":"Food","units":"2","unitName":"l","pricePerUnit":1.2,"comment":""}]"#,
            )
            .unwrap();

        let repo = ExpenseRepository::new();
        repo.load(&store).unwrap();

        let expenses = repo.get_all().unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].units, Numeric::Value(2.0));
        assert_eq!(expenses[0].effective_amount(), Some(2.4));
    }
}
