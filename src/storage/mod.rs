//! Storage layer
//!
//! A key-value persistence adapter plus in-memory repositories for the
//! category registry and the expense ledger. Every mutation is written to
//! the store first and swapped into memory only once the write succeeded,
//! so a failed write leaves both untouched.
//!
//! Audit entries are appended after a commit. Once the data is stored the
//! operation has succeeded, so an audit failure is kept as a warning for
//! the caller to drain with [`Storage::take_audit_warnings`].

pub mod categories;
pub mod expenses;
pub mod file_io;
pub mod store;

pub use categories::CategoryRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_text, write_text_atomic};
pub use store::{FileStore, KeyValueStore, MemoryStore, CATEGORIES_KEY, EXPENSES_KEY};

use std::sync::RwLock;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::models::Expense;

use categories::encode_categories;
use expenses::encode_expenses;

/// Main storage coordinator that provides access to both repositories
pub struct Storage {
    store: Box<dyn KeyValueStore>,
    pub categories: CategoryRepository,
    pub expenses: ExpenseRepository,
    audit: Option<AuditLogger>,
    audit_warnings: RwLock<Vec<String>>,
}

impl Storage {
    /// File-backed storage under the data directory, with audit logging
    pub fn new(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self::with_store(Box::new(FileStore::new(paths.data_dir())))
            .with_audit(AuditLogger::new(paths.audit_log())))
    }

    /// Storage over any persistence adapter, without audit logging
    pub fn with_store(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store,
            categories: CategoryRepository::new(),
            expenses: ExpenseRepository::new(),
            audit: None,
            audit_warnings: RwLock::new(Vec::new()),
        }
    }

    /// Attach an audit log
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Audit failures since the last call, oldest first
    pub fn take_audit_warnings(&self) -> Vec<String> {
        match self.audit_warnings.write() {
            Ok(mut warnings) => std::mem::take(&mut *warnings),
            Err(_) => Vec::new(),
        }
    }

    /// Load both collections from the store
    ///
    /// Expenses stored without ids are given ids here, and the snapshot is
    /// rewritten once so those ids stay stable across sessions.
    pub fn load_all(&self) -> Result<(), LedgerError> {
        self.categories.load(self.store.as_ref())?;

        if let Some(raw) = self.expenses.load(self.store.as_ref())? {
            let normalized = encode_expenses(&self.expenses.get_all()?)?;
            if normalized != raw {
                self.store.write(EXPENSES_KEY, &normalized)?;
            }
        }

        Ok(())
    }

    /// Persist and install a new registry
    pub fn commit_categories(&self, next: Vec<String>) -> LedgerResult<()> {
        self.store.write(CATEGORIES_KEY, &encode_categories(&next)?)?;
        self.categories.replace(next)
    }

    /// Persist and install a new ledger
    pub fn commit_expenses(&self, next: Vec<Expense>) -> LedgerResult<()> {
        self.store.write(EXPENSES_KEY, &encode_expenses(&next)?)?;
        self.expenses.replace(next)
    }

    /// Persist and install both collections as a unit
    ///
    /// Categories are written first. If the expense write then fails, the
    /// previous registry is written back and the error is returned with
    /// memory unchanged.
    pub fn commit_all(&self, categories: Vec<String>, expenses: Vec<Expense>) -> LedgerResult<()> {
        let previous_categories = encode_categories(&self.categories.get_all()?)?;
        let next_categories = encode_categories(&categories)?;
        let next_expenses = encode_expenses(&expenses)?;

        self.store.write(CATEGORIES_KEY, &next_categories)?;

        if let Err(err) = self.store.write(EXPENSES_KEY, &next_expenses) {
            return match self.store.write(CATEGORIES_KEY, &previous_categories) {
                Ok(()) => Err(err),
                Err(restore_err) => Err(LedgerError::Storage(format!(
                    "{}; restoring categories also failed: {}",
                    err, restore_err
                ))),
            };
        }

        self.categories.replace(categories)?;
        self.expenses.replace(expenses)
    }

    // Audit helpers; a no-op when no logger is attached, never an error

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.log(|| AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) {
        self.log(|| {
            AuditEntry::update(entity_type, entity_id, entity_name, before, after, diff_summary)
        })
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.log(|| AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_import(&self, source: &str, summary: String) {
        self.log(|| AuditEntry::import(source, summary))
    }

    fn log(&self, make: impl FnOnce() -> AuditEntry) {
        let Some(logger) = &self.audit else {
            return;
        };
        if let Err(err) = logger.log(&make()) {
            if let Ok(mut warnings) = self.audit_warnings.write() {
                warnings.push(err.to_string());
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Memory store whose writes to one key always fail
    #[derive(Default)]
    pub(crate) struct FlakyStore {
        pub inner: MemoryStore,
        pub fail_key: Option<&'static str>,
    }

    impl KeyValueStore for FlakyStore {
        fn read(&self, key: &str) -> Result<Option<String>, LedgerError> {
            self.inner.read(key)
        }

        fn write(&self, key: &str, value: &str) -> Result<(), LedgerError> {
            if self.fail_key == Some(key) {
                return Err(LedgerError::Storage(format!("write to {} failed", key)));
            }
            self.inner.write(key, value)
        }
    }

    #[test]
    fn test_file_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(&paths).unwrap();
        storage.load_all().unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(storage.audit().is_some());
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_commit_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let storage = Storage::new(&paths).unwrap();
        let expense = Expense::new("Coffee", 3.0, "Food");
        storage.commit_categories(vec!["Food".into()]).unwrap();
        storage.commit_expenses(vec![expense.clone()]).unwrap();

        let reloaded = Storage::new(&paths).unwrap();
        reloaded.load_all().unwrap();
        assert_eq!(reloaded.categories.get_all().unwrap(), vec!["Food"]);
        assert_eq!(reloaded.expenses.get_all().unwrap(), vec![expense]);
    }

    #[test]
    fn test_legacy_ids_are_made_stable() {
        let store = MemoryStore::new();
        store
            .write(
                EXPENSES_KEY,
                r#"[{"description":"Tea","amount":2,"category":"Food","units":"","unitName":"","pricePerUnit":null,"comment":""}]"#,
            )
            .unwrap();

        let storage = Storage::with_store(Box::new(store));
        storage.load_all().unwrap();
        let first_id = storage.expenses.get_all().unwrap()[0].id;

        storage.load_all().unwrap();
        assert_eq!(storage.expenses.get_all().unwrap()[0].id, first_id);
    }

    #[test]
    fn test_commit_all_restores_categories_on_failure() {
        let flaky = FlakyStore {
            fail_key: Some(EXPENSES_KEY),
            ..Default::default()
        };
        flaky.inner.write(CATEGORIES_KEY, r#"["A","B"]"#).unwrap();
        let storage = Storage::with_store(Box::new(flaky));
        storage.load_all().unwrap();

        let result = storage.commit_all(vec!["B".into()], Vec::new());
        assert!(matches!(result, Err(LedgerError::Storage(_))));
        assert_eq!(storage.categories.get_all().unwrap(), vec!["A", "B"]);

        storage.load_all().unwrap();
        assert_eq!(storage.categories.get_all().unwrap(), vec!["A", "B"]);
    }
}
