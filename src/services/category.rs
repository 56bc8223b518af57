//! Category service
//!
//! Registry management: adding names, listing them, and removing a name
//! together with every expense filed under it.

use serde_json::json;

use crate::audit::EntityType;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{normalize_category_name, Expense};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

/// What a category removal took with it
#[derive(Debug, Clone)]
pub struct CategoryRemoval {
    pub name: String,
    pub removed_expenses: Vec<Expense>,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a new category, returning the stored (trimmed) name
    pub fn add(&self, name: &str) -> LedgerResult<String> {
        let name =
            normalize_category_name(name).map_err(|e| LedgerError::Validation(e.to_string()))?;

        let mut categories = self.storage.categories.get_all()?;
        if categories.contains(&name) {
            return Err(LedgerError::duplicate_category(name));
        }

        categories.push(name.clone());
        self.storage.commit_categories(categories)?;

        self.storage
            .log_create(EntityType::Category, name.clone(), Some(name.clone()), &name);

        Ok(name)
    }

    /// Remove a category and every expense in it
    ///
    /// Both collections are persisted as a unit; on failure nothing changes.
    pub fn remove(&self, name: &str) -> LedgerResult<CategoryRemoval> {
        let name = name.trim();
        let mut categories = self.storage.categories.get_all()?;
        let position = categories
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| LedgerError::category_not_found(name))?;
        let name = categories.remove(position);

        let (removed_expenses, kept): (Vec<Expense>, Vec<Expense>) = self
            .storage
            .expenses
            .get_all()?
            .into_iter()
            .partition(|e| e.category == name);

        self.storage.commit_all(categories, kept)?;

        self.storage.log_delete(
            EntityType::Category,
            name.clone(),
            Some(name.clone()),
            &json!({
                "name": name,
                "removedExpenses": removed_expenses.len(),
            }),
        );

        Ok(CategoryRemoval {
            name,
            removed_expenses,
        })
    }

    /// All category names in insertion order
    pub fn list(&self) -> LedgerResult<Vec<String>> {
        self.storage.categories.get_all()
    }

    /// Whether `name` is registered (exact match)
    pub fn exists(&self, name: &str) -> LedgerResult<bool> {
        self.storage.categories.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::storage::tests::FlakyStore;
    use crate::storage::{KeyValueStore, MemoryStore, EXPENSES_KEY};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(&paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_add_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        assert_eq!(service.add("  Food ").unwrap(), "Food");
        service.add("Travel").unwrap();

        assert_eq!(service.list().unwrap(), vec!["Food", "Travel"]);
        assert!(service.exists("Food").unwrap());
        assert!(!service.exists("food").unwrap());
    }

    #[test]
    fn test_add_rejects_blank_and_duplicates() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        assert!(service.add("   ").unwrap_err().is_validation());

        service.add("Food").unwrap();
        let err = service.add(" Food").unwrap_err();
        assert!(matches!(err, LedgerError::Duplicate { .. }));

        // Names are case-sensitive
        service.add("food").unwrap();
        assert_eq!(service.list().unwrap().len(), 2);
    }

    #[test]
    fn test_remove_cascades() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        service.add("A").unwrap();
        service.add("B").unwrap();
        storage
            .commit_expenses(vec![
                Expense::new("one", 1.0, "A"),
                Expense::new("two", 2.0, "B"),
                Expense::new("three", 3.0, "A"),
            ])
            .unwrap();

        let removal = service.remove("A").unwrap();
        assert_eq!(removal.removed_expenses.len(), 2);

        let expenses = storage.expenses.get_all().unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].category, "B");
        assert_eq!(service.list().unwrap(), vec!["B"]);
    }

    #[test]
    fn test_remove_unknown_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        assert!(service.remove("Nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_remove_is_logged() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        service.add("Food").unwrap();
        service.remove("Food").unwrap();

        let entries = storage.audit().unwrap().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].entity_id, "Food");
    }

    #[test]
    fn test_failed_cascade_changes_nothing() {
        let flaky = FlakyStore {
            fail_key: Some(EXPENSES_KEY),
            ..Default::default()
        };
        flaky
            .inner
            .write(crate::storage::CATEGORIES_KEY, r#"["A","B"]"#)
            .unwrap();
        flaky
            .inner
            .write(
                EXPENSES_KEY,
                &crate::storage::expenses::encode_expenses(&[Expense::new("x", 1.0, "A")])
                    .unwrap(),
            )
            .unwrap();

        let storage = Storage::with_store(Box::new(flaky));
        storage.load_all().unwrap();
        let service = CategoryService::new(&storage);

        assert!(service.remove("A").is_err());
        assert_eq!(service.list().unwrap(), vec!["A", "B"]);
        assert_eq!(storage.expenses.count().unwrap(), 1);
    }

    #[test]
    fn test_remove_trims_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        service.add(" Food").unwrap();

        let removal = service.remove(" Food ").unwrap();
        assert_eq!(removal.name, "Food");
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_audit_failure_does_not_fail_commit() {
        let temp_dir = TempDir::new().unwrap();
        // A directory cannot be opened for appending
        let storage = Storage::with_store(Box::new(MemoryStore::new()))
            .with_audit(crate::audit::AuditLogger::new(temp_dir.path().to_path_buf()));
        let service = CategoryService::new(&storage);

        assert_eq!(service.add("Food").unwrap(), "Food");
        assert_eq!(service.list().unwrap(), vec!["Food"]);

        let warnings = storage.take_audit_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("audit log"));
        assert!(storage.take_audit_warnings().is_empty());

        service.remove("Food").unwrap();
        assert!(service.list().unwrap().is_empty());
        assert_eq!(storage.take_audit_warnings().len(), 1);
    }

    #[test]
    fn test_memory_backed_service() {
        let storage = Storage::with_store(Box::new(MemoryStore::new()));
        let service = CategoryService::new(&storage);
        service.add("Food").unwrap();
        assert_eq!(service.list().unwrap(), vec!["Food"]);
    }
}
