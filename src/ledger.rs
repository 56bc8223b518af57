//! The ledger facade
//!
//! One entry point over storage, settings and the services, exposing the
//! full operation set a front end needs. Every call is synchronous and
//! either fully applies or leaves state unchanged.

use std::path::Path;

use crate::config::{LedgerPaths, Settings};
use crate::error::LedgerResult;
use crate::export::{to_csv, LedgerDocument};
use crate::models::{Expense, ExpenseField, ExpenseId};
use crate::services::{
    CategoryRemoval, CategoryService, ExpenseService, ImportResult, ImportService,
};
use crate::storage::{KeyValueStore, Storage};
use crate::view::{build_view, LedgerView, ViewState};

/// Category registry, expense ledger and their persistence
pub struct Ledger {
    storage: Storage,
    settings: Settings,
}

impl Ledger {
    /// Open the file-backed ledger under `paths`
    ///
    /// Default settings are written out on first use.
    pub fn open(paths: &LedgerPaths) -> LedgerResult<Self> {
        let settings = Settings::load_or_create(paths)?;
        let storage = Storage::new(paths)?;
        if !paths.settings_file().exists() {
            settings.save(paths)?;
        }
        storage.load_all()?;
        Ok(Self { storage, settings })
    }

    /// Open a ledger over any persistence adapter
    pub fn with_store(store: Box<dyn KeyValueStore>, settings: Settings) -> LedgerResult<Self> {
        let storage = Storage::with_store(store);
        storage.load_all()?;
        Ok(Self { storage, settings })
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Audit log failures from committed operations since the last call
    pub fn take_audit_warnings(&self) -> Vec<String> {
        self.storage.take_audit_warnings()
    }

    fn category_service(&self) -> CategoryService<'_> {
        CategoryService::new(&self.storage)
    }

    fn expense_service(&self) -> ExpenseService<'_> {
        ExpenseService::new(&self.storage, self.settings.validation_mode)
    }

    fn import_service(&self) -> ImportService<'_> {
        ImportService::new(
            &self.storage,
            self.settings.validation_mode,
            self.settings.csv_dialect,
        )
    }

    // === Categories ===

    pub fn add_category(&self, name: &str) -> LedgerResult<String> {
        self.category_service().add(name)
    }

    /// Remove a category and cascade to its expenses
    pub fn remove_category(&self, name: &str) -> LedgerResult<CategoryRemoval> {
        self.category_service().remove(name)
    }

    pub fn categories(&self) -> LedgerResult<Vec<String>> {
        self.category_service().list()
    }

    // === Expenses ===

    pub fn expenses(&self) -> LedgerResult<Vec<Expense>> {
        self.expense_service().list()
    }

    pub fn add_expense(&self, expense: Expense) -> LedgerResult<Expense> {
        self.expense_service().add(expense)
    }

    /// Resolve a full or short id
    pub fn find_expense(&self, query: &str) -> LedgerResult<Expense> {
        self.expense_service().find(query)
    }

    pub fn update_expense_field(
        &self,
        id: ExpenseId,
        field: ExpenseField,
        raw: &str,
    ) -> LedgerResult<Expense> {
        self.expense_service().update_field(id, field, raw)
    }

    pub fn delete_expense(&self, id: ExpenseId) -> LedgerResult<Expense> {
        self.expense_service().remove(id)
    }

    /// Delete by position in storage order
    pub fn delete_expense_at(&self, index: usize) -> LedgerResult<Expense> {
        self.expense_service().remove_at(index)
    }

    // === Views ===

    pub fn view(&self, state: &ViewState) -> LedgerResult<LedgerView> {
        let expenses = self.storage.expenses.get_all()?;
        let categories = self.storage.categories.get_all()?;
        Ok(build_view(&expenses, &categories, state))
    }

    // === Export / import ===

    /// The whole-ledger JSON document
    pub fn export_json(&self) -> LedgerResult<String> {
        LedgerDocument::from_storage(&self.storage)?.to_json(self.settings.pretty_json)
    }

    /// The ledger as CSV, BOM included
    pub fn export_csv(&self) -> LedgerResult<String> {
        to_csv(&self.storage.expenses.get_all()?, self.settings.csv_dialect)
    }

    pub fn import_json(&self, text: &str) -> LedgerResult<ImportResult> {
        self.import_service().import_json(text)
    }

    pub fn import_csv(&self, text: &str) -> LedgerResult<ImportResult> {
        self.import_service().import_csv(text)
    }

    pub fn import_file(&self, path: &Path) -> LedgerResult<ImportResult> {
        self.import_service().import_file(path)
    }
}
