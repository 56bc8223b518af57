//! Expense service
//!
//! Business logic for expense records: creation with amount derivation,
//! single-field edits, and removal by id or by storage position.

use crate::audit::{generate_diff, EntityType};
use crate::config::ValidationMode;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, ExpenseField, ExpenseId};
use crate::storage::Storage;
use crate::view::recompute_derived_amounts;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    mode: ValidationMode,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage, mode: ValidationMode) -> Self {
        Self { storage, mode }
    }

    /// Validate, derive the amount, append and persist
    pub fn add(&self, mut expense: Expense) -> LedgerResult<Expense> {
        expense.description = expense.description.trim().to_string();
        expense.category = expense.category.trim().to_string();
        expense.validate()?;
        self.check_category(&expense.category)?;

        expense.recompute_amount();

        let mut expenses = self.storage.expenses.get_all()?;
        expenses.push(expense.clone());
        self.storage.commit_expenses(expenses)?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        );

        Ok(expense)
    }

    /// Get an expense by id
    pub fn get(&self, id: ExpenseId) -> LedgerResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Resolve a full id or short display id to exactly one expense
    pub fn find(&self, query: &str) -> LedgerResult<Expense> {
        let mut matches = self.storage.expenses.find_matching(query)?;
        match matches.len() {
            0 => Err(LedgerError::expense_not_found(query)),
            1 => Ok(matches.remove(0)),
            n => Err(LedgerError::Validation(format!(
                "Id '{}' is ambiguous ({} expenses match)",
                query, n
            ))),
        }
    }

    /// All expenses in storage order
    pub fn list(&self) -> LedgerResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    /// Replace one field from raw input
    ///
    /// Only the named field changes; the amount is not rederived here since
    /// every view pass does that.
    pub fn update_field(
        &self,
        id: ExpenseId,
        field: ExpenseField,
        raw: &str,
    ) -> LedgerResult<Expense> {
        let mut expenses = self.storage.expenses.get_all()?;
        let index = expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| LedgerError::expense_not_found(id.to_string()))?;

        let before = expenses[index].clone();
        let mut after = before.clone();
        after.set_field(field, raw)?;
        if field == ExpenseField::Category {
            self.check_category(&after.category)?;
        }

        let diff = generate_diff(&serde_json::to_value(&before)?, &serde_json::to_value(&after)?);

        expenses[index] = after.clone();
        self.storage.commit_expenses(expenses)?;

        self.storage.log_update(
            EntityType::Expense,
            id.to_string(),
            Some(after.description.clone()),
            &before,
            &after,
            diff,
        );

        Ok(after)
    }

    /// Delete an expense by id
    pub fn remove(&self, id: ExpenseId) -> LedgerResult<Expense> {
        let expenses = self.storage.expenses.get_all()?;
        let index = expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| LedgerError::expense_not_found(id.to_string()))?;
        self.remove_index(expenses, index)
    }

    /// Delete the expense at `index` in storage order
    pub fn remove_at(&self, index: usize) -> LedgerResult<Expense> {
        let expenses = self.storage.expenses.get_all()?;
        if index >= expenses.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: expenses.len(),
            });
        }
        self.remove_index(expenses, index)
    }

    fn remove_index(&self, mut expenses: Vec<Expense>, index: usize) -> LedgerResult<Expense> {
        let removed = expenses.remove(index);
        self.storage.commit_expenses(expenses)?;

        self.storage.log_delete(
            EntityType::Expense,
            removed.id.to_string(),
            Some(removed.description.clone()),
            &removed,
        );

        Ok(removed)
    }

    /// A copy of the ledger with the derivation rule applied; nothing is stored
    pub fn recompute_derived_amounts(&self) -> LedgerResult<Vec<Expense>> {
        let mut expenses = self.storage.expenses.get_all()?;
        recompute_derived_amounts(&mut expenses);
        Ok(expenses)
    }

    fn check_category(&self, category: &str) -> LedgerResult<()> {
        if self.mode == ValidationMode::Strict && !self.storage.categories.contains(category)? {
            return Err(LedgerError::category_not_found(category));
        }
        Ok(())
    }
}
