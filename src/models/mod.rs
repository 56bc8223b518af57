//! Core data models for the expense ledger
//!
//! Expenses, their numeric fields and identifiers, and category names.

pub mod category;
pub mod expense;
pub mod ids;
pub mod numeric;

pub use category::{normalize_category_name, CategoryValidationError};
pub use expense::{reassign_duplicate_ids, Expense, ExpenseField, ExpenseValidationError};
pub use ids::ExpenseId;
pub use numeric::{format_amount, parse_number, Numeric};
