//! Expense Ledger - personal expense tracking by category
//!
//! This library provides the core of the expense ledger: a category
//! registry, an ordered ledger of expenses with derived amounts, a view
//! engine for sorted and filtered projections with totals, JSON and CSV
//! serialization, and a pluggable key-value persistence adapter.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory resolution and user settings
//! - `error`: Custom error types
//! - `models`: Expenses, numeric-or-blank fields, ids and category names
//! - `storage`: Key-value persistence and in-memory repositories
//! - `audit`: Audit logging system
//! - `services`: Business logic layer
//! - `view`: Sorting, filtering and totals
//! - `export`: JSON and CSV formats
//! - `ledger`: The facade over all of the above
//! - `display`, `cli`: Terminal front end
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_ledger::config::{LedgerPaths, Settings};
//! use expense_ledger::storage::MemoryStore;
//! use expense_ledger::{Expense, Ledger, ViewState};
//!
//! let ledger = Ledger::with_store(Box::new(MemoryStore::new()), Settings::default())?;
//! ledger.add_category("Food")?;
//! ledger.add_expense(Expense::new("Rice", 0.0, "Food").with_units(2.0, "kg", 1.5))?;
//! let view = ledger.view(&ViewState::new())?;
//! assert_eq!(view.grand_total, 3.0);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod models;
pub mod services;
pub mod storage;
pub mod view;

pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;
pub use models::{Expense, ExpenseField, ExpenseId, Numeric};
pub use view::{LedgerView, ViewState};
