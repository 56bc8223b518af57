//! Service layer for the expense ledger
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, derived amounts, and cross-collection operations.

pub mod category;
pub mod expense;
pub mod import;

pub use category::{CategoryRemoval, CategoryService};
pub use expense::ExpenseService;
pub use import::{ImportFormat, ImportResult, ImportService};
