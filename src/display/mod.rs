//! Display formatting for terminal output
//!
//! Provides utilities for formatting views, totals and the category registry
//! for terminal display.

pub mod category;
pub mod expense;

pub use category::{format_category_list, format_category_totals};
pub use expense::{format_expense_details, format_expense_table};
