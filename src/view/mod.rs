//! View engine
//!
//! Filtered and sorted row projections of the ledger plus category and
//! grand totals, recomputed on demand from caller-supplied view state.

pub mod engine;
pub mod state;

pub use engine::{
    build_view, category_totals, recompute_derived_amounts, CategoryTotal, LedgerView, ViewRow,
};
pub use state::{CategoryFilter, SortDirection, SortSpec, ViewState};
