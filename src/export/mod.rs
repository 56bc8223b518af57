//! Export and import formats
//!
//! - JSON: the full ledger document (expenses plus category registry)
//! - CSV: the expense ledger only, in the spreadsheet column layout

pub mod csv;
pub mod json;

pub use csv::{export_ledger_csv, from_csv, to_csv, CsvImport, BOM, CSV_HEADER};
pub use json::{export_ledger_json, LedgerDocument};
