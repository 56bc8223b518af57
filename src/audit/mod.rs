//! Audit logging
//!
//! Every successful create, update, delete and import is appended to a
//! line-delimited JSON log with before/after snapshots.
//!
//! - `AuditEntry`: one log record
//! - `AuditLogger`: appends to and reads back the JSONL file
//! - `generate_diff`: top-level field diff used for update summaries

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
