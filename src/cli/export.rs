//! CLI commands for data export
//!
//! Writes the ledger as JSON or CSV to a file or to stdout.

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::storage::write_text_atomic;
use clap::ValueEnum;
use std::path::PathBuf;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// Expenses and categories as one JSON document
    Json,
    /// Expenses only, spreadsheet layout
    Csv,
}

impl ExportFormat {
    /// File name used when exporting into a directory
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::Json => "expenses.json",
            Self::Csv => "expenses.csv",
        }
    }
}

/// Handle the export command
pub fn handle_export_command(
    ledger: &Ledger,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> LedgerResult<()> {
    let text = match format {
        ExportFormat::Json => ledger.export_json()?,
        ExportFormat::Csv => ledger.export_csv()?,
    };

    match output {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(format.default_file_name())
            } else {
                path
            };
            write_text_atomic(&path, &text).map_err(|e| {
                LedgerError::Export(format!("Failed to write {}: {}", path.display(), e))
            })?;
            println!("Exported to: {}", path.display());
        }
        None => print!("{}", text),
    }

    Ok(())
}
