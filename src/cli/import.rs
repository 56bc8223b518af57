//! CLI command handler for file import
//!
//! Replaces the ledger and registry with the contents of a `.json` or
//! `.csv` file.

use std::path::Path;

use crate::error::LedgerResult;
use crate::ledger::Ledger;

/// Handle the import command
pub fn handle_import_command(ledger: &Ledger, file: &Path) -> LedgerResult<()> {
    let result = ledger.import_file(file)?;

    println!("Import Complete!");
    println!("  Format:      {}", result.format);
    println!("  Expenses:    {}", result.expenses);
    println!("  Categories:  {}", result.categories);
    if !result.auto_registered.is_empty() {
        println!("  Registered:  {}", result.auto_registered.join(", "));
    }

    Ok(())
}
