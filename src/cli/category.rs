//! Category CLI commands
//!
//! Implements CLI commands for the category registry.

use clap::Subcommand;

use crate::display::format_category_list;
use crate::error::LedgerResult;
use crate::ledger::Ledger;

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List all categories in the order they were added
    List,

    /// Register a new category
    Add {
        /// Category name (case-sensitive)
        name: String,
    },

    /// Remove a category and every expense filed under it
    #[command(alias = "delete")]
    Remove {
        /// Category name (exact match)
        name: String,
    },
}

/// Handle a category command
pub fn handle_category_command(ledger: &Ledger, cmd: CategoryCommands) -> LedgerResult<()> {
    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_list(&ledger.categories()?));
        }

        CategoryCommands::Add { name } => {
            let name = ledger.add_category(&name)?;
            println!("Added category: {}", name);
        }

        CategoryCommands::Remove { name } => {
            let removal = ledger.remove_category(&name)?;
            println!("Removed category: {}", removal.name);
            if !removal.removed_expenses.is_empty() {
                println!(
                    "  Also deleted {} expense(s) in this category",
                    removal.removed_expenses.len()
                );
            }
        }
    }

    Ok(())
}
