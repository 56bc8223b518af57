//! Expense CLI commands
//!
//! Adding, editing, deleting and listing expenses. Ids are accepted in full
//! or by their short `exp-` prefix.

use clap::Subcommand;

use crate::display::{format_category_totals, format_expense_details, format_expense_table};
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::{Expense, ExpenseField, Numeric};
use crate::view::{CategoryFilter, SortDirection, ViewState};

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Add a new expense
    Add {
        /// What the money was spent on
        description: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Amount (derived from units and price per unit when both are given)
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// Number of units
        #[arg(short, long)]
        units: Option<String>,
        /// Unit label (e.g. "kg")
        #[arg(long)]
        unit_name: Option<String>,
        /// Price of a single unit
        #[arg(short, long = "price-per-unit", allow_hyphen_values = true)]
        price: Option<String>,
        /// Free-text comment
        #[arg(short = 'm', long)]
        comment: Option<String>,
    },

    /// Show one expense
    Show {
        /// Expense ID
        id: String,
    },

    /// Change one field of an expense
    Edit {
        /// Expense ID
        id: String,
        /// Field: description, amount, category, units, unitName, pricePerUnit, comment
        field: String,
        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        #[arg(required_unless_present = "position")]
        id: Option<String>,
        /// Delete by position in storage order instead (starting at 1)
        #[arg(long, conflicts_with = "id")]
        position: Option<usize>,
    },

    /// List expenses
    #[command(alias = "ls")]
    List {
        /// Sort column: description, amount, category, units, unitName, pricePerUnit, comment
        #[arg(short, long)]
        sort: Option<String>,
        /// Sort descending
        #[arg(long)]
        desc: bool,
        /// Only show this category ("all" shows everything)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show totals per category and the grand total
    Totals,
}

/// Handle an expense command
pub fn handle_expense_command(ledger: &Ledger, cmd: ExpenseCommands) -> LedgerResult<()> {
    match cmd {
        ExpenseCommands::Add {
            description,
            category,
            amount,
            units,
            unit_name,
            price,
            comment,
        } => {
            let expense = Expense::new(
                description,
                parse_optional(amount.as_deref()),
                category,
            )
            .with_units(
                parse_optional(units.as_deref()),
                unit_name.unwrap_or_default(),
                parse_optional(price.as_deref()),
            )
            .with_comment(comment.unwrap_or_default());

            let expense = ledger.add_expense(expense)?;
            println!("Added expense: {}", expense);
            println!("  ID: {}", expense.id.short());
        }

        ExpenseCommands::Show { id } => {
            let expense = ledger.find_expense(&id)?;
            print!("{}", format_expense_details(&expense));
        }

        ExpenseCommands::Edit { id, field, value } => {
            let field: ExpenseField = field.parse()?;
            let expense = ledger.find_expense(&id)?;
            let updated = ledger.update_expense_field(expense.id, field, &value)?;
            println!("Updated {} of {}", field, updated);
        }

        ExpenseCommands::Delete { id, position } => {
            let removed = match (id, position) {
                (Some(id), _) => {
                    let expense = ledger.find_expense(&id)?;
                    ledger.delete_expense(expense.id)?
                }
                (None, Some(position)) => {
                    let index = position.checked_sub(1).ok_or_else(|| {
                        LedgerError::Validation("Positions start at 1".into())
                    })?;
                    ledger.delete_expense_at(index)?
                }
                (None, None) => {
                    return Err(LedgerError::Validation(
                        "Give an expense ID or --position".into(),
                    ))
                }
            };
            println!("Deleted expense: {}", removed);
        }

        ExpenseCommands::List {
            sort,
            desc,
            category,
        } => {
            let mut state =
                ViewState::new().filtered(CategoryFilter::parse(category.as_deref().unwrap_or("")));
            if let Some(column) = sort {
                let direction = if desc {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                };
                state = state.sorted_by(column.parse()?, direction);
            }

            print!("{}", format_expense_table(&ledger.view(&state)?));
        }

        ExpenseCommands::Totals => {
            print!("{}", format_category_totals(&ledger.view(&ViewState::new())?));
        }
    }

    Ok(())
}

fn parse_optional(raw: Option<&str>) -> Numeric {
    raw.map(Numeric::parse).unwrap_or_default()
}
