//! Expense display formatting
//!
//! Renders view rows as a table, plus single-expense details.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{format_amount, Expense};
use crate::view::{LedgerView, ViewRow};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Units")]
    units: String,
    #[tabled(rename = "Unit Name")]
    unit_name: String,
    #[tabled(rename = "Price per Unit")]
    price_per_unit: String,
    #[tabled(rename = "Comment")]
    comment: String,
}

impl From<&ViewRow> for ExpenseRow {
    fn from(row: &ViewRow) -> Self {
        let expense = &row.expense;
        let category = if row.orphaned {
            format!("{} *", expense.category)
        } else {
            expense.category.clone()
        };

        Self {
            id: row.id.short(),
            description: expense.description.clone(),
            amount: format_amount(row.amount),
            category,
            units: expense.units.to_string(),
            unit_name: expense.unit_name.clone(),
            price_per_unit: expense.price_per_unit.to_string(),
            comment: expense.comment.clone(),
        }
    }
}

/// Format the rows of a view as a table with the filtered total underneath
pub fn format_expense_table(view: &LedgerView) -> String {
    if view.rows.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows: Vec<ExpenseRow> = view.rows.iter().map(ExpenseRow::from).collect();
    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push('\n');
    output.push_str(&format!("Total: {:.2}\n", view.filtered_total));

    if view.rows.iter().any(|r| r.orphaned) {
        output.push_str("* category is no longer registered\n");
    }

    output
}

/// Format one expense for display
pub fn format_expense_details(expense: &Expense) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {} ({})\n", expense.id.short(), expense.id));
    output.push_str(&format!("Description: {}\n", expense.description));
    output.push_str(&format!(
        "Amount:      {}\n",
        format_amount(expense.effective_amount())
    ));
    output.push_str(&format!("Category:    {}\n", expense.category));

    if !expense.units.is_blank() || !expense.unit_name.is_empty() {
        output.push_str(&format!(
            "Units:       {} {}\n",
            expense.units, expense.unit_name
        ));
    }
    if !expense.price_per_unit.is_blank() {
        output.push_str(&format!("Unit price:  {}\n", expense.price_per_unit));
    }
    if !expense.comment.is_empty() {
        output.push_str(&format!("Comment:     {}\n", expense.comment));
    }

    output
}
