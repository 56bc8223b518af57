//! View computation
//!
//! A pure function of (expenses, registry, view state): filter, derive
//! amounts, sort, and aggregate. Nothing here is persisted.

use serde::Serialize;
use std::cmp::Ordering;

use crate::models::{Expense, ExpenseField, ExpenseId};

use super::state::{SortDirection, ViewState};

/// One displayed row
#[derive(Debug, Clone, Serialize)]
pub struct ViewRow {
    pub id: ExpenseId,
    /// Position of the record in storage order
    pub position: usize,
    /// The record with its derived amount applied
    pub expense: Expense,
    /// Amount to display; `None` renders blank
    pub amount: Option<f64>,
    /// The record's category is not in the registry
    pub orphaned: bool,
}

/// Sum of amounts for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Rows plus totals
#[derive(Debug, Clone, Serialize)]
pub struct LedgerView {
    pub rows: Vec<ViewRow>,
    /// Sum over the displayed rows
    pub filtered_total: f64,
    /// Per-category sums over the whole ledger, first-seen order
    pub category_totals: Vec<CategoryTotal>,
    /// Sum of the category totals
    pub grand_total: f64,
}

/// Apply the amount derivation rule to every record, returning how many
/// amounts changed
pub fn recompute_derived_amounts(expenses: &mut [Expense]) -> usize {
    expenses
        .iter_mut()
        .map(|e| e.recompute_amount())
        .filter(|changed| *changed)
        .count()
}

/// Per-category totals over `expenses`; blank and invalid amounts are skipped
pub fn category_totals(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for expense in expenses {
        let Some(amount) = expense.effective_amount() else {
            continue;
        };
        match totals.iter_mut().find(|t| t.category == expense.category) {
            Some(total) => total.total += amount,
            None => totals.push(CategoryTotal {
                category: expense.category.clone(),
                total: amount,
            }),
        }
    }

    totals
}

/// Compute the view for `state`
pub fn build_view(expenses: &[Expense], categories: &[String], state: &ViewState) -> LedgerView {
    let mut rows: Vec<ViewRow> = expenses
        .iter()
        .enumerate()
        .filter(|(_, e)| state.filter.matches(&e.category))
        .map(|(position, expense)| {
            let mut expense = expense.clone();
            expense.recompute_amount();
            ViewRow {
                id: expense.id,
                position,
                amount: expense.effective_amount(),
                orphaned: !categories.iter().any(|c| *c == expense.category),
                expense,
            }
        })
        .collect();

    if let Some(spec) = state.sort {
        rows.sort_by(|a, b| {
            let ordering = compare_rows(a, b, spec.column);
            match spec.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    let filtered_total = rows.iter().filter_map(|r| r.amount).sum();
    let category_totals = category_totals(expenses);
    let grand_total = category_totals.iter().map(|t| t.total).sum();

    LedgerView {
        rows,
        filtered_total,
        category_totals,
        grand_total,
    }
}

fn compare_rows(a: &ViewRow, b: &ViewRow, column: ExpenseField) -> Ordering {
    match column {
        ExpenseField::Amount => compare_numbers(a.amount, b.amount),
        ExpenseField::Units | ExpenseField::PricePerUnit => compare_numbers(
            a.expense.numeric(column).and_then(|n| n.value()),
            b.expense.numeric(column).and_then(|n| n.value()),
        ),
        _ => a
            .expense
            .text(column)
            .unwrap_or_default()
            .cmp(b.expense.text(column).unwrap_or_default()),
    }
}

/// Blank sorts before any number
fn compare_numbers(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
