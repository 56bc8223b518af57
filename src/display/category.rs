//! Category display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::view::LedgerView;

#[derive(Tabled)]
struct TotalRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Total")]
    total: String,
}

/// Format the registry as a numbered list
pub fn format_category_list(categories: &[String]) -> String {
    if categories.is_empty() {
        return "No categories. Add one with 'expense category add <NAME>'.\n".to_string();
    }

    let mut output = String::new();
    for (i, name) in categories.iter().enumerate() {
        output.push_str(&format!("{:>3}. {}\n", i + 1, name));
    }
    output
}

/// Format per-category totals and the grand total
pub fn format_category_totals(view: &LedgerView) -> String {
    if view.category_totals.is_empty() {
        return "No totals yet.\n".to_string();
    }

    let rows: Vec<TotalRow> = view
        .category_totals
        .iter()
        .map(|t| TotalRow {
            category: t.category.clone(),
            total: format!("{:.2}", t.total),
        })
        .collect();

    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push('\n');
    output.push_str(&format!("Grand total: {:.2}\n", view.grand_total));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Expense;
    use crate::view::{build_view, ViewState};

    #[test]
    fn test_category_list() {
        assert!(format_category_list(&[]).starts_with("No categories"));

        let output = format_category_list(&["Food".into(), "Travel".into()]);
        assert_eq!(output, "  1. Food\n  2. Travel\n");
    }

    #[test]
    fn test_category_totals() {
        let expenses = vec![
            Expense::new("a", 10.0, "Food"),
            Expense::new("b", 2.5, "Travel"),
            Expense::new("c", 1.0, "Food"),
        ];
        let view = build_view(&expenses, &[], &ViewState::new());
        let output = format_category_totals(&view);

        assert!(output.contains("Food"));
        assert!(output.contains("11.00"));
        assert!(output.contains("Grand total: 13.50"));
        assert!(output.find("Food").unwrap() < output.find("Travel").unwrap());
    }
}
