//! CSV format
//!
//! Spreadsheet-friendly export of the expense ledger and the matching
//! import parser. Files start with a UTF-8 byte order mark and use `\n`
//! line endings.

use crate::config::CsvDialect;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, ExpenseField, Numeric};
use crate::storage::Storage;
use csv::{QuoteStyle, ReaderBuilder, Terminator, Trim, WriterBuilder};
use std::io::Write;

/// UTF-8 byte order mark written ahead of the header
pub const BOM: &str = "\u{feff}";

/// Column header line, without BOM or terminator
pub const CSV_HEADER: &str = "Description,Amount,Category,Units,Unit Name,Price per Unit,Comment";

/// Number of columns each record maps onto
const COLUMN_COUNT: usize = 7;

/// Result of parsing a CSV import
#[derive(Debug, Clone, PartialEq)]
pub struct CsvImport {
    pub expenses: Vec<Expense>,
    /// Distinct non-blank categories in first-seen order
    pub categories: Vec<String>,
}

fn columns() -> [ExpenseField; COLUMN_COUNT] {
    [
        ExpenseField::Description,
        ExpenseField::Amount,
        ExpenseField::Category,
        ExpenseField::Units,
        ExpenseField::UnitName,
        ExpenseField::PricePerUnit,
        ExpenseField::Comment,
    ]
}

fn record_fields(expense: &Expense) -> [String; COLUMN_COUNT] {
    [
        expense.description.clone(),
        expense.amount.to_string(),
        expense.category.clone(),
        expense.units.to_string(),
        expense.unit_name.clone(),
        expense.price_per_unit.to_string(),
        expense.comment.clone(),
    ]
}

/// Render expenses as CSV text
pub fn to_csv(expenses: &[Expense], dialect: CsvDialect) -> LedgerResult<String> {
    match dialect {
        CsvDialect::Legacy => {
            let mut out = String::from(BOM);
            out.push_str(CSV_HEADER);
            out.push('\n');
            for expense in expenses {
                out.push_str(&record_fields(expense).join(","));
                out.push('\n');
            }
            Ok(out)
        }
        CsvDialect::Rfc4180 => {
            let mut buffer = BOM.as_bytes().to_vec();
            {
                let mut writer = WriterBuilder::new()
                    .quote_style(QuoteStyle::Necessary)
                    .terminator(Terminator::Any(b'\n'))
                    .from_writer(&mut buffer);

                writer
                    .write_record(columns().iter().map(|c| c.label()))
                    .map_err(|e| LedgerError::Export(e.to_string()))?;
                for expense in expenses {
                    writer
                        .write_record(&record_fields(expense))
                        .map_err(|e| LedgerError::Export(e.to_string()))?;
                }
                writer
                    .flush()
                    .map_err(|e| LedgerError::Export(e.to_string()))?;
            }
            String::from_utf8(buffer).map_err(|e| LedgerError::Export(e.to_string()))
        }
    }
}

/// Export the ledger to CSV
pub fn export_ledger_csv<W: Write>(
    storage: &Storage,
    writer: &mut W,
    dialect: CsvDialect,
) -> LedgerResult<()> {
    let text = to_csv(&storage.expenses.get_all()?, dialect)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| LedgerError::Export(e.to_string()))
}

/// Parse CSV text into expenses and the registry they imply
///
/// The first line is the header. Rows with fewer fields than the header are
/// skipped. `amount` and `pricePerUnit` fall back to zero when they are not
/// numbers; `units` keeps whatever was there.
pub fn from_csv(text: &str, dialect: CsvDialect) -> LedgerResult<CsvImport> {
    let text = text.strip_prefix(BOM).unwrap_or(text);

    let rows = match dialect {
        CsvDialect::Legacy => split_legacy(text),
        CsvDialect::Rfc4180 => split_rfc4180(text)?,
    };

    let mut expenses = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        if row.len() < COLUMN_COUNT {
            return Err(LedgerError::InvalidFileFormat(format!(
                "Record {} has {} fields, expected at least {}",
                index + 1,
                row.len(),
                COLUMN_COUNT
            )));
        }
        expenses.push(parse_row(&row));
    }

    let mut categories: Vec<String> = Vec::new();
    for expense in &expenses {
        if !expense.category.is_empty() && !categories.contains(&expense.category) {
            categories.push(expense.category.clone());
        }
    }

    Ok(CsvImport {
        expenses,
        categories,
    })
}

/// Data rows that have at least as many fields as the header
fn split_legacy(text: &str) -> Vec<Vec<String>> {
    let mut lines = text.split('\n');
    let header_len = lines.next().map(|h| h.split(',').count()).unwrap_or(0);

    lines
        .map(|line| line.split(',').map(|f| f.trim().to_string()).collect::<Vec<_>>())
        .filter(|row| row.len() >= header_len)
        .collect()
}

fn split_rfc4180(text: &str) -> LedgerResult<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let header_len = reader
        .headers()
        .map_err(|e| LedgerError::InvalidFileFormat(e.to_string()))?
        .len();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| LedgerError::InvalidFileFormat(e.to_string()))?;
        if record.len() < header_len {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

fn parse_row(row: &[String]) -> Expense {
    let mut expense = Expense::new(
        row[0].trim(),
        Numeric::parse_or_zero(&row[1]),
        row[2].trim(),
    );
    expense.units = Numeric::parse(&row[3]);
    expense.unit_name = row[4].trim().to_string();
    expense.price_per_unit = Numeric::parse_or_zero(&row[5]);
    expense.comment = row[6].trim().to_string();
    expense
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn sample() -> Vec<Expense> {
        vec![
            Expense::new("Coffee", 3.5, "Food").with_comment("morning"),
            Expense::new("Rice", 3.0, "Food").with_units(2.0, "kg", 1.5),
            Expense::new("Bus", 10.0, "Travel"),
        ]
    }

    #[test]
    fn test_to_csv_layout() {
        let text = to_csv(&sample(), CsvDialect::Rfc4180).unwrap();
        let mut lines = text.split('\n');

        assert_eq!(lines.next(), Some(format!("{}{}", BOM, CSV_HEADER).as_str()));
        assert_eq!(lines.next(), Some("Coffee,3.5,Food,,,,morning"));
        assert_eq!(lines.next(), Some("Rice,3,Food,2,kg,1.5,"));
        assert_eq!(lines.next(), Some("Bus,10,Travel,,,,"));
        assert_eq!(lines.next(), Some(""));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_rfc4180_quotes_commas() {
        let expenses = vec![Expense::new("Milk, eggs", 4.0, "Food").with_comment("said \"hi\"")];
        let text = to_csv(&expenses, CsvDialect::Rfc4180).unwrap();
        assert!(text.contains("\"Milk, eggs\",4,Food,,,,\"said \"\"hi\"\"\"\n"));

        let parsed = from_csv(&text, CsvDialect::Rfc4180).unwrap();
        assert_eq!(parsed.expenses[0].description, "Milk, eggs");
        assert_eq!(parsed.expenses[0].comment, "said \"hi\"");
    }

    #[test]
    fn test_legacy_does_not_quote() {
        let expenses = vec![Expense::new("Milk, eggs", 4.0, "Food")];
        let text = to_csv(&expenses, CsvDialect::Legacy).unwrap();
        assert!(text.ends_with("Milk, eggs,4,Food,,,,\n"));

        // The extra comma shifts every column on the way back in
        let parsed = from_csv(&text, CsvDialect::Legacy).unwrap();
        assert_eq!(parsed.expenses[0].description, "Milk");
        assert_eq!(parsed.expenses[0].amount, Numeric::Value(0.0));
    }

    #[test]
    fn test_roundtrip_both_dialects() {
        for dialect in [CsvDialect::Rfc4180, CsvDialect::Legacy] {
            let text = to_csv(&sample(), dialect).unwrap();
            let parsed = from_csv(&text, dialect).unwrap();

            assert_eq!(parsed.expenses.len(), 3);
            assert_eq!(parsed.expenses[1].description, "Rice");
            assert_eq!(parsed.expenses[1].units, Numeric::Value(2.0));
            assert_eq!(parsed.expenses[1].unit_name, "kg");
            assert_eq!(parsed.expenses[1].price_per_unit, Numeric::Value(1.5));
            assert_eq!(parsed.categories, vec!["Food", "Travel"]);
        }
    }

    #[test]
    fn test_non_numeric_fields_default_to_zero() {
        let text = format!("{}\nTea,abc,Food,,,n/a,\n", CSV_HEADER);
        let parsed = from_csv(&text, CsvDialect::Rfc4180).unwrap();
        let expense = &parsed.expenses[0];

        assert_eq!(expense.amount, Numeric::Value(0.0));
        assert_eq!(expense.price_per_unit, Numeric::Value(0.0));
        assert_eq!(expense.units, Numeric::Blank);
    }

    #[test]
    fn test_trailing_blank_line_produces_no_record() {
        for dialect in [CsvDialect::Rfc4180, CsvDialect::Legacy] {
            let text = format!("{}\nTea,2,Food,,,,\n\n", CSV_HEADER);
            let parsed = from_csv(&text, dialect).unwrap();
            assert_eq!(parsed.expenses.len(), 1);
        }
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let text = format!("{}\nTea,2\nBread,1,Food,,,,\n", CSV_HEADER);
        let parsed = from_csv(&text, CsvDialect::Rfc4180).unwrap();
        assert_eq!(parsed.expenses.len(), 1);
        assert_eq!(parsed.expenses[0].description, "Bread");
    }

    #[test]
    fn test_fields_are_trimmed_and_crlf_tolerated() {
        let text = format!("{}\r\n  Tea , 2 , Food ,,,, hot \r\n", CSV_HEADER);
        let parsed = from_csv(&text, CsvDialect::Legacy).unwrap();
        let expense = &parsed.expenses[0];

        assert_eq!(expense.description, "Tea");
        assert_eq!(expense.amount, Numeric::Value(2.0));
        assert_eq!(expense.category, "Food");
        assert_eq!(expense.comment, "hot");
    }

    #[test]
    fn test_narrow_header_is_invalid() {
        let text = "Description,Amount\nTea,2\n";
        let result = from_csv(text, CsvDialect::Rfc4180);
        assert!(matches!(result, Err(LedgerError::InvalidFileFormat(_))));
    }

    #[test]
    fn test_empty_input() {
        for text in ["", BOM] {
            let parsed = from_csv(text, CsvDialect::Rfc4180).unwrap();
            assert!(parsed.expenses.is_empty());
            assert!(parsed.categories.is_empty());
        }
    }

    #[test]
    fn test_blank_categories_not_registered() {
        let text = format!("{}\nTea,2,,,,,\nBun,1,Food,,,,\n", CSV_HEADER);
        let parsed = from_csv(&text, CsvDialect::Rfc4180).unwrap();
        assert_eq!(parsed.expenses.len(), 2);
        assert_eq!(parsed.categories, vec!["Food"]);
    }

    #[test]
    fn test_export_ledger_csv() {
        let storage = Storage::with_store(Box::new(MemoryStore::new()));
        storage.commit_expenses(sample()).unwrap();

        let mut output = Vec::new();
        export_ledger_csv(&storage, &mut output, CsvDialect::Legacy).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with(BOM));
        assert_eq!(text.lines().count(), 4);
    }
}
