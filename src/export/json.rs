//! JSON document format
//!
//! The whole-ledger document is `{ "expenses": [...], "categories": [...] }`,
//! the same shape the stored snapshots use.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{reassign_duplicate_ids, Expense};
use crate::storage::Storage;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Full ledger document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerDocument {
    /// All expenses, in storage order
    pub expenses: Vec<Expense>,

    /// The category registry, in insertion order
    pub categories: Vec<String>,
}

impl LedgerDocument {
    pub fn new(expenses: Vec<Expense>, categories: Vec<String>) -> Self {
        Self {
            expenses,
            categories,
        }
    }

    /// Snapshot the current ledger and registry
    pub fn from_storage(storage: &Storage) -> LedgerResult<Self> {
        Ok(Self::new(
            storage.expenses.get_all()?,
            storage.categories.get_all()?,
        ))
    }

    /// Serialize the document
    pub fn to_json(&self, pretty: bool) -> LedgerResult<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
        .map_err(|e| LedgerError::Export(e.to_string()))
    }

    /// Parse a document; anything without the ledger shape is malformed
    pub fn from_json(text: &str) -> LedgerResult<Self> {
        let mut document: Self = serde_json::from_str(text.trim_start_matches('\u{feff}'))
            .map_err(|e| LedgerError::MalformedDocument(e.to_string()))?;
        document.normalize_categories();
        reassign_duplicate_ids(&mut document.expenses);
        Ok(document)
    }

    /// Trim registry names and drop blanks and repeats, keeping first-seen order
    pub fn normalize_categories(&mut self) {
        let mut seen: Vec<String> = Vec::with_capacity(self.categories.len());
        for name in self.categories.drain(..) {
            let name = name.trim().to_string();
            if !name.is_empty() && !seen.contains(&name) {
                seen.push(name);
            }
        }
        self.categories = seen;
    }

    /// Categories referenced by expenses but missing from the registry,
    /// in first-seen order
    pub fn unknown_categories(&self) -> Vec<String> {
        let mut unknown: Vec<String> = Vec::new();
        for expense in &self.expenses {
            if !self.categories.contains(&expense.category) && !unknown.contains(&expense.category)
            {
                unknown.push(expense.category.clone());
            }
        }
        unknown
    }
}

/// Export the ledger and registry to JSON
pub fn export_ledger_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> LedgerResult<()> {
    let document = LedgerDocument::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &document)
    } else {
        serde_json::to_writer(writer, &document)
    }
    .map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Numeric;
    use crate::storage::MemoryStore;

    fn sample() -> LedgerDocument {
        LedgerDocument::new(
            vec![
                Expense::new("Coffee", 3.5, "Food").with_comment("morning"),
                Expense::new("Rice", 3.0, "Food").with_units(2.0, "kg", 1.5),
                Expense::new("Bus", Numeric::Blank, "Travel"),
            ],
            vec!["Food".into(), "Travel".into()],
        )
    }

    #[test]
    fn test_json_roundtrip() {
        let document = sample();
        let json = document.to_json(false).unwrap();
        assert!(!json.contains('\n'));

        let parsed = LedgerDocument::from_json(&json).unwrap();
        assert_eq!(parsed, document);
    }

    #[test]
    fn test_wire_shape() {
        let json = sample().to_json(false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let first = &value["expenses"][0];
        assert_eq!(first["description"], "Coffee");
        assert_eq!(first["amount"], 3.5);
        assert_eq!(first["unitName"], "");
        assert!(first["pricePerUnit"].is_null());
        assert_eq!(value["categories"][1], "Travel");
    }

    #[test]
    fn test_legacy_document_without_ids() {
        let text = r#"{"expenses":[{"description":"Tea","amount":"2","category":"Food","units":"","unitName":"","pricePerUnit":0,"comment":""}],"categories":["Food"]}"#;
        let document = LedgerDocument::from_json(text).unwrap();

        assert_eq!(document.expenses.len(), 1);
        assert_eq!(document.expenses[0].amount, Numeric::Value(2.0));
        assert_eq!(document.expenses[0].units, Numeric::Blank);
    }

    #[test]
    fn test_malformed_documents() {
        for text in [
            "not json",
            "[]",
            r#"{"expenses":[]}"#,
            r#"{"expenses":{},"categories":[]}"#,
            r#"{"expenses":[],"categories":[1]}"#,
        ] {
            let result = LedgerDocument::from_json(text);
            assert!(
                matches!(result, Err(LedgerError::MalformedDocument(_))),
                "expected malformed: {}",
                text
            );
        }
    }

    #[test]
    fn test_registry_is_normalized() {
        let text = r#"{"expenses":[],"categories":[" Food","Food","","Travel"]}"#;
        let document = LedgerDocument::from_json(text).unwrap();
        assert_eq!(document.categories, vec!["Food", "Travel"]);
    }

    #[test]
    fn test_unknown_categories() {
        let mut document = sample();
        document.categories = vec!["Food".into()];
        document.expenses.push(Expense::new("Train", 9.0, "Travel"));
        assert_eq!(document.unknown_categories(), vec!["Travel"]);
    }

    #[test]
    fn test_export_ledger_json() {
        let storage = Storage::with_store(Box::new(MemoryStore::new()));
        storage.commit_categories(vec!["Food".into()]).unwrap();

        let mut output = Vec::new();
        export_ledger_json(&storage, &mut output, true).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("\"categories\""));
        assert_eq!(
            LedgerDocument::from_json(&text).unwrap().categories,
            vec!["Food"]
        );
    }
}
