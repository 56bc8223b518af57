//! Import service
//!
//! Replaces the ledger and registry wholesale from a JSON document or a CSV
//! file. Files are read and parsed completely before anything is stored, so
//! a rejected import leaves everything as it was.

use std::fmt;
use std::path::Path;

use crate::config::{CsvDialect, ValidationMode};
use crate::error::{LedgerError, LedgerResult};
use crate::export::{from_csv, LedgerDocument};
use crate::models::Expense;
use crate::storage::Storage;

/// Import file formats, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Json,
    Csv,
}

impl ImportFormat {
    /// `.json` or `.csv`, case-insensitive
    pub fn from_path(path: &Path) -> LedgerResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => Err(LedgerError::UnsupportedFileType(path.display().to_string())),
        }
    }
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Result of a completed import
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub format: ImportFormat,
    /// Number of expenses now in the ledger
    pub expenses: usize,
    /// Number of categories now in the registry
    pub categories: usize,
    /// Categories added because expenses referenced them
    pub auto_registered: Vec<String>,
}

impl ImportResult {
    fn summary(&self) -> String {
        let mut summary = format!(
            "{} expenses, {} categories",
            self.expenses, self.categories
        );
        if !self.auto_registered.is_empty() {
            summary.push_str(&format!(
                " (registered: {})",
                self.auto_registered.join(", ")
            ));
        }
        summary
    }
}

/// Service for file import
pub struct ImportService<'a> {
    storage: &'a Storage,
    mode: ValidationMode,
    dialect: CsvDialect,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage, mode: ValidationMode, dialect: CsvDialect) -> Self {
        Self {
            storage,
            mode,
            dialect,
        }
    }

    /// Replace the ledger and registry from a JSON document
    ///
    /// Expenses whose category is not in the document's registry are
    /// rejected in strict mode and register the category otherwise.
    pub fn import_json(&self, text: &str) -> LedgerResult<ImportResult> {
        let mut document = LedgerDocument::from_json(text)?;

        let unknown = document.unknown_categories();
        let auto_registered = match self.mode {
            ValidationMode::Strict if !unknown.is_empty() => {
                return Err(LedgerError::InvalidFileFormat(format!(
                    "Expenses reference unregistered categories: {}",
                    unknown.join(", ")
                )));
            }
            ValidationMode::Strict => Vec::new(),
            ValidationMode::Lenient => {
                let registrable: Vec<String> =
                    unknown.into_iter().filter(|c| !c.trim().is_empty()).collect();
                document.categories.extend(registrable.iter().cloned());
                registrable
            }
        };

        self.commit(
            ImportFormat::Json,
            document.categories,
            document.expenses,
            auto_registered,
        )
    }

    /// Replace the ledger and registry from CSV text
    ///
    /// The registry becomes the distinct categories found in the file.
    pub fn import_csv(&self, text: &str) -> LedgerResult<ImportResult> {
        let parsed = from_csv(text, self.dialect)?;

        if self.mode == ValidationMode::Strict {
            if let Some(orphan) = parsed.expenses.iter().find(|e| e.category.is_empty()) {
                return Err(LedgerError::InvalidFileFormat(format!(
                    "Expense '{}' has no category",
                    orphan.description
                )));
            }
        }

        self.commit(
            ImportFormat::Csv,
            parsed.categories,
            parsed.expenses,
            Vec::new(),
        )
    }

    /// Import a `.json` or `.csv` file
    ///
    /// Other extensions fail with `UnsupportedFileType` before the file is
    /// read. Undecodable or unparseable content fails with
    /// `InvalidFileFormat`.
    pub fn import_file(&self, path: &Path) -> LedgerResult<ImportResult> {
        let format = ImportFormat::from_path(path)?;

        let bytes = std::fs::read(path)
            .map_err(|e| LedgerError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let text = String::from_utf8(bytes)
            .map_err(|e| LedgerError::InvalidFileFormat(format!("{}: {}", path.display(), e)))?;

        match format {
            ImportFormat::Json => self.import_json(&text).map_err(|e| match e {
                LedgerError::MalformedDocument(msg) => LedgerError::InvalidFileFormat(msg),
                other => other,
            }),
            ImportFormat::Csv => self.import_csv(&text),
        }
    }

    fn commit(
        &self,
        format: ImportFormat,
        categories: Vec<String>,
        expenses: Vec<Expense>,
        auto_registered: Vec<String>,
    ) -> LedgerResult<ImportResult> {
        let result = ImportResult {
            format,
            expenses: expenses.len(),
            categories: categories.len(),
            auto_registered,
        };

        self.storage.commit_all(categories, expenses)?;
        self.storage
            .log_import(&format.to_string(), result.summary());

        Ok(result)
    }
}
