//! Expense model
//!
//! An expense line item recorded against a category. The `amount` is either
//! entered directly or derived from `pricePerUnit * units`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::ids::ExpenseId;
use super::numeric::Numeric;
use crate::error::{LedgerError, LedgerResult};

/// A single expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Stable identifier; documents written before ids existed get a fresh one
    #[serde(default)]
    pub id: ExpenseId,

    pub description: String,

    #[serde(default)]
    pub amount: Numeric,

    pub category: String,

    #[serde(default)]
    pub units: Numeric,

    #[serde(default)]
    pub unit_name: String,

    #[serde(default)]
    pub price_per_unit: Numeric,

    #[serde(default)]
    pub comment: String,
}

impl Expense {
    /// Create a new expense with a direct amount
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<Numeric>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            description: description.into(),
            amount: amount.into(),
            category: category.into(),
            units: Numeric::Blank,
            unit_name: String::new(),
            price_per_unit: Numeric::Blank,
            comment: String::new(),
        }
    }

    /// Set unit pricing (builder style)
    pub fn with_units(
        mut self,
        units: impl Into<Numeric>,
        unit_name: impl Into<String>,
        price_per_unit: impl Into<Numeric>,
    ) -> Self {
        self.units = units.into();
        self.unit_name = unit_name.into();
        self.price_per_unit = price_per_unit.into();
        self
    }

    /// Set the comment (builder style)
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// `pricePerUnit * units` when both are numbers, zero included
    pub fn derived_amount(&self) -> Option<f64> {
        Some(self.price_per_unit.value()? * self.units.value()?)
    }

    /// Apply the derivation rule; returns true if the amount changed
    pub fn recompute_amount(&mut self) -> bool {
        match self.derived_amount() {
            Some(derived) => {
                let next = Numeric::from(derived);
                if self.amount != next {
                    self.amount = next;
                    return true;
                }
                false
            }
            None => false,
        }
    }

    /// The amount as displayed and totalled: derived if possible, otherwise
    /// the stored number, otherwise blank
    pub fn effective_amount(&self) -> Option<f64> {
        self.derived_amount().or_else(|| self.amount.value())
    }

    /// Validate required fields
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }

        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }

        for field in ExpenseField::numeric() {
            if let Some(Numeric::Text(raw)) = self.numeric(*field) {
                return Err(ExpenseValidationError::InvalidNumber {
                    field: field.name(),
                    value: raw.clone(),
                });
            }
        }

        Ok(())
    }

    /// Access a numeric field by name
    pub fn numeric(&self, field: ExpenseField) -> Option<&Numeric> {
        match field {
            ExpenseField::Amount => Some(&self.amount),
            ExpenseField::Units => Some(&self.units),
            ExpenseField::PricePerUnit => Some(&self.price_per_unit),
            _ => None,
        }
    }

    /// Access a text field by name
    pub fn text(&self, field: ExpenseField) -> Option<&str> {
        match field {
            ExpenseField::Description => Some(&self.description),
            ExpenseField::Category => Some(&self.category),
            ExpenseField::UnitName => Some(&self.unit_name),
            ExpenseField::Comment => Some(&self.comment),
            _ => None,
        }
    }

    /// Apply raw input to one field
    ///
    /// Numeric fields reject blank and non-numeric input; description and
    /// category reject blank input. On error the record is untouched.
    pub fn set_field(&mut self, field: ExpenseField, raw: &str) -> LedgerResult<()> {
        match field {
            ExpenseField::Amount => self.amount = Numeric::parse_required(raw, field.name())?,
            ExpenseField::Units => self.units = Numeric::parse_required(raw, field.name())?,
            ExpenseField::PricePerUnit => {
                self.price_per_unit = Numeric::parse_required(raw, field.name())?
            }
            ExpenseField::Description | ExpenseField::Category => {
                let value = raw.trim();
                if value.is_empty() {
                    return Err(LedgerError::Validation(format!(
                        "{} cannot be empty",
                        field.label()
                    )));
                }
                if field == ExpenseField::Description {
                    self.description = value.to_string();
                } else {
                    self.category = value.to_string();
                }
            }
            ExpenseField::UnitName => self.unit_name = raw.trim().to_string(),
            ExpenseField::Comment => self.comment = raw.trim().to_string(),
        }
        Ok(())
    }
}

/// Give a fresh id to every expense whose id already appeared earlier
///
/// Returns how many ids were replaced.
pub fn reassign_duplicate_ids(expenses: &mut [Expense]) -> usize {
    let mut seen = HashSet::with_capacity(expenses.len());
    let mut replaced = 0;
    for expense in expenses.iter_mut() {
        if !seen.insert(expense.id) {
            expense.id = ExpenseId::new();
            seen.insert(expense.id);
            replaced += 1;
        }
    }
    replaced
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description, self.category)
    }
}

/// The editable (and sortable) fields of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpenseField {
    Description,
    Amount,
    Category,
    Units,
    UnitName,
    PricePerUnit,
    Comment,
}

impl ExpenseField {
    /// All fields in column order
    pub fn all() -> &'static [Self] {
        &[
            Self::Description,
            Self::Amount,
            Self::Category,
            Self::Units,
            Self::UnitName,
            Self::PricePerUnit,
            Self::Comment,
        ]
    }

    /// The fields that hold numbers
    pub fn numeric() -> &'static [Self] {
        &[Self::Amount, Self::Units, Self::PricePerUnit]
    }

    pub fn is_numeric(&self) -> bool {
        Self::numeric().contains(self)
    }

    /// External (camelCase) field name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Amount => "amount",
            Self::Category => "category",
            Self::Units => "units",
            Self::UnitName => "unitName",
            Self::PricePerUnit => "pricePerUnit",
            Self::Comment => "comment",
        }
    }

    /// Column header label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Description => "Description",
            Self::Amount => "Amount",
            Self::Category => "Category",
            Self::Units => "Units",
            Self::UnitName => "Unit Name",
            Self::PricePerUnit => "Price per Unit",
            Self::Comment => "Comment",
        }
    }
}

impl fmt::Display for ExpenseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ExpenseField {
    type Err = LedgerError;

    /// Accepts the camelCase name, snake_case, kebab-case or the header label
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "description" => Ok(Self::Description),
            "amount" => Ok(Self::Amount),
            "category" => Ok(Self::Category),
            "units" => Ok(Self::Units),
            "unitname" => Ok(Self::UnitName),
            "priceperunit" | "price" => Ok(Self::PricePerUnit),
            "comment" => Ok(Self::Comment),
            _ => Err(LedgerError::Validation(format!("Unknown field: {}", s))),
        }
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyDescription,
    EmptyCategory,
    InvalidNumber { field: &'static str, value: String },
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description cannot be empty"),
            Self::EmptyCategory => write!(f, "Category must be selected"),
            Self::InvalidNumber { field, value } => {
                write!(f, "Invalid number for {}: '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

impl From<ExpenseValidationError> for LedgerError {
    fn from(err: ExpenseValidationError) -> Self {
        match err {
            ExpenseValidationError::InvalidNumber { field, value } => {
                LedgerError::InvalidNumber { field, value }
            }
            other => LedgerError::Validation(other.to_string()),
        }
    }
}
