//! View state owned by the caller
//!
//! The core keeps no sort or filter state; the front end holds a
//! `ViewState` and passes it in on every view computation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;
use crate::models::ExpenseField;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            other => Err(LedgerError::Validation(format!(
                "Unknown sort direction: {}",
                other
            ))),
        }
    }
}

/// Active sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: ExpenseField,
    pub direction: SortDirection,
}

/// Which categories the detail rows show
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Blank input and `all` mean no filter; anything else is an exact name
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "all" {
            Self::All
        } else {
            Self::Only(trimmed.to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(name) => name == category,
        }
    }
}

/// Sort and filter settings for one view computation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub sort: Option<SortSpec>,
    pub filter: CategoryFilter,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort by `column` in `direction` (builder style)
    pub fn sorted_by(mut self, column: ExpenseField, direction: SortDirection) -> Self {
        self.sort = Some(SortSpec { column, direction });
        self
    }

    /// Restrict rows to one category (builder style)
    pub fn filtered(mut self, filter: CategoryFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Clicking a column header: the same column flips direction, a
    /// different column starts ascending
    pub fn toggle_sort(&mut self, column: ExpenseField) {
        self.sort = Some(match self.sort {
            Some(spec) if spec.column == column => SortSpec {
                column,
                direction: spec.direction.toggled(),
            },
            _ => SortSpec {
                column,
                direction: SortDirection::Asc,
            },
        });
    }

    pub fn direction(&self) -> SortDirection {
        self.sort.map(|s| s.direction).unwrap_or_default()
    }
}
