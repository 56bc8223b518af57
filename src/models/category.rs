//! Category names
//!
//! A category is just its name: unique in the registry, case-sensitive and
//! non-empty after trimming.

use std::fmt;

/// Normalize and validate a category name, returning the trimmed form
pub fn normalize_category_name(name: &str) -> Result<String, CategoryValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CategoryValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
