//! User settings for the expense ledger
//!
//! Controls how strictly category references are checked, which CSV dialect
//! is written, and how JSON exports are laid out.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::paths::LedgerPaths;
use crate::error::LedgerError;

/// How category references on expenses are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Unknown categories are tolerated on add/edit and registered on import
    #[default]
    Lenient,
    /// Every expense must reference a registered category
    Strict,
}

/// CSV layout used for export and import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CsvDialect {
    /// Fields joined with bare commas and lines split naively; a comma inside
    /// a field shifts the columns
    Legacy,
    /// RFC 4180 quoting for fields containing commas, quotes or newlines
    #[default]
    Rfc4180,
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lenient => write!(f, "lenient"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for ValidationMode {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(LedgerError::Config(format!(
                "Unknown validation mode: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for CsvDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Rfc4180 => write!(f, "rfc4180"),
        }
    }
}

impl FromStr for CsvDialect {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "rfc4180" => Ok(Self::Rfc4180),
            other => Err(LedgerError::Config(format!("Unknown CSV dialect: {}", other))),
        }
    }
}

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub validation_mode: ValidationMode,

    #[serde(default)]
    pub csv_dialect: CsvDialect,

    /// Indent JSON exports
    #[serde(default)]
    pub pretty_json: bool,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            validation_mode: ValidationMode::default(),
            csv_dialect: CsvDialect::default(),
            pretty_json: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

            serde_json::from_str(&contents)
                .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    pub fn is_strict(&self) -> bool {
        self.validation_mode == ValidationMode::Strict
    }
}
