//! Error types for the Estimate Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every error condition outside the pure totals computation. The
//! `compute_*` operations themselves never fail; errors come from
//! configuration loading, structural mutations, strict validation,
//! persistence and export.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Estimate Engine.
///
/// # Example
///
/// ```
/// use estimate_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/rates.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/rates.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No estimate item exists with the given id.
    #[error("Estimate item not found: {id}")]
    ItemNotFound {
        /// The item id that was not found.
        id: String,
    },

    /// The item exists but has no labor entry with the given id.
    #[error("Labor entry '{labor_id}' not found on item '{item_id}'")]
    LaborEntryNotFound {
        /// The parent item id.
        item_id: String,
        /// The labor entry id that was not found.
        labor_id: String,
    },

    /// Attempted to remove the only labor entry of an item.
    #[error("Each task must have at least one labor entry (item '{item_id}')")]
    LastLaborEntry {
        /// The item whose last labor entry would have been removed.
        item_id: String,
    },

    /// A project setting failed strict validation.
    #[error("Invalid setting '{field}': {message}")]
    InvalidSetting {
        /// The setting that was invalid.
        field: String,
        /// A description of what made the setting invalid.
        message: String,
    },

    /// A labor rate was negative.
    #[error("Labor rate for '{role}' in '{trade}' must be non-negative, got {rate}")]
    InvalidRate {
        /// The trade the rate belongs to.
        trade: String,
        /// The role the rate belongs to.
        role: String,
        /// The rejected rate.
        rate: Decimal,
    },

    /// No saved project exists with the given id.
    #[error("Project not found: {id}")]
    ProjectNotFound {
        /// The project id that was not found.
        id: String,
    },

    /// A saved project was missing required identifying data.
    #[error("Invalid project field '{field}': {message}")]
    InvalidProject {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An export was requested for an estimate without line items.
    #[error("There are no line items to export")]
    NothingToExport,

    /// Writing an export failed.
    #[error("Export failed: {message}")]
    ExportError {
        /// A description of the failure.
        message: String,
    },
}

impl From<csv::Error> for EngineError {
    fn from(err: csv::Error) -> Self {
        EngineError::ExportError {
            message: err.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_last_labor_entry_uses_user_facing_message() {
        let error = EngineError::LastLaborEntry {
            item_id: "item_1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Each task must have at least one labor entry (item 'item_1')"
        );
    }

    #[test]
    fn test_labor_entry_not_found_displays_both_ids() {
        let error = EngineError::LaborEntryNotFound {
            item_id: "item_1".to_string(),
            labor_id: "lab_9".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Labor entry 'lab_9' not found on item 'item_1'"
        );
    }

    #[test]
    fn test_invalid_rate_displays_trade_role_and_rate() {
        let error = EngineError::InvalidRate {
            trade: "Electrical".to_string(),
            role: "Foreman".to_string(),
            rate: Decimal::from_str("-5").unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Labor rate for 'Foreman' in 'Electrical' must be non-negative, got -5"
        );
    }

    #[test]
    fn test_nothing_to_export_message() {
        assert_eq!(
            EngineError::NothingToExport.to_string(),
            "There are no line items to export"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_item_not_found() -> EngineResult<()> {
            Err(EngineError::ItemNotFound {
                id: "item_404".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_item_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
