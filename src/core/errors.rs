//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for esgmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or out-of-domain source data for a single entity
    #[error("Data validation error for entity '{entity}' (field {field}): {reason}")]
    DataValidation {
        entity: String,
        field: &'static str,
        reason: String,
    },

    /// Internal contract breach between the calculator and the classifier
    #[error("Invariant violation for entity '{entity}' ({metric}): {detail}")]
    InvariantViolation {
        entity: String,
        metric: &'static str,
        detail: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input feed errors (unsupported format, unreadable rows)
    #[error("Input error in {}: {message}", path.display())]
    Input { path: PathBuf, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a data validation error for the named entity and field
    pub fn data_validation(
        entity: impl Into<String>,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::DataValidation {
            entity: entity.into(),
            field,
            reason: reason.into(),
        }
    }

    /// Create an invariant violation error
    pub fn invariant(
        entity: impl Into<String>,
        metric: &'static str,
        detail: impl Into<String>,
    ) -> Self {
        Self::InvariantViolation {
            entity: entity.into(),
            metric,
            detail: detail.into(),
        }
    }

    /// Create an input error with path context
    pub fn input(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Input {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether the person running the report can fix this by editing
    /// source data or configuration.
    ///
    /// Invariant violations are defects, and raw I/O failures are
    /// environmental, so neither counts.
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::DataValidation { .. }
                | Self::Configuration(_)
                | Self::Input { .. }
                | Self::Json(_)
                | Self::Yaml(_)
                | Self::Toml(_)
        )
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_validation_message_names_entity_and_field() {
        let err = Error::data_validation("Firma A", "Revenue", "must be greater than 0, got 0");
        assert_eq!(
            err.to_string(),
            "Data validation error for entity 'Firma A' (field Revenue): must be greater than 0, got 0"
        );
        assert!(err.is_user_fixable());
    }

    #[test]
    fn invariant_violation_is_not_user_fixable() {
        let err = Error::invariant("Firma B", "Carbon_Intensity_All", "value is NaN");
        assert!(!err.is_user_fixable());
        assert!(err.to_string().contains("Carbon_Intensity_All"));
    }

    #[test]
    fn input_error_includes_path() {
        let err = Error::input("data/rows.csv", "unsupported input format 'csv'");
        assert_eq!(
            err.to_string(),
            "Input error in data/rows.csv: unsupported input format 'csv'"
        );
    }
}
