//! Domain-specific error types for light-lab

use serde_json::{Value, json};
use thiserror::Error;

/// Main error type for the light-lab core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabError {
    #[error("Experiment not found: {id}")]
    NotFound { id: String },

    #[error("Invalid value '{value}' for control '{key}': {reason}")]
    InvalidControlValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Catalog integrity error: {message}")]
    CatalogIntegrity { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl LabError {
    pub fn not_found(id: impl ToString) -> Self {
        LabError::NotFound { id: id.to_string() }
    }

    pub fn invalid_value(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        LabError::InvalidControlValue {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn integrity(message: impl Into<String>) -> Self {
        LabError::CatalogIntegrity {
            message: message.into(),
        }
    }

    /// Stable label used in machine-readable output
    pub fn kind(&self) -> &'static str {
        match self {
            LabError::NotFound { .. } => "not_found",
            LabError::InvalidControlValue { .. } => "invalid_control_value",
            LabError::CatalogIntegrity { .. } => "catalog_integrity",
            LabError::Config { .. } => "config",
            LabError::Serialization { .. } => "serialization",
        }
    }

    /// JSON error body for the CLI
    pub fn to_json(&self) -> Value {
        let details = match self {
            LabError::NotFound { id } => json!({ "id": id }),
            LabError::InvalidControlValue { key, value, reason } => {
                json!({ "key": key, "value": value, "reason": reason })
            }
            LabError::CatalogIntegrity { message }
            | LabError::Config { message }
            | LabError::Serialization { message } => json!({ "message": message }),
        };
        json!({
            "error": {
                "kind": self.kind(),
                "message": self.to_string(),
                "details": details,
            }
        })
    }
}

impl From<serde_json::Error> for LabError {
    fn from(err: serde_json::Error) -> Self {
        LabError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for LabError {
    fn from(err: toml::de::Error) -> Self {
        LabError::Config {
            message: err.to_string(),
        }
    }
}

/// Result type alias for light-lab operations
pub type Result<T> = std::result::Result<T, LabError>;
