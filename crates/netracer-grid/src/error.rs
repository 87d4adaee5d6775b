//! Error types for the grid crate.
//!
//! The table engine itself never fails; these errors come from the edges
//! that read configuration, decode record payloads or write exports.

use std::io;

use thiserror::Error;

/// Errors raised while loading configuration, decoding records or exporting.
#[derive(Debug, Error)]
pub enum GridError {
    /// Configuration file could not be read.
    #[error("failed to read config '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Configuration file extension is not `.yaml`, `.yml` or `.json`.
    #[error("unsupported config format '{0}' (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),

    /// YAML configuration could not be parsed.
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON configuration or record payload could not be parsed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration is well-formed but inconsistent.
    #[error("invalid column '{column}': {reason}")]
    InvalidColumn { column: String, reason: String },

    /// Two columns share the same id.
    #[error("duplicate column id '{0}'")]
    DuplicateColumn(String),

    /// CSV export failed.
    #[error("export failed: {0}")]
    Export(#[from] csv::Error),

    /// Writing the export output failed.
    #[error("export I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl GridError {
    /// Create an invalid column error.
    pub fn invalid_column(column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidColumn {
            column: column.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
