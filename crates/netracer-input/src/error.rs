//! Error types for input configuration.

/// Errors that can occur while loading input configuration.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// YAML configuration could not be parsed.
    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON configuration could not be parsed.
    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// A threshold is out of range.
    #[error("Invalid setting '{name}': {reason}")]
    InvalidSetting { name: String, reason: String },
}

impl InputError {
    /// Create an invalid setting error.
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
