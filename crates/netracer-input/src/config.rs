//! Combined input settings.
//!
//! ```yaml
//! debounce:
//!   interval_ms: 300
//! gesture:
//!   click_max_ms: 250
//! ```
//!
//! Omitted sections and fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::debounce::DebounceConfig;
use crate::error::InputError;
use crate::gesture::GestureConfig;

/// Debounce and gesture settings loaded together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub debounce: DebounceConfig,
    pub gesture: GestureConfig,
}

impl InputConfig {
    /// Parses and validates YAML settings.
    pub fn from_yaml(src: &str) -> Result<Self, InputError> {
        let config: Self = serde_yaml::from_str(src)?;
        config.gesture.validate()?;
        log::debug!("loaded input config: {:?}", config);
        Ok(config)
    }

    /// Parses and validates JSON settings.
    pub fn from_json(src: &str) -> Result<Self, InputError> {
        let config: Self = serde_json::from_str(src)?;
        config.gesture.validate()?;
        log::debug!("loaded input config: {:?}", config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_overrides_only_given_fields() {
        let config = InputConfig::from_yaml("debounce:\n  interval_ms: 300\n").unwrap();
        assert_eq!(config.debounce.interval_ms, 300);
        assert_eq!(config.gesture, GestureConfig::default());
    }

    #[test]
    fn json_gesture_section() {
        let config =
            InputConfig::from_json(r#"{"gesture": {"click_max_distance": 8.0}}"#).unwrap();
        assert_eq!(config.gesture.click_max_distance, 8.0);
        assert_eq!(config.gesture.click_max_ms, 200);
        assert_eq!(config.debounce, DebounceConfig::default());
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            InputConfig::from_json(r#"{"gesture": {"truncate_height": -5}}"#),
            Err(InputError::InvalidSetting { .. })
        ));
        assert!(matches!(
            InputConfig::from_yaml("debounce: fast"),
            Err(InputError::Yaml(_))
        ));
    }
}
