//! Run configuration: locator tuning, calibration and interpreter limits.
//!
//! Every field has a default matching the reference imaging setup, so a JSON
//! config file only needs the values that differ:
//!
//! ```json
//! { "locate": { "calibration": { "reference_pixel_diameter": 612.0 } } }
//! ```

use std::path::Path;

use crate::detector::LocateConfig;
use crate::interpret::breakpoints::DEFAULT_TABLE_CAPACITY;

/// Invalid configuration or reference data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Limits for the classification stage.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InterpretConfig {
    /// Maximum number of measurements classified per run.
    pub max_measurements: usize,
    /// Maximum number of breakpoint entries in the reference table.
    pub table_capacity: usize,
}

impl Default for InterpretConfig {
    fn default() -> Self {
        Self {
            max_measurements: 20,
            table_capacity: DEFAULT_TABLE_CAPACITY,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZoneConfig {
    pub locate: LocateConfig,
    pub interpret: InterpretConfig,
}

impl ZoneConfig {
    /// Load and validate a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&data)
            .map_err(|e| ConfigError::new(format!("{}: {}", path.display(), e)))
    }

    /// Parse and validate JSON config text.
    pub fn from_json_str(data: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(data)
            .map_err(|e| ConfigError::new(format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.locate.validate().map_err(ConfigError::new)
    }
}
