//! Configuration Error Types
//!
//! The registry itself never fails: every registry operation is fail-soft.
//! Errors only arise while loading and validating configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Failed to read config file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML
    #[error("Failed to parse TOML content: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value could not be converted to the expected type
    #[error("Invalid {expected} value for {section}.{key}: {value}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        expected: &'static str,
    },

    /// History buffers must be able to hold at least one value
    #[error("History length must be at least 1, got {0}")]
    InvalidHistoryLength(usize),
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid_value(
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        Self::InvalidValue {
            section: section.into(),
            key: key.into(),
            value: value.into(),
            expected,
        }
    }
}
