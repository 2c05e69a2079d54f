//! Error types for alert formatting and configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::shape::PayloadShape;

/// Errors that can occur while turning an alert payload into a chat message.
#[derive(Debug, Error)]
pub enum FormatError {
    /// A field required by the strict policy was absent or null
    #[error("missing field `{field}` in {shape} payload")]
    MissingField {
        field: &'static str,
        shape: PayloadShape,
    },

    /// The request body could not be parsed as JSON
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

/// Errors that can occur while loading formatter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::FormatterConfig`]
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is not usable
    #[error("invalid config: {0}")]
    Invalid(String),
}
