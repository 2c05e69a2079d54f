//! Formatter configuration.
//!
//! Defaults reproduce the hosted Rocket.Chat script. A config can be read from
//! TOML and then overridden from the environment:
//!
//! - `UPTIME_HOOK_ALIAS`: display name of the posting bot
//! - `UPTIME_HOOK_ICON_URL`: avatar for the posting bot
//! - `UPTIME_HOOK_SHAPE`: `flat` or `nested` (unset means detect per request)
//! - `UPTIME_HOOK_DURATION_STYLE`: `spaced` or `colon`
//! - `UPTIME_HOOK_MENTION_HEADER`: request header carrying user tags
//! - `UPTIME_HOOK_RECOVERY_LINK`: attachment link for recovered checks
//! - `UPTIME_HOOK_STRICT`: `true` or `1` to reject payloads with missing fields

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::duration::DurationStyle;
use crate::error::ConfigError;
use crate::shape::PayloadShape;

/// Default bot display name.
pub const DEFAULT_ALIAS: &str = "Uptime.com Alerts";

/// Default bot avatar.
pub const DEFAULT_ICON_URL: &str = "https://avatars.githubusercontent.com/u/54849620?s=200&v=4";

/// Default header carrying user tags.
pub const DEFAULT_MENTION_HEADER: &str = "contactusers";

/// Default attachment link for recovered checks.
pub const DEFAULT_RECOVERY_LINK: &str = "https://uptime.com";

const ENV_ALIAS: &str = "UPTIME_HOOK_ALIAS";
const ENV_ICON_URL: &str = "UPTIME_HOOK_ICON_URL";
const ENV_SHAPE: &str = "UPTIME_HOOK_SHAPE";
const ENV_DURATION_STYLE: &str = "UPTIME_HOOK_DURATION_STYLE";
const ENV_MENTION_HEADER: &str = "UPTIME_HOOK_MENTION_HEADER";
const ENV_RECOVERY_LINK: &str = "UPTIME_HOOK_RECOVERY_LINK";
const ENV_STRICT: &str = "UPTIME_HOOK_STRICT";

/// What to do when a payload lacks a field the message needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingFieldPolicy {
    /// Interpolate missing text as empty and treat a missing state as down
    #[default]
    Lenient,
    /// Reject the payload with [`crate::FormatError::MissingField`]
    Strict,
}

/// Configuration for [`crate::AlertFormatter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Display name of the posting bot
    pub alias: String,
    /// Avatar URL of the posting bot
    pub icon_url: String,
    /// Fixed payload shape; `None` detects the shape per request
    pub shape: Option<PayloadShape>,
    /// Layout of the downtime duration
    pub duration_style: DurationStyle,
    /// Request header whose value is prepended to the message body
    pub mention_header: String,
    /// Attachment link used when a check recovers
    pub recovery_link: String,
    /// Handling of absent payload fields
    pub missing_fields: MissingFieldPolicy,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            alias: DEFAULT_ALIAS.to_string(),
            icon_url: DEFAULT_ICON_URL.to_string(),
            shape: None,
            duration_style: DurationStyle::default(),
            mention_header: DEFAULT_MENTION_HEADER.to_string(),
            recovery_link: DEFAULT_RECOVERY_LINK.to_string(),
            missing_fields: MissingFieldPolicy::default(),
        }
    }
}

impl FormatterConfig {
    /// Create a config from defaults overridden by environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Parse a config from TOML text. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] if the result fails [`Self::validate`].
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "Loaded formatter config");
        Ok(config)
    }

    /// Check that the config can format messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the mention header name is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mention_header.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "mention_header must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply `UPTIME_HOOK_*` environment variables on top of this config.
    ///
    /// Unparsable values are logged and ignored.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(alias) = env_value(ENV_ALIAS) {
            self.alias = alias;
        }
        if let Some(icon_url) = env_value(ENV_ICON_URL) {
            self.icon_url = icon_url;
        }
        if let Some(shape) = env_value(ENV_SHAPE) {
            match shape.parse() {
                Ok(shape) => self.shape = Some(shape),
                Err(e) => warn!(var = ENV_SHAPE, error = %e, "Ignoring invalid value"),
            }
        }
        if let Some(style) = env_value(ENV_DURATION_STYLE) {
            match style.parse() {
                Ok(style) => self.duration_style = style,
                Err(e) => warn!(var = ENV_DURATION_STYLE, error = %e, "Ignoring invalid value"),
            }
        }
        if let Some(header) = env_value(ENV_MENTION_HEADER) {
            self.mention_header = header;
        }
        if let Some(link) = env_value(ENV_RECOVERY_LINK) {
            self.recovery_link = link;
        }
        if let Some(strict) = env_value(ENV_STRICT) {
            self.missing_fields = if strict.eq_ignore_ascii_case("true") || strict == "1" {
                MissingFieldPolicy::Strict
            } else {
                MissingFieldPolicy::Lenient
            };
        }
        self
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    #[must_use]
    pub fn with_icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = icon_url.into();
        self
    }

    /// Pin the payload shape instead of detecting it.
    #[must_use]
    pub fn with_shape(mut self, shape: PayloadShape) -> Self {
        self.shape = Some(shape);
        self
    }

    #[must_use]
    pub fn with_duration_style(mut self, style: DurationStyle) -> Self {
        self.duration_style = style;
        self
    }

    #[must_use]
    pub fn with_mention_header(mut self, header: impl Into<String>) -> Self {
        self.mention_header = header.into();
        self
    }

    #[must_use]
    pub fn with_recovery_link(mut self, link: impl Into<String>) -> Self {
        self.recovery_link = link.into();
        self
    }

    #[must_use]
    pub fn with_missing_fields(mut self, policy: MissingFieldPolicy) -> Self {
        self.missing_fields = policy;
        self
    }
}

/// Non-empty value of an environment variable.
fn env_value(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}
