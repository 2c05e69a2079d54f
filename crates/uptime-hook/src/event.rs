//! Input types built from one incoming webhook call.

use serde::{Deserialize, Serialize};

use crate::status::AlertStatus;

/// A single alert notification, normalized across provider payload shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    /// Full name of the check that changed state
    pub check_name: String,
    /// URL of the monitored site
    pub site_url: String,
    /// Whether the check is passing
    pub is_up: bool,
    /// How long the check was down, when the provider reports it
    pub downtime_seconds: Option<f64>,
    /// Provider's short failure output
    pub failure_reason: Option<String>,
    /// Link to the provider's alert details page
    pub details_url: String,
}

impl AlertEvent {
    /// Create an event with the required fields; optional fields start empty.
    #[must_use]
    pub fn new(
        check_name: impl Into<String>,
        site_url: impl Into<String>,
        is_up: bool,
        details_url: impl Into<String>,
    ) -> Self {
        Self {
            check_name: check_name.into(),
            site_url: site_url.into(),
            is_up,
            downtime_seconds: None,
            failure_reason: None,
            details_url: details_url.into(),
        }
    }

    #[must_use]
    pub fn with_downtime_seconds(mut self, secs: f64) -> Self {
        self.downtime_seconds = Some(secs);
        self
    }

    #[must_use]
    pub fn with_failure_reason(mut self, reason: impl Into<String>) -> Self {
        self.failure_reason = Some(reason.into());
        self
    }

    #[must_use]
    pub const fn status(&self) -> AlertStatus {
        AlertStatus::from_is_up(self.is_up)
    }
}

/// User tags passed through a custom request header, e.g. `@alice @bob`.
///
/// The text is opaque and copied into the message body as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactMention(String);

impl ContactMention {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the request carried no user tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ContactMention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContactMention {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for ContactMention {
    fn from(text: String) -> Self {
        Self(text)
    }
}
