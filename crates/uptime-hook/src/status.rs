//! Up/down state of a monitored check.

use serde::{Deserialize, Serialize};

/// Attachment color for a check that recovered.
pub const COLOR_UP: &str = "#36A64F";

/// Attachment color for a check that is failing.
pub const COLOR_DOWN: &str = "#A63636";

/// State reported by the monitoring provider for a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    /// Check is passing again
    Up,
    /// Check is failing
    Down,
}

impl AlertStatus {
    /// Map the provider's `is_up` flag onto a status.
    #[must_use]
    pub const fn from_is_up(is_up: bool) -> Self {
        if is_up {
            Self::Up
        } else {
            Self::Down
        }
    }

    /// Get the attachment sidebar color for this status.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Up => COLOR_UP,
            Self::Down => COLOR_DOWN,
        }
    }

    /// Get the label used in the message body.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
        }
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
