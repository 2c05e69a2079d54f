//! Incoming webhook request envelope.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FormatError;
use crate::event::ContactMention;

/// Request handed to the integration script: headers plus the parsed body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomingRequest {
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Parsed JSON body
    #[serde(default)]
    pub content: Value,
}

impl IncomingRequest {
    #[must_use]
    pub fn new(content: Value) -> Self {
        Self {
            headers: HashMap::new(),
            content,
        }
    }

    /// Build a request from a raw JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidPayload`] if the body is not valid JSON.
    pub fn from_body(body: &[u8]) -> Result<Self, FormatError> {
        Ok(Self::new(serde_json::from_slice(body)?))
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Look up a header by name, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .or_else(|| {
                self.headers
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, value)| value)
            })
            .map(String::as_str)
    }

    /// User tags from `header`, empty when the header is absent.
    #[must_use]
    pub fn mention(&self, header: &str) -> ContactMention {
        self.header(header).map(ContactMention::from).unwrap_or_default()
    }
}
