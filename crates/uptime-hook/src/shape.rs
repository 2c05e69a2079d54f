//! Provider payload shapes and field extraction.
//!
//! Uptime.com has sent two layouts for the same notification over time:
//!
//! - [`PayloadShape::Flat`]: top-level keys such as `check_full_name` and
//!   `state_is_up`
//! - [`PayloadShape::Nested`]: everything under `data`, split into `alert`,
//!   `service`, `account`, `downtime` and `links`
//!
//! Each shape is a table of JSON pointers, so the formatter itself never
//! cares which layout arrived.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::MissingFieldPolicy;
use crate::error::FormatError;
use crate::event::AlertEvent;

/// JSON pointers for each [`AlertEvent`] field in one payload shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPaths {
    pub check_name: &'static str,
    pub site_url: &'static str,
    pub is_up: &'static str,
    pub failure_reason: &'static str,
    pub details_url: &'static str,
    /// `None` when the shape never carries a downtime duration
    pub downtime_seconds: Option<&'static str>,
}

const FLAT_PATHS: FieldPaths = FieldPaths {
    check_name: "/check_full_name",
    site_url: "/site_url",
    is_up: "/state_is_up",
    failure_reason: "/output",
    details_url: "/alert_history_url",
    downtime_seconds: None,
};

const NESTED_PATHS: FieldPaths = FieldPaths {
    check_name: "/data/service/name",
    site_url: "/data/account/site_url",
    is_up: "/data/alert/is_up",
    failure_reason: "/data/alert/short_output",
    details_url: "/data/links/alert_details",
    downtime_seconds: Some("/data/downtime/duration"),
};

/// Layout of the alert notification body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadShape {
    /// Top-level fields
    Flat,
    /// Fields grouped under a `data` object
    Nested,
}

impl PayloadShape {
    /// Guess the shape of a body: a `data` object means [`PayloadShape::Nested`].
    #[must_use]
    pub fn detect(body: &Value) -> Self {
        let shape = if body.get("data").is_some_and(Value::is_object) {
            Self::Nested
        } else {
            Self::Flat
        };
        debug!(shape = %shape, "Detected payload shape");
        shape
    }

    #[must_use]
    pub const fn paths(self) -> &'static FieldPaths {
        match self {
            Self::Flat => &FLAT_PATHS,
            Self::Nested => &NESTED_PATHS,
        }
    }

    /// Whether payloads in this shape carry a downtime duration.
    ///
    /// Recoveries in a shape without one are announced without a duration
    /// or a link.
    #[must_use]
    pub const fn reports_downtime(self) -> bool {
        self.paths().downtime_seconds.is_some()
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Nested => "nested",
        }
    }

    /// Pull an [`AlertEvent`] out of a body laid out in this shape.
    ///
    /// # Errors
    ///
    /// Under [`MissingFieldPolicy::Strict`], returns
    /// [`FormatError::MissingField`] for the first required field that is
    /// absent or null. The lenient policy never fails.
    pub fn extract(
        self,
        body: &Value,
        policy: MissingFieldPolicy,
    ) -> Result<AlertEvent, FormatError> {
        let paths = self.paths();
        let required = |field: &'static str, value: Option<String>| match (value, policy) {
            (Some(text), _) => Ok(text),
            (None, MissingFieldPolicy::Lenient) => Ok(String::new()),
            (None, MissingFieldPolicy::Strict) => {
                Err(FormatError::MissingField { field, shape: self })
            }
        };

        let is_up = match lookup(body, paths.is_up) {
            Some(value) => truthy(value),
            None if policy == MissingFieldPolicy::Strict => {
                return Err(FormatError::MissingField {
                    field: "is_up",
                    shape: self,
                });
            }
            None => false,
        };

        let check_name = required("check_name", text_at(body, paths.check_name))?;
        let site_url = required("site_url", text_at(body, paths.site_url))?;

        let mut failure_reason = text_at(body, paths.failure_reason);
        let mut details_url = text_at(body, paths.details_url);
        if !is_up {
            failure_reason = Some(required("failure_reason", failure_reason)?);
            details_url = Some(required("details_url", details_url)?);
        }

        let downtime_seconds = paths
            .downtime_seconds
            .and_then(|path| lookup(body, path))
            .and_then(seconds_from);

        Ok(AlertEvent {
            check_name,
            site_url,
            is_up,
            downtime_seconds,
            failure_reason,
            details_url: details_url.unwrap_or_default(),
        })
    }
}

impl std::fmt::Display for PayloadShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayloadShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(Self::Flat),
            "nested" => Ok(Self::Nested),
            other => Err(format!("unknown payload shape `{other}`")),
        }
    }
}

/// Non-null value at `path`.
fn lookup<'a>(body: &'a Value, path: &str) -> Option<&'a Value> {
    body.pointer(path).filter(|v| !v.is_null())
}

/// Text for the value at `path`; non-string scalars use their JSON text.
fn text_at(body: &Value, path: &str) -> Option<String> {
    lookup(body, path).map(|value| match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Truthiness as the hosted script runtime judges it: `false`, `0`, `NaN`
/// and `""` are false, every other non-null value is true.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn seconds_from(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nested_down() -> Value {
        json!({
            "data": {
                "alert": { "is_up": false, "short_output": "Connection timeout" },
                "service": { "name": "HTTP-example.com" },
                "account": { "site_url": "https://example.com" },
                "links": { "alert_details": "https://uptime.com/alerts/123" },
                "downtime": { "duration": 125 }
            }
        })
    }

    #[test]
    fn test_detect_shape() {
        assert_eq!(PayloadShape::detect(&nested_down()), PayloadShape::Nested);
        assert_eq!(
            PayloadShape::detect(&json!({ "check_full_name": "x" })),
            PayloadShape::Flat
        );
        // A scalar `data` member is not the nested layout
        assert_eq!(
            PayloadShape::detect(&json!({ "data": "x" })),
            PayloadShape::Flat
        );
    }

    #[test]
    fn test_extract_nested() {
        let event = PayloadShape::Nested
            .extract(&nested_down(), MissingFieldPolicy::Strict)
            .unwrap();

        assert_eq!(event.check_name, "HTTP-example.com");
        assert_eq!(event.site_url, "https://example.com");
        assert!(!event.is_up);
        assert_eq!(event.downtime_seconds, Some(125.0));
        assert_eq!(event.failure_reason.as_deref(), Some("Connection timeout"));
        assert_eq!(event.details_url, "https://uptime.com/alerts/123");
    }

    #[test]
    fn test_extract_flat() {
        let body = json!({
            "check_full_name": "PING-db",
            "site_url": "db.example.com",
            "state_is_up": true,
            "alert_history_url": "https://uptime.com/history/9"
        });

        let event = PayloadShape::Flat
            .extract(&body, MissingFieldPolicy::Strict)
            .unwrap();

        assert_eq!(event.check_name, "PING-db");
        assert!(event.is_up);
        assert_eq!(event.downtime_seconds, None);
        assert_eq!(event.failure_reason, None);
    }

    #[test]
    fn test_lenient_fills_blanks() {
        let event = PayloadShape::Nested
            .extract(&json!({}), MissingFieldPolicy::Lenient)
            .unwrap();

        assert_eq!(event.check_name, "");
        assert_eq!(event.site_url, "");
        assert!(!event.is_up);
        assert_eq!(event.failure_reason.as_deref(), Some(""));
        assert_eq!(event.details_url, "");
    }

    #[test]
    fn test_strict_reports_first_missing_field() {
        let mut body = nested_down();
        body["data"]["service"]["name"] = Value::Null;

        let err = PayloadShape::Nested
            .extract(&body, MissingFieldPolicy::Strict)
            .unwrap_err();

        assert!(matches!(
            err,
            FormatError::MissingField {
                field: "check_name",
                shape: PayloadShape::Nested
            }
        ));
    }

    #[test]
    fn test_strict_up_event_needs_no_reason() {
        let mut body = nested_down();
        body["data"]["alert"] = json!({ "is_up": true });
        body["data"]["links"] = json!({});

        let event = PayloadShape::Nested
            .extract(&body, MissingFieldPolicy::Strict)
            .unwrap();
        assert!(event.is_up);
        assert_eq!(event.details_url, "");
    }

    #[test]
    fn test_scalar_coercion() {
        let mut body = nested_down();
        body["data"]["service"]["name"] = json!(404);
        body["data"]["alert"]["is_up"] = json!("true");
        body["data"]["downtime"]["duration"] = json!(" 90061 ");

        let event = PayloadShape::Nested
            .extract(&body, MissingFieldPolicy::Lenient)
            .unwrap();

        assert_eq!(event.check_name, "404");
        assert!(event.is_up);
        assert_eq!(event.downtime_seconds, Some(90_061.0));
    }

    #[test]
    fn test_is_up_truthiness() {
        let is_up_for = |flag: Value| {
            let mut body = nested_down();
            body["data"]["alert"]["is_up"] = flag;
            PayloadShape::Nested
                .extract(&body, MissingFieldPolicy::Lenient)
                .unwrap()
                .is_up
        };

        let up = [
            json!(true),
            json!(1),
            json!(-2.5),
            json!("true"),
            json!("false"),
            json!("yes"),
            json!({}),
            json!([]),
        ];
        for flag in up {
            assert!(is_up_for(flag.clone()), "{flag} should count as up");
        }
        for flag in [json!(false), json!(0), json!(0.0), json!(""), Value::Null] {
            assert!(!is_up_for(flag.clone()), "{flag} should count as down");
        }
    }

    #[test]
    fn test_shape_from_str() {
        assert_eq!("NESTED".parse::<PayloadShape>(), Ok(PayloadShape::Nested));
        assert!("legacy".parse::<PayloadShape>().is_err());
    }
}
