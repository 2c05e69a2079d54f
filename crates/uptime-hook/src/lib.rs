//! Uptime.com alert webhooks formatted for Rocket.Chat.
//!
//! This crate turns the JSON body of an Uptime.com alert notification into
//! the message object a Rocket.Chat incoming-webhook integration script
//! returns: a short body with optional user tags and one attachment colored
//! by the check's up/down state.
//!
//! # Usage
//!
//! ```
//! use serde_json::json;
//! use uptime_hook::{AlertFormatter, IncomingRequest, WebhookResponse};
//!
//! let formatter = AlertFormatter::default();
//! let request = IncomingRequest::new(json!({
//!     "data": {
//!         "alert": { "is_up": false, "short_output": "HTTP 503" },
//!         "service": { "name": "HTTP-example.com" },
//!         "account": { "site_url": "https://example.com" },
//!         "links": { "alert_details": "https://uptime.com/alerts/1" }
//!     }
//! }))
//! .with_header("contactusers", "@oncall");
//!
//! let WebhookResponse::Content(message) = formatter.process_incoming_request(&request) else {
//!     unreachable!("lenient formatting never rejects a payload");
//! };
//! assert_eq!(message.attachments[0].color, "#A63636");
//! ```
//!
//! # Configuration
//!
//! [`FormatterConfig`] defaults match the hosted script. It can be loaded
//! from TOML with [`FormatterConfig::load`] and adjusted through
//! `UPTIME_HOOK_*` environment variables with [`FormatterConfig::from_env`].
//!
//! # Payload shapes
//!
//! Both the flat and the `data`-nested notification layouts are supported;
//! see [`PayloadShape`].

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod duration;
pub mod error;
pub mod event;
pub mod formatter;
pub mod message;
pub mod request;
pub mod shape;
pub mod status;

pub use config::{FormatterConfig, MissingFieldPolicy};
pub use duration::{format_duration, DurationStyle};
pub use error::{ConfigError, FormatError};
pub use event::{AlertEvent, ContactMention};
pub use formatter::AlertFormatter;
pub use message::{Attachment, ChatMessage, WebhookError, WebhookResponse};
pub use request::IncomingRequest;
pub use shape::PayloadShape;
pub use status::AlertStatus;
