//! Alert to chat message transform.

use tracing::{debug, warn};

use crate::config::FormatterConfig;
use crate::duration::format_duration;
use crate::error::FormatError;
use crate::event::{AlertEvent, ContactMention};
use crate::message::{Attachment, ChatMessage, WebhookResponse, ATTACHMENT_TITLE};
use crate::request::IncomingRequest;
use crate::shape::PayloadShape;
use crate::status::AlertStatus;

/// Stateless formatter turning provider alerts into chat messages.
#[derive(Debug, Clone, Default)]
pub struct AlertFormatter {
    config: FormatterConfig,
}

impl AlertFormatter {
    #[must_use]
    pub const fn new(config: FormatterConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Entry point for the integration runtime.
    ///
    /// Never fails: a payload rejected under the strict policy becomes an
    /// error reply instead of a message.
    #[must_use]
    pub fn process_incoming_request(&self, request: &IncomingRequest) -> WebhookResponse {
        match self.format_request(request) {
            Ok(message) => WebhookResponse::Content(message),
            Err(e) => {
                warn!(error = %e, "Rejected alert payload");
                WebhookResponse::error(e.to_string())
            }
        }
    }

    /// Extract the alert and mention from a request and format them.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::MissingField`] when the strict policy is
    /// configured and the body lacks a required field.
    pub fn format_request(&self, request: &IncomingRequest) -> Result<ChatMessage, FormatError> {
        let shape = self
            .config
            .shape
            .unwrap_or_else(|| PayloadShape::detect(&request.content));

        let event = shape.extract(&request.content, self.config.missing_fields)?;
        let mention = request.mention(&self.config.mention_header);

        Ok(self.format_for_shape(shape, &event, &mention))
    }

    /// Format one alert as a chat message with a single colored attachment.
    ///
    /// Recoveries always report the downtime, printing "unknown" when the
    /// event has none.
    #[must_use]
    pub fn format(&self, event: &AlertEvent, mention: &ContactMention) -> ChatMessage {
        self.render(event, mention, true)
    }

    /// Format an alert the way its payload shape has always been announced.
    ///
    /// Shapes without a downtime field recover with a bare "Back to normal
    /// now!" and no attachment link.
    #[must_use]
    pub fn format_for_shape(
        &self,
        shape: PayloadShape,
        event: &AlertEvent,
        mention: &ContactMention,
    ) -> ChatMessage {
        self.render(event, mention, shape.reports_downtime())
    }

    fn render(
        &self,
        event: &AlertEvent,
        mention: &ContactMention,
        reports_downtime: bool,
    ) -> ChatMessage {
        let status = event.status();

        debug!(
            check = %event.check_name,
            status = %status,
            "Formatting alert"
        );

        let body_text = format!(
            "{mention} Monitor {} is {status}.\nLink: {}\n",
            event.check_name, event.site_url
        );

        ChatMessage {
            alias: self.config.alias.clone(),
            icon_url: self.config.icon_url.clone(),
            body_text,
            attachments: vec![self.attachment(event, status, reports_downtime)],
        }
    }

    fn attachment(
        &self,
        event: &AlertEvent,
        status: AlertStatus,
        reports_downtime: bool,
    ) -> Attachment {
        let (text, title_link) = match status {
            AlertStatus::Up if !reports_downtime => ("Back to normal now!".to_string(), None),
            AlertStatus::Up => {
                let duration =
                    format_duration(event.downtime_seconds, self.config.duration_style);
                (
                    format!("Back to normal now! Was down for {duration}"),
                    Some(self.config.recovery_link.clone()),
                )
            }
            AlertStatus::Down => (
                format!(
                    "Reason: {}",
                    event.failure_reason.as_deref().unwrap_or_default()
                ),
                Some(event.details_url.clone()),
            ),
        };

        Attachment {
            title: ATTACHMENT_TITLE.to_string(),
            title_link,
            text,
            color: status.color().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down_event() -> AlertEvent {
        AlertEvent::new(
            "HTTP-example.com",
            "https://example.com",
            false,
            "https://uptime.com/alerts/1",
        )
        .with_failure_reason("HTTP 503")
    }

    #[test]
    fn test_down_message() {
        let formatter = AlertFormatter::default();
        let message = formatter.format(&down_event(), &ContactMention::new("@alice @bob"));

        assert_eq!(message.alias, "Uptime.com Alerts");
        assert_eq!(
            message.body_text,
            "@alice @bob Monitor HTTP-example.com is DOWN.\nLink: https://example.com\n"
        );

        let attachment = &message.attachments[0];
        assert_eq!(message.attachments.len(), 1);
        assert_eq!(attachment.title, "More info");
        assert_eq!(attachment.text, "Reason: HTTP 503");
        assert_eq!(
            attachment.title_link.as_deref(),
            Some("https://uptime.com/alerts/1")
        );
        assert_eq!(attachment.color, "#A63636");
    }

    #[test]
    fn test_up_message() {
        let formatter = AlertFormatter::default();
        let event = AlertEvent::new("HTTP-example.com", "https://example.com", true, "")
            .with_downtime_seconds(90_061.0);
        let message = formatter.format(&event, &ContactMention::default());

        assert!(message.body_text.contains("is UP."));
        let attachment = &message.attachments[0];
        assert_eq!(attachment.text, "Back to normal now! Was down for 1d 1h 1m 1s");
        assert_eq!(attachment.title_link.as_deref(), Some("https://uptime.com"));
        assert_eq!(attachment.color, "#36A64F");
    }

    #[test]
    fn test_up_without_duration() {
        let formatter = AlertFormatter::default();
        let event = AlertEvent::new("x", "y", true, "");
        let message = formatter.format(&event, &ContactMention::default());

        assert_eq!(
            message.attachments[0].text,
            "Back to normal now! Was down for unknown"
        );
    }

    #[test]
    fn test_custom_recovery_link() {
        let formatter = AlertFormatter::new(
            FormatterConfig::default().with_recovery_link("https://status.example.com"),
        );
        let event = AlertEvent::new("x", "y", true, "https://uptime.com/alerts/2");
        let message = formatter.format(&event, &ContactMention::default());

        assert_eq!(
            message.attachments[0].title_link.as_deref(),
            Some("https://status.example.com")
        );
    }

    #[test]
    fn test_flat_recovery_is_bare() {
        let formatter = AlertFormatter::default();
        let event = AlertEvent::new("PING-db", "db.example.com", true, "https://uptime.com/h/1")
            .with_downtime_seconds(60.0);
        let message = formatter.format_for_shape(
            PayloadShape::Flat,
            &event,
            &ContactMention::default(),
        );

        let attachment = &message.attachments[0];
        assert_eq!(attachment.text, "Back to normal now!");
        assert_eq!(attachment.title_link, None);
        assert_eq!(attachment.color, "#36A64F");
    }

    #[test]
    fn test_flat_down_keeps_details_link() {
        let message = AlertFormatter::default().format_for_shape(
            PayloadShape::Flat,
            &down_event(),
            &ContactMention::default(),
        );

        assert_eq!(message.attachments[0].text, "Reason: HTTP 503");
        assert_eq!(
            message.attachments[0].title_link.as_deref(),
            Some("https://uptime.com/alerts/1")
        );
    }
}
