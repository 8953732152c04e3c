//! Leaf webhook events and their translation into store records.

use database::{NewMessage, UNKNOWN_PHONE};
use serde_json::{json, Value};
use tracing::warn;
use whatsapp_cloud::{WebhookMessage, WebhookStatus};

/// One leaf event of a webhook delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// A text message.
    Text {
        phone: String,
        body: String,
        timestamp: i64,
        raw: Value,
    },
    /// Any other message type (image, audio, location, ...).
    Other {
        phone: String,
        kind: String,
        timestamp: i64,
        raw: Value,
    },
    /// A delivery status update for a message we sent.
    Status {
        phone: String,
        status: String,
        timestamp: i64,
        raw: Value,
    },
}

impl InboundEvent {
    /// Counterparty phone number.
    pub fn phone(&self) -> &str {
        match self {
            InboundEvent::Text { phone, .. }
            | InboundEvent::Other { phone, .. }
            | InboundEvent::Status { phone, .. } => phone,
        }
    }

    /// Event time in milliseconds.
    pub fn timestamp(&self) -> i64 {
        match self {
            InboundEvent::Text { timestamp, .. }
            | InboundEvent::Other { timestamp, .. }
            | InboundEvent::Status { timestamp, .. } => *timestamp,
        }
    }

    /// Whether this is a status update rather than a message.
    pub fn is_status(&self) -> bool {
        matches!(self, InboundEvent::Status { .. })
    }

    /// The upstream `wamid.*` id carried in the raw event, if any.
    pub fn upstream_id(&self) -> Option<&str> {
        let raw = match self {
            InboundEvent::Text { raw, .. }
            | InboundEvent::Other { raw, .. }
            | InboundEvent::Status { raw, .. } => raw,
        };
        raw.get("id").and_then(Value::as_str)
    }

    /// Translate the event into an incoming message candidate.
    pub fn into_new_message(self) -> NewMessage {
        match self {
            InboundEvent::Text {
                phone,
                body,
                timestamp,
                raw,
            } => NewMessage::incoming(phone, body, timestamp, json!({ "raw": raw })),
            InboundEvent::Other {
                phone,
                kind,
                timestamp,
                raw,
            } => NewMessage::incoming(
                phone,
                format!("Received {} message", kind),
                timestamp,
                json!({ "raw": raw }),
            ),
            InboundEvent::Status {
                phone,
                status,
                timestamp,
                raw,
            } => NewMessage::incoming(
                phone,
                format!("Message status: {}", status),
                timestamp,
                json!({ "raw": raw, "type": "status" }),
            ),
        }
    }
}

/// Convert a seconds timestamp from a payload into milliseconds.
///
/// Accepts numeric strings and JSON numbers. Anything missing, blank, not
/// finite, or outside the `i64` millisecond range falls back to `now_ms`.
pub fn timestamp_millis(raw: Option<&Value>, now_ms: i64) -> i64 {
    let seconds = match raw {
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    };

    // `as` saturates, so out-of-range values must be caught before the cast.
    match seconds.map(|s| (s * 1000.0).round()) {
        Some(millis) if (i64::MIN as f64..i64::MAX as f64).contains(&millis) => millis as i64,
        _ => now_ms,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Classify a raw message event.
///
/// `display_phone` is the business number of the enclosing change value,
/// used when the event has no sender.
pub fn classify_message(raw: Value, display_phone: Option<&str>, now_ms: i64) -> InboundEvent {
    let message: WebhookMessage = serde_json::from_value(raw.clone()).unwrap_or_else(|err| {
        warn!(error = %err, "Unreadable message event, using fallbacks");
        WebhookMessage::default()
    });

    let phone = non_empty(message.from.as_deref())
        .or_else(|| non_empty(display_phone))
        .unwrap_or(UNKNOWN_PHONE)
        .to_string();
    let timestamp = timestamp_millis(message.timestamp.as_ref(), now_ms);

    match message.kind.as_deref() {
        Some("text") => InboundEvent::Text {
            phone,
            body: message.text.and_then(|t| t.body).unwrap_or_default(),
            timestamp,
            raw,
        },
        kind => InboundEvent::Other {
            phone,
            kind: kind.unwrap_or("unknown").to_string(),
            timestamp,
            raw,
        },
    }
}

/// Classify a raw status event.
pub fn classify_status(raw: Value, now_ms: i64) -> InboundEvent {
    let status: WebhookStatus = serde_json::from_value(raw.clone()).unwrap_or_else(|err| {
        warn!(error = %err, "Unreadable status event, using fallbacks");
        WebhookStatus::default()
    });

    InboundEvent::Status {
        phone: non_empty(status.recipient_id.as_deref())
            .unwrap_or(UNKNOWN_PHONE)
            .to_string(),
        status: status.status.unwrap_or_else(|| "unknown".to_string()),
        timestamp: timestamp_millis(status.timestamp.as_ref(), now_ms),
        raw,
    }
}

#[cfg(test)]
mod tests {
    use database::Direction;
    use serde_json::json;

    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_timestamp_conversion() {
        assert_eq!(timestamp_millis(Some(&json!("1000")), NOW), 1_000_000);
        assert_eq!(timestamp_millis(Some(&json!(" 1000 ")), NOW), 1_000_000);
        assert_eq!(timestamp_millis(Some(&json!(1000)), NOW), 1_000_000);
        assert_eq!(timestamp_millis(Some(&json!("1.5")), NOW), 1_500);
    }

    #[test]
    fn test_timestamp_fallbacks() {
        assert_eq!(timestamp_millis(None, NOW), NOW);
        assert_eq!(timestamp_millis(Some(&json!("")), NOW), NOW);
        assert_eq!(timestamp_millis(Some(&json!("soon")), NOW), NOW);
        assert_eq!(timestamp_millis(Some(&json!("NaN")), NOW), NOW);
        assert_eq!(timestamp_millis(Some(&json!("inf")), NOW), NOW);
        assert_eq!(timestamp_millis(Some(&json!(null)), NOW), NOW);
        assert_eq!(timestamp_millis(Some(&json!({"s": 1})), NOW), NOW);
        assert_eq!(timestamp_millis(Some(&json!("1e300")), NOW), NOW);
        assert_eq!(timestamp_millis(Some(&json!("-1e300")), NOW), NOW);
        assert_eq!(timestamp_millis(Some(&json!(1e300)), NOW), NOW);
        assert_eq!(timestamp_millis(Some(&json!("9223372036854776")), NOW), NOW);
    }

    #[test]
    fn test_text_message() {
        let raw = json!({"from": "1555", "timestamp": "1000", "type": "text", "text": {"body": "hi"}});
        let event = classify_message(raw.clone(), None, NOW);

        let message = event.into_new_message();
        assert_eq!(message.direction, Direction::Incoming);
        assert_eq!(message.phone, "1555");
        assert_eq!(message.text, "hi");
        assert_eq!(message.timestamp, 1_000_000);
        assert_eq!(message.metadata, json!({ "raw": raw }));
    }

    #[test]
    fn test_text_message_without_body() {
        let event = classify_message(json!({"from": "1555", "type": "text"}), None, NOW);
        assert_eq!(event.into_new_message().text, "");
    }

    #[test]
    fn test_non_text_message() {
        let raw = json!({"from": "1555", "timestamp": "1000", "type": "image", "image": {"id": "media"}});
        let event = classify_message(raw, None, NOW);
        assert!(matches!(event, InboundEvent::Other { ref kind, .. } if kind == "image"));
        assert_eq!(event.into_new_message().text, "Received image message");
    }

    #[test]
    fn test_phone_fallbacks() {
        let event = classify_message(json!({"type": "text"}), Some("15550001111"), NOW);
        assert_eq!(event.phone(), "15550001111");

        let event = classify_message(json!({"from": "", "type": "text"}), Some(""), NOW);
        assert_eq!(event.phone(), UNKNOWN_PHONE);
        assert_eq!(event.timestamp(), NOW);
    }

    #[test]
    fn test_malformed_event_degrades() {
        let event = classify_message(json!({"from": 1555, "type": ["text"]}), None, NOW);
        assert_eq!(event.phone(), UNKNOWN_PHONE);
        assert_eq!(event.into_new_message().text, "Received unknown message");

        let event = classify_message(json!("not an object"), Some("1999"), NOW);
        assert_eq!(event.phone(), "1999");
    }

    #[test]
    fn test_status_event() {
        let raw = json!({
            "id": "wamid.9",
            "recipient_id": "1555",
            "status": "delivered",
            "timestamp": "2000"
        });
        let event = classify_status(raw.clone(), NOW);
        assert!(event.is_status());
        assert_eq!(event.upstream_id(), Some("wamid.9"));

        let message = event.into_new_message();
        assert_eq!(message.phone, "1555");
        assert_eq!(message.text, "Message status: delivered");
        assert_eq!(message.timestamp, 2_000_000);
        assert_eq!(message.direction, Direction::Incoming);
        assert_eq!(message.metadata, json!({ "raw": raw, "type": "status" }));
    }

    #[test]
    fn test_status_without_recipient() {
        let event = classify_status(json!({"status": "read"}), NOW);
        assert_eq!(event.phone(), UNKNOWN_PHONE);
        assert_eq!(event.timestamp(), NOW);
    }
}
