//! Webhook delivery decomposition.

use serde::Serialize;
use whatsapp_cloud::WebhookPayload;

use crate::error::Result;
use crate::event::{classify_message, classify_status, InboundEvent};

/// Parse a raw webhook body.
///
/// This is the only step that can reject a delivery. A body that is not a
/// JSON object, or whose `entry` is not a list, fails as a whole. Anything
/// unreadable further down carries no events instead.
pub fn parse_delivery(body: &[u8]) -> Result<WebhookPayload> {
    Ok(serde_json::from_slice(body)?)
}

/// Flatten a delivery into its leaf events.
///
/// Events keep payload order: entry, then change, then the value's messages
/// followed by its statuses. Changes without a readable value contribute
/// nothing.
pub fn decompose(payload: &WebhookPayload, now_ms: i64) -> Vec<InboundEvent> {
    let mut events = Vec::new();

    for value in payload
        .entry
        .iter()
        .flat_map(|entry| entry.changes.iter())
        .filter_map(|change| change.value.as_ref())
    {
        let display_phone = value.display_phone_number();

        events.extend(
            value
                .messages
                .iter()
                .map(|raw| classify_message(raw.clone(), display_phone, now_ms)),
        );
        events.extend(
            value
                .statuses
                .iter()
                .map(|raw| classify_status(raw.clone(), now_ms)),
        );
    }

    events
}

/// Outcome of ingesting one delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Ids of the stored messages, in append order.
    pub stored: Vec<String>,
    /// Number of message events.
    pub messages: usize,
    /// Number of status events.
    pub statuses: usize,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const NOW: i64 = 42;

    fn payload(value: serde_json::Value) -> WebhookPayload {
        parse_delivery(value.to_string().as_bytes()).unwrap()
    }

    #[test]
    fn test_rejects_non_json() {
        let err = parse_delivery(b"not json").unwrap_err();
        assert!(matches!(err, crate::RelayError::Ingestion(_)));
    }

    #[test]
    fn test_rejects_wrong_envelope() {
        assert!(parse_delivery(br#"{"entry": {"changes": []}}"#).is_err());
        assert!(parse_delivery(br#"{"entry": "nope"}"#).is_err());
    }

    #[test]
    fn test_unreadable_parts_carry_no_events() {
        let delivery = parse_delivery(br#"{"entry": [{"changes": [{"value": 7}]}]}"#).unwrap();
        assert!(decompose(&delivery, NOW).is_empty());

        let delivery = parse_delivery(br#"{"entry": [null, 5, {"changes": [null, "x"]}]}"#).unwrap();
        assert!(decompose(&delivery, NOW).is_empty());
    }

    #[test]
    fn test_empty_shapes_yield_no_events() {
        assert!(decompose(&payload(json!({})), NOW).is_empty());
        assert!(decompose(&payload(json!({"entry": []})), NOW).is_empty());
        assert!(decompose(&payload(json!({"entry": [{}]})), NOW).is_empty());
        assert!(decompose(&payload(json!({"entry": [{"changes": [{}]}]})), NOW).is_empty());
        assert!(decompose(&payload(json!({"entry": [{"changes": [{"value": {}}]}]})), NOW).is_empty());
    }

    #[test]
    fn test_event_order() {
        let delivery = payload(json!({
            "entry": [
                {"changes": [
                    {"value": {
                        "metadata": {"display_phone_number": "1000"},
                        "statuses": [{"recipient_id": "s1", "status": "sent"}],
                        "messages": [
                            {"from": "m1", "type": "text", "text": {"body": "a"}},
                            {"type": "sticker"}
                        ]
                    }},
                    {"value": null}
                ]},
                {"changes": [
                    {"value": {"messages": [{"from": "m3", "type": "text", "text": {"body": "c"}}]}}
                ]}
            ]
        }));

        let events = decompose(&delivery, NOW);
        let phones: Vec<&str> = events.iter().map(|e| e.phone()).collect();
        assert_eq!(phones, vec!["m1", "1000", "s1", "m3"]);
        assert!(events[2].is_status());
        assert!(events.iter().all(|e| e.timestamp() == NOW));
    }
}
