//! Webhook delivery payloads.
//!
//! Only the envelope itself is strict: a delivery that is not a JSON object,
//! or whose `entry` is neither an array nor missing, is rejected. Inside that
//! envelope every field is read leniently. A wrong-typed auxiliary field
//! reads as `None`, an unreadable entry, change or value carries no events,
//! and leaf events stay as raw JSON so they can be stored verbatim.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Treat both a missing field and an explicit `null` as the default value.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read any JSON value, keeping it only if it has the expected type.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like [`lenient`], but numbers are kept as their decimal text.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// An array (or `null`) whose unreadable items are skipped.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// A webhook delivery.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookPayload {
    /// Subscribed object, normally "whatsapp_business_account".
    #[serde(default, deserialize_with = "lenient")]
    pub object: Option<String>,

    /// Entries, one per business account.
    #[serde(default, deserialize_with = "lenient_items")]
    pub entry: Vec<WebhookEntry>,
}

/// One entry of a delivery.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookEntry {
    /// Business account id.
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,

    /// Changes reported for this account.
    #[serde(default, deserialize_with = "lenient_items")]
    pub changes: Vec<WebhookChange>,
}

/// One change within an entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookChange {
    /// Changed field, normally "messages".
    #[serde(default, deserialize_with = "lenient")]
    pub field: Option<String>,

    /// Change contents. A missing or non-object value carries no events.
    #[serde(default, deserialize_with = "lenient")]
    pub value: Option<ChangeValue>,
}

/// The contents of a change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeValue {
    #[serde(default, deserialize_with = "lenient")]
    pub messaging_product: Option<String>,

    /// Business number metadata.
    #[serde(default, deserialize_with = "lenient")]
    pub metadata: Option<ValueMetadata>,

    /// Raw message events.
    #[serde(default, deserialize_with = "nullable")]
    pub messages: Vec<Value>,

    /// Raw status events.
    #[serde(default, deserialize_with = "nullable")]
    pub statuses: Vec<Value>,
}

impl ChangeValue {
    /// The business display phone number, if present.
    pub fn display_phone_number(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.display_phone_number.as_deref())
    }
}

/// Business number metadata attached to a change value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValueMetadata {
    #[serde(default, deserialize_with = "lenient_text")]
    pub display_phone_number: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub phone_number_id: Option<String>,
}

/// A message event.
///
/// Only the fields the relay reads are modelled; everything else remains in
/// the raw event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookMessage {
    /// WhatsApp message id (`wamid.*`).
    #[serde(default)]
    pub id: Option<String>,

    /// Sender phone number.
    #[serde(default)]
    pub from: Option<String>,

    /// Seconds since the epoch, usually as a string.
    #[serde(default)]
    pub timestamp: Option<Value>,

    /// Message type ("text", "image", "audio", ...).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// Text content for "text" messages.
    #[serde(default)]
    pub text: Option<TextContent>,
}

/// Text content of a message event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(default)]
    pub body: Option<String>,
}

/// A status event for a message we sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookStatus {
    /// Id of the message the status refers to.
    #[serde(default)]
    pub id: Option<String>,

    /// Phone number the message was sent to.
    #[serde(default)]
    pub recipient_id: Option<String>,

    /// Status value ("sent", "delivered", "read", "failed").
    #[serde(default)]
    pub status: Option<String>,

    /// Seconds since the epoch, usually as a string.
    #[serde(default)]
    pub timestamp: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_delivery() {
        let raw = json!({
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "WABA_ID",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "metadata": {
                            "display_phone_number": "15550001111",
                            "phone_number_id": "PHONE_ID"
                        },
                        "messages": [{
                            "from": "1555",
                            "id": "wamid.1",
                            "timestamp": "1000",
                            "type": "text",
                            "text": {"body": "hi"}
                        }]
                    }
                }]
            }]
        });

        let payload: WebhookPayload = serde_json::from_value(raw).unwrap();
        let value = payload.entry[0].changes[0].value.as_ref().unwrap();
        assert_eq!(value.display_phone_number(), Some("15550001111"));
        assert_eq!(value.messages.len(), 1);
        assert!(value.statuses.is_empty());

        let message: WebhookMessage = serde_json::from_value(value.messages[0].clone()).unwrap();
        assert_eq!(message.from.as_deref(), Some("1555"));
        assert_eq!(message.kind.as_deref(), Some("text"));
        assert_eq!(message.text.and_then(|t| t.body).as_deref(), Some("hi"));
    }

    #[test]
    fn test_missing_and_null_lists_are_empty() {
        let payload: WebhookPayload = serde_json::from_value(json!({})).unwrap();
        assert!(payload.entry.is_empty());

        let payload: WebhookPayload = serde_json::from_value(json!({
            "entry": [{"changes": null}, {"changes": [{"value": {"messages": null}}]}]
        }))
        .unwrap();
        assert!(payload.entry[0].changes.is_empty());
        let value = payload.entry[1].changes[0].value.as_ref().unwrap();
        assert!(value.messages.is_empty());
        assert!(value.statuses.is_empty());
    }

    #[test]
    fn test_wrong_typed_fields_are_ignored() {
        let payload: WebhookPayload = serde_json::from_value(json!({
            "object": 42,
            "entry": [
                null,
                7,
                {
                    "id": 123,
                    "changes": [
                        null,
                        {"field": ["messages"], "value": 7},
                        {
                            "field": "messages",
                            "value": {
                                "messaging_product": false,
                                "metadata": {
                                    "display_phone_number": 15550001111u64,
                                    "phone_number_id": {"nested": true}
                                },
                                "messages": [{"from": "1555", "type": "text"}]
                            }
                        }
                    ]
                }
            ]
        }))
        .unwrap();

        assert_eq!(payload.object, None);
        assert_eq!(payload.entry.len(), 1);

        let entry = &payload.entry[0];
        assert_eq!(entry.id.as_deref(), Some("123"));
        assert_eq!(entry.changes.len(), 2);
        assert_eq!(entry.changes[0].field, None);
        assert!(entry.changes[0].value.is_none());

        let value = entry.changes[1].value.as_ref().unwrap();
        assert_eq!(value.messaging_product, None);
        assert_eq!(value.display_phone_number(), Some("15550001111"));
        assert_eq!(value.metadata.as_ref().unwrap().phone_number_id, None);
        assert_eq!(value.messages.len(), 1);
    }

    #[test]
    fn test_wrong_envelope_shape_is_rejected() {
        let result = serde_json::from_value::<WebhookPayload>(json!({"entry": "nope"}));
        assert!(result.is_err());

        let result = serde_json::from_value::<WebhookPayload>(json!([1, 2, 3]));
        assert!(result.is_err());
    }
}
