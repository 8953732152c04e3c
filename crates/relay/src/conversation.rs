//! Read-time conversation views over the flat message list.
//!
//! Nothing here is persisted; every view is recomputed from the full list,
//! so it can never disagree with the store.

use std::cmp::Reverse;
use std::collections::HashMap;

use database::Message;
use serde::Serialize;

/// A contact with a preview of its latest message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSummary {
    /// Counterparty phone number.
    pub phone: String,
    /// Text of the most recent message.
    pub last_text: String,
    /// Timestamp of the most recent message.
    pub last_timestamp: i64,
    /// Number of messages with this contact.
    pub message_count: usize,
}

/// Messages sorted newest first. Equal timestamps keep store order.
fn newest_first(messages: &[Message]) -> Vec<&Message> {
    let mut sorted: Vec<&Message> = messages.iter().collect();
    sorted.sort_by_key(|m| Reverse(m.timestamp));
    sorted
}

/// Distinct phone numbers, most recently active first.
pub fn contacts(messages: &[Message]) -> Vec<String> {
    contact_summaries(messages)
        .into_iter()
        .map(|c| c.phone)
        .collect()
}

/// Contacts with their latest message, most recently active first.
pub fn contact_summaries(messages: &[Message]) -> Vec<ContactSummary> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for message in messages {
        *counts.entry(message.phone.as_str()).or_default() += 1;
    }

    let mut summaries: Vec<ContactSummary> = Vec::with_capacity(counts.len());
    for message in newest_first(messages) {
        // First sighting in the descending scan is the contact's latest message.
        if let Some(count) = counts.remove(message.phone.as_str()) {
            summaries.push(ContactSummary {
                phone: message.phone.clone(),
                last_text: message.text.clone(),
                last_timestamp: message.timestamp,
                message_count: count,
            });
        }
    }

    summaries
}

/// The conversation with one phone number, oldest first.
pub fn conversation(messages: &[Message], phone: &str) -> Vec<Message> {
    let mut thread: Vec<Message> = messages
        .iter()
        .filter(|m| m.phone == phone)
        .cloned()
        .collect();
    thread.sort_by_key(|m| m.timestamp);
    thread
}
