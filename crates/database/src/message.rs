//! Message store operations.
//!
//! The store is append-only: rows are inserted one statement at a time and
//! only ever removed all together by [`clear_messages`]. Reads return rows in
//! insertion order, which is not chronological order; sort by `timestamp`
//! when that matters.

use sqlx::types::Json;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{DatabaseError, Result};
use crate::models::{Message, NewMessage, UNKNOWN_PHONE};

/// Append a message, assigning it a fresh id.
pub async fn append_message(pool: &SqlitePool, candidate: &NewMessage) -> Result<Message> {
    let id = Uuid::new_v4().to_string();
    let phone = if candidate.phone.is_empty() {
        UNKNOWN_PHONE
    } else {
        candidate.phone.as_str()
    };

    sqlx::query(
        r#"
        INSERT INTO messages (id, direction, phone, text, timestamp, status, metadata)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(candidate.direction)
    .bind(phone)
    .bind(&candidate.text)
    .bind(candidate.timestamp)
    .bind(candidate.status.as_deref())
    .bind(Json(&candidate.metadata))
    .execute(pool)
    .await?;

    tracing::debug!(
        id = %id,
        direction = %candidate.direction,
        phone = %phone,
        "Appended message"
    );

    Ok(Message {
        id,
        direction: candidate.direction,
        phone: phone.to_string(),
        text: candidate.text.clone(),
        timestamp: candidate.timestamp,
        status: candidate.status.clone(),
        metadata: candidate.metadata.clone(),
    })
}

/// Get a message by id.
pub async fn get_message(pool: &SqlitePool, id: &str) -> Result<Message> {
    sqlx::query_as::<_, Message>(
        r#"
        SELECT id, direction, phone, text, timestamp, status, metadata
        FROM messages
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Message",
        id: id.to_string(),
    })
}

/// List every stored message in insertion order.
pub async fn list_messages(pool: &SqlitePool) -> Result<Vec<Message>> {
    let messages = sqlx::query_as::<_, Message>(
        r#"
        SELECT id, direction, phone, text, timestamp, status, metadata
        FROM messages
        ORDER BY rowid
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// Remove every message. Returns how many rows were deleted.
pub async fn clear_messages(pool: &SqlitePool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM messages").execute(pool).await?;
    let removed = result.rows_affected();

    tracing::info!(removed, "Cleared message store");
    Ok(removed)
}

/// Count stored messages.
pub async fn count_messages(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM messages
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
