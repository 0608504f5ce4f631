// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transcript entry CRUD operations.
//!
//! Edits and deletes are keyed by `(thread_id, dm_message_id)` — the
//! correlation id linking a logged entry back to the originating platform
//! message. Both return the affected row count; zero rows is a valid
//! outcome (the message was never logged), decided by the caller.

use modmail_core::ModmailError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{MessageType, NewThreadMessage, ThreadMessage};

fn row_to_message(row: &rusqlite::Row<'_>) -> Result<ThreadMessage, rusqlite::Error> {
    let message_type: String = row.get(2)?;
    let message_type = message_type.parse::<MessageType>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(ThreadMessage {
        id: row.get(0)?,
        thread_id: row.get(1)?,
        message_type,
        user_id: row.get(3)?,
        user_name: row.get(4)?,
        body: row.get(5)?,
        is_anonymous: row.get(6)?,
        dm_message_id: row.get(7)?,
        created_at: row.get(8)?,
    })
}

const MESSAGE_COLUMNS: &str =
    "id, thread_id, message_type, user_id, user_name, body, is_anonymous, dm_message_id, created_at";

/// Insert a new transcript entry, returning its assigned row id.
pub async fn insert_thread_message(
    db: &Database,
    msg: &NewThreadMessage,
) -> Result<i64, ModmailError> {
    let msg = msg.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO thread_messages
                 (thread_id, message_type, user_id, user_name, body, is_anonymous, dm_message_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    msg.thread_id,
                    msg.message_type.to_string(),
                    msg.user_id,
                    msg.user_name,
                    msg.body,
                    msg.is_anonymous,
                    msg.dm_message_id,
                    msg.created_at,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a thread's transcript in display order.
///
/// Sorted by `(created_at ASC, id ASC)`: insertion order is preserved when
/// timestamps collide.
pub async fn get_thread_messages(
    db: &Database,
    thread_id: &str,
) -> Result<Vec<ThreadMessage>, ModmailError> {
    let thread_id = thread_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {MESSAGE_COLUMNS} FROM thread_messages
                 WHERE thread_id = ?1
                 ORDER BY created_at ASC, id ASC"
            ))?;
            let rows = stmt.query_map(params![thread_id], row_to_message)?;
            let mut messages = Vec::new();
            for row in rows {
                messages.push(row?);
            }
            Ok(messages)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Update the stored body of the entry matching a correlation id.
///
/// Returns the number of affected rows; zero means the originating message
/// was never logged.
pub async fn update_body_by_dm_message_id(
    db: &Database,
    thread_id: &str,
    dm_message_id: &str,
    body: &str,
) -> Result<usize, ModmailError> {
    let thread_id = thread_id.to_string();
    let dm_message_id = dm_message_id.to_string();
    let body = body.to_string();
    db.connection()
        .call(move |conn| {
            let affected = conn.execute(
                "UPDATE thread_messages SET body = ?1
                 WHERE thread_id = ?2 AND dm_message_id = ?3",
                params![body, thread_id, dm_message_id],
            )?;
            Ok(affected)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete the entry(ies) matching a correlation id.
///
/// Returns the number of affected rows; zero means the originating message
/// was never logged.
pub async fn delete_by_dm_message_id(
    db: &Database,
    thread_id: &str,
    dm_message_id: &str,
) -> Result<usize, ModmailError> {
    let thread_id = thread_id.to_string();
    let dm_message_id = dm_message_id.to_string();
    db.connection()
        .call(move |conn| {
            let affected = conn.execute(
                "DELETE FROM thread_messages
                 WHERE thread_id = ?1 AND dm_message_id = ?2",
                params![thread_id, dm_message_id],
            )?;
            Ok(affected)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
