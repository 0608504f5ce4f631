// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Thread CRUD operations.

use modmail_core::ModmailError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{Thread, ThreadStatus};

fn row_to_thread(row: &rusqlite::Row<'_>) -> Result<Thread, rusqlite::Error> {
    let status: String = row.get(1)?;
    let status = status.parse::<ThreadStatus>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Thread {
        id: row.get(0)?,
        status,
        user_id: row.get(2)?,
        user_name: row.get(3)?,
        channel_id: row.get(4)?,
        created_at: row.get(5)?,
    })
}

const THREAD_COLUMNS: &str = "id, status, user_id, user_name, channel_id, created_at";

/// Create a new thread.
pub async fn create_thread(db: &Database, thread: &Thread) -> Result<(), ModmailError> {
    let thread = thread.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO threads (id, status, user_id, user_name, channel_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    thread.id,
                    thread.status.to_string(),
                    thread.user_id,
                    thread.user_name,
                    thread.channel_id,
                    thread.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a thread by ID.
pub async fn get_thread(db: &Database, id: &str) -> Result<Option<Thread>, ModmailError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {THREAD_COLUMNS} FROM threads WHERE id = ?1"
            ))?;
            let result = stmt.query_row(params![id], row_to_thread);
            match result {
                Ok(thread) => Ok(Some(thread)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get the open thread for a user, if any.
pub async fn get_open_thread_for_user(
    db: &Database,
    user_id: &str,
) -> Result<Option<Thread>, ModmailError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {THREAD_COLUMNS} FROM threads WHERE user_id = ?1 AND status = 'open'"
            ))?;
            let result = stmt.query_row(params![user_id], row_to_thread);
            match result {
                Ok(thread) => Ok(Some(thread)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List threads, optionally filtered by status.
pub async fn list_threads(
    db: &Database,
    status: Option<ThreadStatus>,
) -> Result<Vec<Thread>, ModmailError> {
    db.connection()
        .call(move |conn| {
            let mut threads = Vec::new();
            match status {
                Some(status_filter) => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {THREAD_COLUMNS} FROM threads
                         WHERE status = ?1 ORDER BY created_at DESC"
                    ))?;
                    let rows = stmt.query_map(params![status_filter.to_string()], row_to_thread)?;
                    for row in rows {
                        threads.push(row?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {THREAD_COLUMNS} FROM threads ORDER BY created_at DESC"
                    ))?;
                    let rows = stmt.query_map([], row_to_thread)?;
                    for row in rows {
                        threads.push(row?);
                    }
                }
            }
            Ok(threads)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Update a thread's lifecycle status.
pub async fn update_thread_status(
    db: &Database,
    id: &str,
    status: ThreadStatus,
) -> Result<(), ModmailError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE threads SET status = ?1 WHERE id = ?2",
                params![status.to_string(), id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
