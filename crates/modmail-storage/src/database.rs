// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread: `Database` wraps a single `tokio_rusqlite::Connection`, query
//! modules accept `&Database` and call through `connection().call()`, and
//! clones of `Database` share the same writer. Do NOT create additional
//! `Connection` instances for writes.

use std::path::Path;

use modmail_core::ModmailError;
use tokio_rusqlite::Connection;
use tracing::debug;

use modmail_config::StorageConfig;

/// Handle to the SQLite database.
///
/// Cheap to clone; all clones dispatch to the same background writer thread.
#[derive(Clone)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at `path`, apply PRAGMAs, and run all
    /// pending migrations. WAL mode is enabled.
    pub async fn open(path: &str) -> Result<Self, ModmailError> {
        Self::open_inner(path, true).await
    }

    /// Open the database described by a [`StorageConfig`].
    pub async fn from_config(config: &StorageConfig) -> Result<Self, ModmailError> {
        Self::open_inner(&config.database_path, config.wal_mode).await
    }

    async fn open_inner(path: &str, wal_mode: bool) -> Result<Self, ModmailError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| ModmailError::Storage {
                    source: Box::new(e),
                })?;
            }
        }

        // Migrations run on a short-lived blocking connection so the async
        // writer below starts against an up-to-date schema.
        let migration_path = path.to_string();
        tokio::task::spawn_blocking(move || {
            let mut conn =
                rusqlite::Connection::open(&migration_path).map_err(|e| ModmailError::Storage {
                    source: Box::new(e),
                })?;
            crate::migrations::run_migrations(&mut conn)
        })
        .await
        .map_err(|e| ModmailError::Internal(format!("migration task panicked: {e}")))??;

        let conn = Connection::open(path)
            .await
            .map_err(|e| ModmailError::Storage {
                source: Box::new(e),
            })?;
        let journal_mode = if wal_mode { "WAL" } else { "DELETE" };
        let pragmas = format!(
            "PRAGMA journal_mode={journal_mode};
             PRAGMA synchronous=NORMAL;
             PRAGMA foreign_keys=ON;
             PRAGMA busy_timeout=5000;"
        );
        conn.call(move |conn| {
            conn.execute_batch(&pragmas)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// Returns the underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Flush pending writes with a WAL checkpoint.
    ///
    /// The background writer thread shuts down when the last clone drops.
    pub async fn close(&self) -> Result<(), ModmailError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Map a tokio-rusqlite error into the workspace error type.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error) -> ModmailError {
    ModmailError::Storage {
        source: Box::new(e),
    }
}
