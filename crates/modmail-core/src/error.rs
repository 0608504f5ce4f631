// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the modmail relay engine.

use thiserror::Error;

/// The primary error type used across the modmail workspace.
#[derive(Debug, Error)]
pub enum ModmailError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, migration).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The chat platform reports the target channel as gone.
    ///
    /// This is the distinguished condition the relay checks to detect an
    /// orphaned thread; every other delivery failure is [`ModmailError::Delivery`].
    #[error("channel not found: {channel_id}")]
    ChannelNotFound { channel_id: String },

    /// Chat platform delivery errors other than a missing channel.
    #[error("delivery error: {message}")]
    Delivery {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Attachment subsystem errors (persist or fetch failure).
    #[error("attachment error: {message}")]
    Attachment {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ModmailError {
    /// Returns true when the error is the distinguished channel-gone condition.
    pub fn is_channel_not_found(&self) -> bool {
        matches!(self, ModmailError::ChannelNotFound { .. })
    }
}
