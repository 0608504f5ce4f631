// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat platform client trait (channel resolution, posting, channel deletion).

use async_trait::async_trait;

use crate::error::ModmailError;
use crate::types::{FileUpload, PostedMessage};

/// Client for the chat platform hosting both sides of a thread.
///
/// Implementations must fail with [`ModmailError::ChannelNotFound`] when the
/// target channel is gone; the relay branches on that condition to recover
/// orphaned threads. Any other failure is reported as
/// [`ModmailError::Delivery`].
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Resolves the private one-to-one channel for a user.
    ///
    /// Returns `None` when no direct channel can be opened.
    async fn resolve_direct_channel(
        &self,
        user_id: &str,
    ) -> Result<Option<String>, ModmailError>;

    /// Posts a message with optional file uploads to a channel.
    async fn post_message(
        &self,
        channel_id: &str,
        content: &str,
        files: Vec<FileUpload>,
    ) -> Result<PostedMessage, ModmailError>;

    /// Deletes a channel, recording the reason in the platform audit log.
    async fn delete_channel(&self, channel_id: &str, reason: &str) -> Result<(), ModmailError>;
}
