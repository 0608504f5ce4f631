// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Attachment subsystem trait (persistence, retrieval URLs, file conversion).

use async_trait::async_trait;

use crate::error::ModmailError;
use crate::types::{Attachment, FileUpload};

/// The attachment storage subsystem.
///
/// `persist` must complete before a relay continues; the transcript links it
/// produces must stay retrievable after the originating platform message is
/// gone.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Persists the attachment bytes durably.
    async fn persist(&self, attachment: &Attachment) -> Result<(), ModmailError>;

    /// Fetches the attachment and converts it into a deliverable file object.
    async fn to_file(&self, attachment: &Attachment) -> Result<FileUpload, ModmailError>;

    /// Returns the retrievable URL for a persisted attachment.
    fn url_for(&self, attachment_id: &str, filename: &str) -> String;

    /// Returns the human-readable link/descriptor used in relayed text.
    fn format_reference(&self, attachment: &Attachment) -> String;
}
