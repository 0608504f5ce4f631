// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The thread relay: forwards messages between the user-facing and
//! staff-facing sides of a conversation and builds its transcript.
//!
//! All collaborators are injected at construction so tests can substitute
//! doubles. Each operation runs its steps strictly sequentially; ordering of
//! transcript entries is determined solely by insertion order at the
//! persistence layer.

use std::sync::Arc;

use chrono::Utc;
use modmail_config::BotConfig;
use modmail_core::{
    Attachment, AttachmentStore, ChatClient, FileUpload, MessageType, ModeratorIdentity,
    ModmailError, NewThreadMessage, PostedMessage, Thread, ThreadMessage, ThreadStatus,
    UserMessage,
};
use modmail_storage::{queries, Database};
use tracing::{debug, info, warn};

use crate::format::{self, Direction, EMBED_PLACEHOLDER, SMALL_ATTACHMENT_LIMIT};

/// Relay component for one thread.
///
/// Holds the immutable [`Thread`] value plus the injected collaborators.
/// The thread's lifecycle status lives in storage; [`ThreadRelay::close`]
/// returns the post-transition value.
pub struct ThreadRelay {
    thread: Thread,
    chat: Arc<dyn ChatClient>,
    attachments: Arc<dyn AttachmentStore>,
    db: Database,
    config: BotConfig,
}

impl ThreadRelay {
    /// Creates a relay for an existing thread.
    pub fn new(
        thread: Thread,
        chat: Arc<dyn ChatClient>,
        attachments: Arc<dyn AttachmentStore>,
        db: Database,
        config: BotConfig,
    ) -> Self {
        Self {
            thread,
            chat,
            attachments,
            db,
            config,
        }
    }

    /// The thread this relay serves.
    pub fn thread(&self) -> &Thread {
        &self.thread
    }

    /// The transcript-viewing link, when a log base URL is configured.
    pub fn log_url(&self) -> Option<String> {
        self.config
            .log_url
            .as_ref()
            .map(|base| format!("{}/{}", base.trim_end_matches('/'), self.thread.id))
    }

    /// Relays a staff reply to the user and logs it.
    ///
    /// Delivers the user-facing copy first. If that delivery fails, the
    /// operation aborts: an error notice is posted to the staff channel
    /// (unlogged) and nothing is written to the transcript. Once both copies
    /// are delivered, exactly one `to_user` entry is appended, keyed by the
    /// DM message's id. A staff channel that turns out to be gone closes the
    /// thread without logging anything.
    pub async fn reply_to_user(
        &self,
        moderator: &ModeratorIdentity,
        text: &str,
        attachments: &[Attachment],
        anonymous: bool,
    ) -> Result<(), ModmailError> {
        let names = format::moderator_names(moderator, self.config.use_nicknames, anonymous);
        let user_copy = format::message_copy(&names.display, text);
        let thread_copy = if self.config.thread_timestamps {
            format::timestamped(&user_copy, Utc::now(), Direction::Outbound)
        } else {
            user_copy.clone()
        };

        // Outbound attachments are always relayed as files; the size policy
        // only applies inbound. The transcript still records a link per
        // attachment.
        let mut files = Vec::with_capacity(attachments.len());
        let mut log_body = text.to_string();
        for attachment in attachments {
            files.push(self.attachments.to_file(attachment).await?);
            let url = self
                .attachments
                .url_for(&attachment.id, &attachment.filename);
            log_body.push_str(&format::attachment_link(&url));
        }

        let dm_result = match self.chat.resolve_direct_channel(&self.thread.user_id).await {
            Ok(Some(dm_channel)) => {
                self.chat
                    .post_message(&dm_channel, &user_copy, files.clone())
                    .await
            }
            Ok(None) => Err(ModmailError::Delivery {
                message: format!("no direct channel for user {}", self.thread.user_id),
                source: None,
            }),
            Err(e) => Err(e),
        };

        let dm_message = match dm_result {
            Ok(posted) => posted,
            Err(e) => {
                warn!(thread_id = %self.thread.id, error = %e, "failed to deliver reply to user");
                self.post_non_log_message(&format!("Error while replying to user: {e}"))
                    .await?;
                return Ok(());
            }
        };

        if self.post_to_thread(&thread_copy, files).await?.is_none() {
            return Ok(());
        }

        let entry = NewThreadMessage {
            thread_id: self.thread.id.clone(),
            message_type: MessageType::ToUser,
            user_id: Some(moderator.id.clone()),
            user_name: names.log,
            body: log_body,
            is_anonymous: anonymous,
            dm_message_id: Some(dm_message.id),
            created_at: format::now_iso(),
        };
        queries::thread_messages::insert_thread_message(&self.db, &entry).await?;
        Ok(())
    }

    /// Relays an incoming user message into the staff channel and logs it.
    ///
    /// Attachments are persisted before anything else proceeds. Small
    /// attachments are re-uploaded as files when the policy allows; otherwise
    /// the displayed copy carries a link. The entry is appended only once the
    /// staff-facing copy is delivered; its body carries the links and the raw
    /// content (no embed placeholder).
    pub async fn receive_user_message(&self, msg: &UserMessage) -> Result<(), ModmailError> {
        let tag = msg.tag();
        let mut log_body = msg.content.clone();
        let mut display_content = if msg.content.trim().is_empty() && msg.has_embeds {
            EMBED_PLACEHOLDER.to_string()
        } else {
            msg.content.clone()
        };

        let mut files = Vec::new();
        for attachment in &msg.attachments {
            self.attachments.persist(attachment).await?;
            let reference = self.attachments.format_reference(attachment);
            log_body.push_str("\n\n");
            log_body.push_str(&reference);

            let relay_as_file = self.config.relay_small_attachments_as_attachments
                && attachment.size <= SMALL_ATTACHMENT_LIMIT;
            if relay_as_file {
                files.push(self.attachments.to_file(attachment).await?);
            } else {
                display_content.push_str("\n\n");
                display_content.push_str(&reference);
            }
        }

        let mut thread_copy = format::message_copy(&tag, &display_content);
        if self.config.thread_timestamps {
            // The message's own origination time, not receipt time.
            thread_copy = format::timestamped(&thread_copy, msg.timestamp, Direction::Inbound);
        }

        if self.post_to_thread(&thread_copy, files).await?.is_none() {
            return Ok(());
        }

        let entry = NewThreadMessage {
            thread_id: self.thread.id.clone(),
            message_type: MessageType::FromUser,
            user_id: Some(msg.user_id.clone()),
            user_name: tag,
            body: log_body,
            is_anonymous: false,
            dm_message_id: Some(msg.id.clone()),
            created_at: format::now_iso(),
        };
        queries::thread_messages::insert_thread_message(&self.db, &entry).await?;
        Ok(())
    }

    /// Records ordinary staff-channel chatter as a `chat` entry. No relay.
    pub async fn save_chat_message(
        &self,
        author_id: &str,
        author_name: &str,
        body: &str,
        message_id: &str,
    ) -> Result<(), ModmailError> {
        let entry = NewThreadMessage {
            thread_id: self.thread.id.clone(),
            message_type: MessageType::Chat,
            user_id: Some(author_id.to_string()),
            user_name: author_name.to_string(),
            body: body.to_string(),
            is_anonymous: false,
            dm_message_id: Some(message_id.to_string()),
            created_at: format::now_iso(),
        };
        queries::thread_messages::insert_thread_message(&self.db, &entry).await?;
        Ok(())
    }

    /// Applies an edit of the originating message to its logged entry.
    ///
    /// Zero affected rows means the message predates tracking; tolerated.
    pub async fn update_chat_message(
        &self,
        dm_message_id: &str,
        body: &str,
    ) -> Result<(), ModmailError> {
        let affected = queries::thread_messages::update_body_by_dm_message_id(
            &self.db,
            &self.thread.id,
            dm_message_id,
            body,
        )
        .await?;
        if affected == 0 {
            debug!(thread_id = %self.thread.id, dm_message_id, "edit of untracked message ignored");
        }
        Ok(())
    }

    /// Removes the logged entry for a deleted originating message.
    ///
    /// Zero affected rows means the message predates tracking; tolerated.
    pub async fn delete_chat_message(&self, dm_message_id: &str) -> Result<(), ModmailError> {
        let affected =
            queries::thread_messages::delete_by_dm_message_id(&self.db, &self.thread.id, dm_message_id)
                .await?;
        if affected == 0 {
            debug!(thread_id = %self.thread.id, dm_message_id, "delete of untracked message ignored");
        }
        Ok(())
    }

    /// Posts plain text to the staff channel and logs it as a `system` entry.
    ///
    /// The posted message's platform id is stored as the correlation id.
    pub async fn post_system_message(&self, text: &str) -> Result<(), ModmailError> {
        let posted = self.post_to_thread(text, Vec::new()).await?;
        if let Some(posted) = posted {
            let entry = NewThreadMessage {
                thread_id: self.thread.id.clone(),
                message_type: MessageType::System,
                user_id: None,
                user_name: String::new(),
                body: text.to_string(),
                is_anonymous: false,
                dm_message_id: Some(posted.id),
                created_at: format::now_iso(),
            };
            queries::thread_messages::insert_thread_message(&self.db, &entry).await?;
        }
        Ok(())
    }

    /// Posts to the staff channel without any transcript entry.
    pub async fn post_non_log_message(&self, text: &str) -> Result<(), ModmailError> {
        self.post_to_thread(text, Vec::new()).await?;
        Ok(())
    }

    /// The thread's transcript in display order (`created_at ASC, id ASC`).
    pub async fn messages(&self) -> Result<Vec<ThreadMessage>, ModmailError> {
        queries::thread_messages::get_thread_messages(&self.db, &self.thread.id).await
    }

    /// Closes the thread: optional closing notice, status transition, and a
    /// best-effort delete of the staff channel.
    ///
    /// Idempotent in effect; a second close re-applies the same status and
    /// tolerates the already-deleted channel. Returns the closed value.
    pub async fn close(&self, silent: bool) -> Result<Thread, ModmailError> {
        if !silent {
            info!(thread_id = %self.thread.id, "closing thread");
            self.post_system_message("Closing thread...").await?;
        }
        self.close_silently().await?;
        Ok(self.thread.clone().into_closed())
    }

    /// Status transition plus best-effort channel delete, with no posting.
    ///
    /// Also the orphan-recovery path, so it must not post anything itself.
    async fn close_silently(&self) -> Result<(), ModmailError> {
        queries::threads::update_thread_status(&self.db, &self.thread.id, ThreadStatus::Closed)
            .await?;
        match self
            .chat
            .delete_channel(&self.thread.channel_id, "Modmail thread closed")
            .await
        {
            Ok(()) => Ok(()),
            Err(ModmailError::ChannelNotFound { channel_id }) => {
                debug!(thread_id = %self.thread.id, %channel_id, "channel already gone, skipping delete");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Posts to the staff-facing channel, recovering orphaned threads.
    ///
    /// A `ChannelNotFound` failure closes the thread silently and yields
    /// `Ok(None)`; every other failure propagates unchanged.
    async fn post_to_thread(
        &self,
        content: &str,
        files: Vec<FileUpload>,
    ) -> Result<Option<PostedMessage>, ModmailError> {
        match self
            .chat
            .post_message(&self.thread.channel_id, content, files)
            .await
        {
            Ok(posted) => Ok(Some(posted)),
            Err(ModmailError::ChannelNotFound { channel_id }) => {
                warn!(
                    thread_id = %self.thread.id,
                    %channel_id,
                    "thread channel is gone, closing silently"
                );
                self.close_silently().await?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
