// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common domain types shared across the modmail workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Lifecycle status of a thread.
///
/// Threads are soft-closed: a thread is never deleted, only transitioned
/// from `Open` to `Closed`. `Closed` is terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ThreadStatus {
    Open,
    Closed,
}

/// Type tag of a transcript entry. Closed enumeration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// Operational notice, not from a person.
    System,
    /// Staff reply forwarded to the user.
    ToUser,
    /// User message forwarded to the staff channel.
    FromUser,
    /// Ordinary staff-channel chatter captured for context, not a reply.
    Chat,
}

/// One conversation between exactly one end user and the staff team.
///
/// Immutable value; [`Thread::into_closed`] produces the post-close state.
/// `channel_id` is only meaningful while `status` is [`ThreadStatus::Open`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
    pub status: ThreadStatus,
    pub user_id: String,
    pub user_name: String,
    /// The dedicated staff-facing channel.
    pub channel_id: String,
    /// ISO-8601 UTC timestamp.
    pub created_at: String,
}

impl Thread {
    /// The explicit `Open -> Closed` transition.
    pub fn into_closed(self) -> Thread {
        Thread {
            status: ThreadStatus::Closed,
            ..self
        }
    }
}

/// One logged line of a thread's transcript.
///
/// Insertion order defines display order; reads sort by
/// `(created_at ASC, id ASC)` so identical timestamps tie-break on the
/// autoincrement id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadMessage {
    pub id: i64,
    pub thread_id: String,
    pub message_type: MessageType,
    /// Author user id; None for system entries.
    pub user_id: Option<String>,
    /// Author display name as logged (may encode role and anonymity).
    pub user_name: String,
    /// Raw content with attachment link segments appended.
    pub body: String,
    pub is_anonymous: bool,
    /// The originating platform message id, used to correlate later
    /// edits and deletes.
    pub dm_message_id: Option<String>,
    /// ISO-8601 UTC timestamp.
    pub created_at: String,
}

/// Insert payload for a transcript entry; the row id is assigned by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewThreadMessage {
    pub thread_id: String,
    pub message_type: MessageType,
    pub user_id: Option<String>,
    pub user_name: String,
    pub body: String,
    pub is_anonymous: bool,
    pub dm_message_id: Option<String>,
    pub created_at: String,
}

/// An attachment carried by a platform message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub id: String,
    pub filename: String,
    /// Size in bytes, used by the inbound small-attachment relay policy.
    pub size: u64,
    /// Source URL on the chat platform.
    pub url: String,
}

/// A deliverable file object attached to an outgoing platform message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// A message posted to the chat platform, as acknowledged by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    pub id: String,
    pub channel_id: String,
}

/// An incoming message from the end user's private channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessage {
    /// Platform message id; becomes the correlation id of the logged entry.
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub discriminator: String,
    pub content: String,
    pub attachments: Vec<Attachment>,
    /// True when the message carries rich embedded content.
    pub has_embeds: bool,
    /// Origination time of the message on the platform.
    pub timestamp: DateTime<Utc>,
}

impl UserMessage {
    /// `username#discriminator`, the name logged for user-authored entries.
    pub fn tag(&self) -> String {
        format!("{}#{}", self.username, self.discriminator)
    }
}

/// The staff member issuing an outbound reply, with identity already
/// resolved by the caller (member/role lookup is outside this core).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeratorIdentity {
    pub id: String,
    pub username: String,
    pub nickname: Option<String>,
    /// Primary role name, if the moderator holds a distinguishing role.
    pub role_name: Option<String>,
}
