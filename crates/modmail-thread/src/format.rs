// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering policy for relayed messages.
//!
//! Pure functions only; the relay decides what to send, this module decides
//! what it looks like.

use chrono::{DateTime, Utc};
use modmail_core::ModeratorIdentity;

/// Displayed in place of an empty body when the message carries embeds.
pub const EMBED_PLACEHOLDER: &str = "<message contains embeds>";

/// Inbound attachments at or below this size may be relayed as real files.
pub const SMALL_ATTACHMENT_LIMIT: u64 = 2 * 1024 * 1024;

/// Fallback display name for anonymous moderators without a role.
const GENERIC_MODERATOR: &str = "Moderator";

/// Which way a relayed copy is traveling; selects the timestamp marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Staff to user.
    Outbound,
    /// User to staff.
    Inbound,
}

impl Direction {
    fn marker(self) -> char {
        match self {
            Direction::Outbound => '»',
            Direction::Inbound => '«',
        }
    }
}

/// The two renderings of a moderator's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeratorNames {
    /// Name shown on the user-facing and staff-facing copies.
    pub display: String,
    /// Name stored on the transcript entry. For anonymous replies this keeps
    /// the real username (audit trail); anonymity only hides identity from
    /// the user-facing copy.
    pub log: String,
}

/// Resolve the displayed and logged names for a replying moderator.
pub fn moderator_names(
    moderator: &ModeratorIdentity,
    use_nicknames: bool,
    anonymous: bool,
) -> ModeratorNames {
    let name = if use_nicknames {
        moderator.nickname.as_deref().unwrap_or(&moderator.username)
    } else {
        &moderator.username
    };

    if anonymous {
        let display = moderator
            .role_name
            .clone()
            .unwrap_or_else(|| GENERIC_MODERATOR.to_string());
        let log = match &moderator.role_name {
            Some(role) => format!("(Anonymous) ({role}) {name}"),
            None => format!("(Anonymous) {name}"),
        };
        ModeratorNames { display, log }
    } else {
        let display = match &moderator.role_name {
            Some(role) => format!("({role}) {name}"),
            None => name.to_string(),
        };
        let log = display.clone();
        ModeratorNames { display, log }
    }
}

/// `**<name>:** <text>`, the shared copy template for both sides.
pub fn message_copy(name: &str, text: &str) -> String {
    format!("**{name}:** {text}")
}

/// Prefix a copy with its `[HH:MM]` marker and direction arrow.
pub fn timestamped(copy: &str, time: DateTime<Utc>, direction: Direction) -> String {
    format!("[{}] {} {}", time.format("%H:%M"), direction.marker(), copy)
}

/// The transcript segment appended for one attachment.
pub fn attachment_link(url: &str) -> String {
    format!("\n\n**Attachment:** {url}")
}

/// Current wall clock as the ISO-8601 UTC string stored in transcript rows.
pub fn now_iso() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
