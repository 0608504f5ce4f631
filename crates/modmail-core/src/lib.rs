// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the modmail relay engine.
//!
//! This crate provides the error type, domain types, and the collaborator
//! traits (chat platform client, attachment subsystem) consumed by the relay
//! and storage crates.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ModmailError;
pub use traits::{AttachmentStore, ChatClient};
pub use types::{
    Attachment, FileUpload, MessageType, ModeratorIdentity, NewThreadMessage, PostedMessage,
    Thread, ThreadMessage, ThreadStatus, UserMessage,
};
