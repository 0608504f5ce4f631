// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits the relay engine depends on.
//!
//! The chat platform and the attachment subsystem are consumed as opaque
//! services behind these traits, injected into the relay at construction
//! so tests can substitute doubles.

pub mod attachments;
pub mod chat;

pub use attachments::AttachmentStore;
pub use chat::ChatClient;
