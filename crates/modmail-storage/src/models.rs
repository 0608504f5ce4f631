// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types are defined in `modmail-core::types` for use across
//! crate boundaries. This module re-exports them for convenience within the
//! storage crate.

pub use modmail_core::types::{MessageType, NewThreadMessage, Thread, ThreadMessage, ThreadStatus};
