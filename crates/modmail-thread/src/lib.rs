// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Thread relay and logging engine for the modmail system.
//!
//! A thread is one conversation between an end user and the staff team,
//! carried over two channels: the user's private channel and a dedicated
//! staff-facing channel. [`ThreadRelay`] reformats and forwards messages
//! between the two sides, applies the attachment size policy, appends every
//! exchange to the persistent transcript, and drives the open -> closed
//! lifecycle.

pub mod format;
pub mod relay;

pub use relay::ThreadRelay;
