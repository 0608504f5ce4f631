// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./modmail.toml` > `~/.config/modmail/modmail.toml`
//! > `/etc/modmail/modmail.toml` with environment variable overrides via the
//! `MODMAIL_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ModmailConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/modmail/modmail.toml` (system-wide)
/// 3. `~/.config/modmail/modmail.toml` (user XDG config)
/// 4. `./modmail.toml` (local directory)
/// 5. `MODMAIL_*` environment variables
pub fn load_config() -> Result<ModmailConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ModmailConfig::default()))
        .merge(Toml::file("/etc/modmail/modmail.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("modmail/modmail.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("modmail.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<ModmailConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ModmailConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ModmailConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ModmailConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `MODMAIL_BOT_THREAD_TIMESTAMPS` must map
/// to `bot.thread_timestamps`, not `bot.thread.timestamps`.
fn env_provider() -> Env {
    Env::prefixed("MODMAIL_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: MODMAIL_BOT_USE_NICKNAMES -> "bot_use_nicknames"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("bot_", "bot.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}
