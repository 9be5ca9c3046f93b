// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./airlift.toml` > `~/.config/airlift/airlift.toml` > `/etc/airlift/airlift.toml`
//! with environment variable overrides via `AIRLIFT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::AirliftConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/airlift/airlift.toml` (system-wide)
/// 3. `~/.config/airlift/airlift.toml` (user XDG config)
/// 4. `./airlift.toml` (local directory)
/// 5. `AIRLIFT_*` environment variables
pub fn load_config() -> Result<AirliftConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AirliftConfig::default()))
        .merge(Toml::file("/etc/airlift/airlift.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("airlift/airlift.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("airlift.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no file hierarchy, no env).
///
/// Used for testing and library embedding.
pub fn load_config_from_str(toml_content: &str) -> Result<AirliftConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AirliftConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
///
/// Used for the `--config` flag; replaces the file hierarchy entirely.
pub fn load_config_from_path(path: &Path) -> Result<AirliftConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AirliftConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// CRITICAL: Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `AIRLIFT_STORE_ACCESS_KEY_ID`
/// must map to `store.access_key_id`, not `store.access.key.id`.
fn env_provider() -> Env {
    Env::prefixed("AIRLIFT_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: AIRLIFT_STORE_BUCKET -> "store_bucket". Only the leading
        // section name becomes a dot; AIRLIFT_STORE_DEPLOY_INFO must map to
        // store.deploy_info, not store.deploy.info.
        let key_str = key.as_str();
        let mapped = if let Some(rest) = key_str.strip_prefix("store_") {
            format!("store.{rest}")
        } else if let Some(rest) = key_str.strip_prefix("archive_") {
            format!("archive.{rest}")
        } else if let Some(rest) = key_str.strip_prefix("deploy_") {
            format!("deploy.{rest}")
        } else {
            key_str.to_string()
        };
        mapped.into()
    })
}
