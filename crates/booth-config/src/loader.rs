// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./booth.toml` > `~/.config/booth/booth.toml` > `/etc/booth/booth.toml`
//! with environment variable overrides via `BOOTH_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::BoothConfig;

/// Top-level sections an environment key may address.
const SECTIONS: &[&str] = &["api", "share", "storage", "log"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/booth/booth.toml`
/// 3. `~/.config/booth/booth.toml`
/// 4. `./booth.toml`
/// 5. `BOOTH_*` environment variables
pub fn load_config() -> Result<BoothConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<BoothConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BoothConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<BoothConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BoothConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(BoothConfig::default()))
        .merge(Toml::file("/etc/booth/booth.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("booth/booth.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("booth.toml"))
        .merge(env_provider())
}

/// Environment provider mapping `BOOTH_API_BASE_URL` to `api.base_url`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `BOOTH_STORAGE_MAX_PHOTOS` maps to `storage.max_photos`.
fn env_provider() -> Env {
    Env::prefixed("BOOTH_").map(|key| env_key_to_path(key.as_str()).into())
}

/// Map a lowercased, prefix-stripped env key onto a dotted config path.
pub fn env_key_to_path(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|r| r.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
