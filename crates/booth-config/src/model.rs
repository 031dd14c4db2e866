// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Nominal capacity of the local slot store, 5 MiB.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Top-level booth configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BoothConfig {
    /// Remote photo API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Public share link settings.
    #[serde(default)]
    pub share: ShareConfig,

    /// Local slot store and degradation ladder settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Remote photo API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL of the photo API. Upgraded to HTTPS for non-local hosts.
    #[serde(default = "default_api_base_url")]
    pub base_url: String,

    /// Bearer token sent with every request, if any.
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            auth_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

/// Public share link configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ShareConfig {
    /// Origin that share links are built on.
    #[serde(default = "default_share_base_url")]
    pub base_url: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: default_share_base_url(),
        }
    }
}

fn default_share_base_url() -> String {
    "https://pictureme.now".to_string()
}

/// Local slot store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite file holding the slots.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Slot key the photo list is stored under.
    #[serde(default = "default_slot_key")]
    pub slot_key: String,

    /// Photos retained by a normal write.
    #[serde(default = "default_max_photos")]
    pub max_photos: usize,

    /// Photos retained by the last-resort write.
    #[serde(default = "default_reduced_photos")]
    pub reduced_photos: usize,

    /// Byte quota of the slot store.
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: usize,

    /// JPEG quality of the first compressed retry.
    #[serde(default = "default_first_retry_quality")]
    pub first_retry_quality: f32,

    /// JPEG quality of the last-resort retry.
    #[serde(default = "default_second_retry_quality")]
    pub second_retry_quality: f32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            slot_key: default_slot_key(),
            max_photos: default_max_photos(),
            reduced_photos: default_reduced_photos(),
            quota_bytes: default_quota_bytes(),
            first_retry_quality: default_first_retry_quality(),
            second_retry_quality: default_second_retry_quality(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|d| d.join("booth").join("booth.db").display().to_string())
        .unwrap_or_else(|| "booth.db".to_string())
}

fn default_slot_key() -> String {
    "photobooth_photos".to_string()
}

fn default_max_photos() -> usize {
    10
}

fn default_reduced_photos() -> usize {
    5
}

fn default_quota_bytes() -> usize {
    DEFAULT_QUOTA_BYTES
}

fn default_first_retry_quality() -> f32 {
    0.8
}

fn default_second_retry_quality() -> f32 {
    0.6
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
