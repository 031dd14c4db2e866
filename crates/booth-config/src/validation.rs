// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::BoothConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first.
pub fn validate_config(config: &BoothConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    check_url(&mut errors, "api.base_url", &config.api.base_url);
    check_url(&mut errors, "share.base_url", &config.share.base_url);

    if config.api.timeout_secs == 0 {
        errors.push(invalid("api.timeout_secs must be at least 1"));
    }

    let storage = &config.storage;
    if storage.database_path.trim().is_empty() {
        errors.push(invalid("storage.database_path must not be empty"));
    }
    if storage.slot_key.trim().is_empty() {
        errors.push(invalid("storage.slot_key must not be empty"));
    }
    if storage.max_photos == 0 {
        errors.push(invalid("storage.max_photos must be at least 1"));
    }
    if storage.reduced_photos == 0 || storage.reduced_photos > storage.max_photos {
        errors.push(invalid(&format!(
            "storage.reduced_photos must be between 1 and storage.max_photos ({}), got {}",
            storage.max_photos, storage.reduced_photos
        )));
    }
    if storage.quota_bytes == 0 {
        errors.push(invalid("storage.quota_bytes must be positive"));
    }
    check_quality(&mut errors, "storage.first_retry_quality", storage.first_retry_quality);
    check_quality(&mut errors, "storage.second_retry_quality", storage.second_retry_quality);

    if !matches!(
        config.log.level.as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    ) {
        errors.push(invalid(&format!(
            "log.level must be one of trace, debug, info, warn, error, got `{}`",
            config.log.level
        )));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Validation {
        message: message.to_string(),
    }
}

fn check_url(errors: &mut Vec<ConfigError>, key: &str, value: &str) {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        Ok(parsed) => errors.push(invalid(&format!(
            "{key} must use http or https, got scheme `{}`",
            parsed.scheme()
        ))),
        Err(e) => errors.push(invalid(&format!("{key} `{value}` is not a valid URL: {e}"))),
    }
}

fn check_quality(errors: &mut Vec<ConfigError>, key: &str, quality: f32) {
    if !(quality > 0.0 && quality <= 1.0) {
        errors.push(invalid(&format!(
            "{key} must be in (0.0, 1.0], got {quality}"
        )));
    }
}
