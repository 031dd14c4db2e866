// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response shapes of the photo service, and their normalization.

use booth_core::CloudPhoto;
use serde::Deserialize;

/// A JSON scalar that may arrive as a number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Text(s) => s,
        }
    }
}

/// A photo record as the service returns it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WirePhoto {
    id: Scalar,
    original_image_url: String,
    processed_image_url: String,
    #[serde(default)]
    background_id: Option<String>,
    #[serde(default)]
    background_name: Option<String>,
    share_code: String,
    #[serde(default)]
    created_at: Option<Scalar>,
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    user_slug: Option<String>,
    #[serde(default)]
    event_slug: Option<String>,
}

impl WirePhoto {
    pub(crate) fn into_cloud_photo(self, now_millis: i64) -> CloudPhoto {
        CloudPhoto {
            id: self.id.into_text(),
            original_image_url: self.original_image_url,
            processed_image_url: self.processed_image_url,
            background_id: self.background_id.unwrap_or_default(),
            background_name: self.background_name.unwrap_or_default(),
            share_code: self.share_code,
            created_at: normalize_created_at(self.created_at.as_ref(), now_millis),
            prompt: self.prompt.unwrap_or_default(),
            user_slug: self.user_slug,
            event_slug: self.event_slug,
        }
    }
}

/// Convert the service's timestamp into epoch milliseconds.
///
/// Accepts integers, floats, numeric strings and RFC 3339 timestamps.
/// Anything else yields `now_millis`.
pub(crate) fn normalize_created_at(value: Option<&Scalar>, now_millis: i64) -> i64 {
    match value {
        Some(Scalar::Int(n)) => *n,
        Some(Scalar::Float(f)) if f.is_finite() => *f as i64,
        Some(Scalar::Text(s)) => parse_timestamp(s.trim()).unwrap_or(now_millis),
        _ => now_millis,
    }
}

fn parse_timestamp(s: &str) -> Option<i64> {
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    if let Ok(f) = s.parse::<f64>() {
        return f.is_finite().then_some(f as i64);
    }
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp_millis())
}

/// Best human-readable message from an error response body.
///
/// Prefers a JSON `detail`, then `message`, then `error` string field, and
/// falls back to `"{status}: {body}"`.
pub(crate) fn error_detail(status: u16, body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message", "error"] {
            if let Some(serde_json::Value::String(text)) = map.get(key) {
                if !text.is_empty() {
                    return text.clone();
                }
            }
        }
    }
    let body = body.trim();
    if body.is_empty() {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("unknown status");
        format!("{status}: {reason}")
    } else {
        format!("{status}: {body}")
    }
}
