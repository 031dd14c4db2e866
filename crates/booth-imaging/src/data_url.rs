// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Minimal `data:` URL parsing for base64 image payloads.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use booth_core::BoothError;

/// A borrowed view of a base64 data URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUrl<'a> {
    /// Declared media type, `None` for a bare base64 string.
    pub mime: Option<&'a str>,
    pub payload: &'a str,
}

/// Split `data:<mime>;base64,<payload>`. A string without the `data:` prefix
/// is taken as a bare base64 payload.
pub fn parse_data_url(input: &str) -> Result<DataUrl<'_>, BoothError> {
    let Some(rest) = input.strip_prefix("data:") else {
        return Ok(DataUrl {
            mime: None,
            payload: input,
        });
    };

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| BoothError::Decode("data URL has no payload separator".into()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| BoothError::Decode(format!("data URL is not base64: `{header}`")))?;

    Ok(DataUrl {
        mime: (!mime.is_empty()).then_some(mime),
        payload,
    })
}

/// Wrap raw image bytes in a base64 data URL, sniffing the media type.
pub fn encode_data_url(bytes: &[u8]) -> Result<String, BoothError> {
    let format = image::guess_format(bytes)
        .map_err(|e| BoothError::Decode(format!("unrecognized image format: {e}")))?;
    Ok(format!(
        "data:{};base64,{}",
        format.to_mime_type(),
        STANDARD.encode(bytes)
    ))
}
