// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image re-encoding for booth photo persistence.
//!
//! [`JpegCompressor`] decodes a base64 data URL, flattens it onto an opaque
//! RGB surface at native resolution, and re-encodes it as JPEG.

pub mod data_url;

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use booth_core::{BoothError, ImageCompressor};
use image::codecs::jpeg::JpegEncoder;
use tracing::debug;

pub use data_url::{DataUrl, encode_data_url, parse_data_url};

/// Re-encodes images as JPEG at a caller-chosen quality.
#[derive(Debug, Default, Clone, Copy)]
pub struct JpegCompressor;

impl JpegCompressor {
    pub fn new() -> Self {
        Self
    }
}

impl ImageCompressor for JpegCompressor {
    fn compress(&self, data_url: &str, quality: f32) -> Result<String, BoothError> {
        let jpeg_quality = jpeg_quality(quality)?;
        let parsed = parse_data_url(data_url)?;

        let bytes = STANDARD
            .decode(parsed.payload.trim())
            .map_err(|e| BoothError::Decode(format!("invalid base64 payload: {e}")))?;
        let img = image::load_from_memory(&bytes)
            .map_err(|e| BoothError::Decode(format!("unreadable image: {e}")))?;

        // JPEG has no alpha channel.
        let rgb = img.to_rgb8();
        let mut out = Cursor::new(Vec::new());
        JpegEncoder::new_with_quality(&mut out, jpeg_quality)
            .encode_image(&rgb)
            .map_err(|e| BoothError::Encode(e.to_string()))?;
        let out = out.into_inner();

        debug!(
            width = rgb.width(),
            height = rgb.height(),
            quality = jpeg_quality,
            before = bytes.len(),
            after = out.len(),
            "re-encoded image as JPEG"
        );

        Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(&out)))
    }
}

/// Map a `0.0..=1.0` quality onto the encoder's `1..=100` scale.
fn jpeg_quality(quality: f32) -> Result<u8, BoothError> {
    if !(0.0..=1.0).contains(&quality) {
        return Err(BoothError::Encode(format!(
            "quality must be within 0.0..=1.0, got {quality}"
        )));
    }
    Ok((quality * 100.0).round().clamp(1.0, 100.0) as u8)
}
