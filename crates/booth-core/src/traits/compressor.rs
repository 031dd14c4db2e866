// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image re-encoding used to shrink payloads under storage pressure.

use crate::error::BoothError;

/// Re-encodes an image data URL at a lower quality.
pub trait ImageCompressor: Send + Sync + 'static {
    /// Compresses `data_url` at `quality` in `0.0..=1.0`.
    ///
    /// Fails with [`BoothError::Decode`] when the payload is not an image.
    fn compress(&self, data_url: &str, quality: f32) -> Result<String, BoothError>;
}
