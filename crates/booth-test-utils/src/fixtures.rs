// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image payloads and drafts for tests.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use booth_core::{PhotoDraft, PhotoImages};
use image::{ImageFormat, Rgb, RgbImage};

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ])
    })
}

/// A real PNG data URL with a smooth gradient.
pub fn png_data_url(width: u32, height: u32) -> String {
    encode_png(&gradient(width, height))
}

/// The raw PNG file behind [`png_data_url`].
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    png_file(&gradient(width, height))
}

/// A real PNG data URL filled with deterministic noise, which compresses poorly.
pub fn noisy_png_data_url(width: u32, height: u32) -> String {
    let mut state: u32 = 0x2545_f491;
    let img = RgbImage::from_fn(width, height, |_, _| {
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state & 0xff) as u8
        };
        Rgb([next(), next(), next()])
    });
    encode_png(&img)
}

fn png_file(img: &RgbImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .expect("encoding an in-memory PNG cannot fail");
    buf.into_inner()
}

fn encode_png(img: &RgbImage) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png_file(img)))
}

/// An inline draft with small placeholder payloads tagged by `tag`.
pub fn inline_draft(tag: &str) -> PhotoDraft {
    PhotoDraft::new(PhotoImages::inline(
        format!("data:image/png;base64,ORIG{tag}"),
        format!("data:image/png;base64,PROC{tag}"),
    ))
    .with_background(format!("bg-{tag}"), format!("Background {tag}"))
    .with_prompt(format!("prompt {tag}"))
}

/// The draft used throughout the scenario tests.
pub fn sunset_draft() -> PhotoDraft {
    PhotoDraft::new(PhotoImages::inline(
        "data:image/png;base64,AAA",
        "data:image/png;base64,BBB",
    ))
    .with_background("bg1", "Sunset")
    .with_prompt("smile")
}
