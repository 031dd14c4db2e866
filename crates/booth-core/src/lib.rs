// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for booth photo persistence.
//!
//! Holds the photo data model, the shared error type, id generation, and the
//! seam traits every storage layer is built against.

pub mod error;
pub mod ids;
pub mod traits;
pub mod types;

pub use error::BoothError;
pub use ids::{SHARE_CODE_LEN, generate_photo_id, generate_share_code, is_valid_share_code};
pub use traits::{
    Clock, ImageCompressor, PhotoCloud, RandomSource, SeededRandom, SlotStore, SystemClock,
    ThreadRandom,
};
pub use types::{
    CloudPhoto, PhotoDraft, PhotoImages, PhotoUpload, ProcessedPhoto, StorageStats, StoredPhoto,
};
