// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Size-bounded local photo store.
//!
//! The whole collection lives in a single slot as a JSON array, newest
//! first. Every save reads the array, prepends the new entry and writes the
//! array back, walking the [`DegradationLadder`] when the write is refused.
//! There is no compare-and-swap: concurrent writers race and the last write
//! wins.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use booth_config::model::{DEFAULT_QUOTA_BYTES, StorageConfig};
use booth_core::{
    BoothError, Clock, ImageCompressor, PhotoDraft, PhotoImages, ProcessedPhoto, RandomSource,
    SlotStore, StorageStats, SystemClock, ThreadRandom, generate_photo_id, generate_share_code,
};

use crate::ladder::{DegradationLadder, SaveReport, TierAttempt, TierOutcome};

/// Slot key used when none is configured.
pub const DEFAULT_SLOT_KEY: &str = "photobooth_photos";

/// Local photo persistence over a [`SlotStore`].
pub struct LocalPhotoStore {
    slots: Arc<dyn SlotStore>,
    compressor: Arc<dyn ImageCompressor>,
    random: Arc<dyn RandomSource>,
    clock: Arc<dyn Clock>,
    slot_key: String,
    ladder: DegradationLadder,
    storage_limit: usize,
}

impl LocalPhotoStore {
    pub fn new(slots: Arc<dyn SlotStore>, compressor: Arc<dyn ImageCompressor>) -> Self {
        Self {
            slots,
            compressor,
            random: Arc::new(ThreadRandom),
            clock: Arc::new(SystemClock),
            slot_key: DEFAULT_SLOT_KEY.to_string(),
            ladder: DegradationLadder::standard(),
            storage_limit: DEFAULT_QUOTA_BYTES,
        }
    }

    /// Build a store using the slot key, ladder and capacity from `[storage]`.
    pub fn from_config(
        config: &StorageConfig,
        slots: Arc<dyn SlotStore>,
        compressor: Arc<dyn ImageCompressor>,
    ) -> Self {
        Self::new(slots, compressor)
            .with_slot_key(config.slot_key.clone())
            .with_ladder(DegradationLadder::from_config(config))
            .with_storage_limit(config.quota_bytes)
    }

    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_slot_key(mut self, key: impl Into<String>) -> Self {
        self.slot_key = key.into();
        self
    }

    pub fn with_ladder(mut self, ladder: DegradationLadder) -> Self {
        self.ladder = ladder;
        self
    }

    /// Capacity reported by [`LocalPhotoStore::stats`].
    pub fn with_storage_limit(mut self, bytes: usize) -> Self {
        self.storage_limit = bytes;
        self
    }

    pub fn ladder(&self) -> &DegradationLadder {
        &self.ladder
    }

    /// Assign an identity to `draft` and persist it.
    pub async fn save(&self, draft: PhotoDraft) -> Result<ProcessedPhoto, BoothError> {
        self.save_with_report(draft).await.map(|report| report.photo)
    }

    /// Like [`LocalPhotoStore::save`], also returning the tiers that were tried.
    ///
    /// Compression failures and refused writes move on to the next tier.
    /// When every tier fails the photo is not persisted and
    /// [`BoothError::StorageExhausted`] carries one reason per tier. A failed
    /// read of the slot aborts the save before anything is written.
    pub async fn save_with_report(&self, draft: PhotoDraft) -> Result<SaveReport, BoothError> {
        let now = self.clock.now_millis();
        let mut photo = ProcessedPhoto {
            id: generate_photo_id(self.random.as_ref(), now),
            images: draft.images,
            background_id: draft.background_id,
            background_name: draft.background_name,
            share_code: generate_share_code(self.random.as_ref()),
            created_at: now,
            prompt: draft.prompt,
        };

        let existing = self.load().await?;
        let mut attempts = Vec::with_capacity(self.ladder.tiers().len());
        let mut reasons = Vec::new();

        for (index, tier) in self.ladder.tiers().iter().enumerate() {
            if let Some(quality) = tier.quality {
                match self.compress_images(&photo.images, quality) {
                    Ok(images) => photo.images = images,
                    Err(e) => {
                        warn!(tier = index, quality, error = %e, "compression failed, skipping tier");
                        reasons.push(format!("tier {index}: {e}"));
                        attempts.push(TierAttempt {
                            tier: *tier,
                            outcome: TierOutcome::CompressionFailed(e.to_string()),
                        });
                        continue;
                    }
                }
            }

            let list: Vec<&ProcessedPhoto> = std::iter::once(&photo)
                .chain(existing.iter())
                .take(tier.keep)
                .collect();
            let payload = serde_json::to_string(&list).map_err(BoothError::storage)?;

            match self.slots.set(&self.slot_key, &payload).await {
                Ok(()) => {
                    attempts.push(TierAttempt {
                        tier: *tier,
                        outcome: TierOutcome::Stored,
                    });
                    info!(
                        id = %photo.id,
                        share_code = %photo.share_code,
                        tier = index,
                        entries = list.len(),
                        bytes = payload.len(),
                        "photo saved locally"
                    );
                    return Ok(SaveReport { photo, attempts });
                }
                Err(e) => {
                    warn!(tier = index, keep = tier.keep, error = %e, "local write refused");
                    reasons.push(format!("tier {index}: {e}"));
                    attempts.push(TierAttempt {
                        tier: *tier,
                        outcome: TierOutcome::WriteFailed(e.to_string()),
                    });
                }
            }
        }

        error!(id = %photo.id, tiers = attempts.len(), "local storage exhausted");
        Err(BoothError::StorageExhausted { reasons })
    }

    /// All stored photos, newest first.
    ///
    /// A missing, unreadable or corrupt slot reads as an empty collection.
    pub async fn get_all(&self) -> Vec<ProcessedPhoto> {
        match self.load().await {
            Ok(photos) => photos,
            Err(e) => {
                warn!(key = %self.slot_key, error = %e, "failed to read photo slot");
                Vec::new()
            }
        }
    }

    pub async fn get_by_id(&self, id: &str) -> Option<ProcessedPhoto> {
        self.get_all().await.into_iter().find(|p| p.id == id)
    }

    pub async fn get_by_share_code(&self, share_code: &str) -> Option<ProcessedPhoto> {
        self.get_all()
            .await
            .into_iter()
            .find(|p| p.share_code == share_code)
    }

    /// Remove the photo with `id`. Returns whether anything was removed.
    pub async fn delete(&self, id: &str) -> Result<bool, BoothError> {
        let mut photos = self.load().await?;
        let before = photos.len();
        photos.retain(|p| p.id != id);
        if photos.len() == before {
            debug!(id, "no local photo to delete");
            return Ok(false);
        }
        let payload = serde_json::to_string(&photos).map_err(BoothError::storage)?;
        self.slots.set(&self.slot_key, &payload).await?;
        info!(id, remaining = photos.len(), "local photo deleted");
        Ok(true)
    }

    pub async fn clear(&self) -> Result<(), BoothError> {
        self.slots.remove(&self.slot_key).await?;
        info!(key = %self.slot_key, "local photos cleared");
        Ok(())
    }

    pub async fn stats(&self) -> StorageStats {
        let raw = match self.slots.get(&self.slot_key).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %self.slot_key, error = %e, "failed to read photo slot");
                None
            }
        };
        let storage_used = raw.as_ref().map_or(0, String::len);
        let photo_count = raw.map_or(0, |r| self.parse(&r).len());
        let percent_used = if self.storage_limit == 0 {
            0.0
        } else {
            storage_used as f64 / self.storage_limit as f64 * 100.0
        };
        StorageStats {
            photo_count,
            storage_used,
            storage_limit: self.storage_limit,
            percent_used,
        }
    }

    /// Read the slot, propagating medium errors. Corrupt contents read as empty.
    async fn load(&self) -> Result<Vec<ProcessedPhoto>, BoothError> {
        let raw = self.slots.get(&self.slot_key).await?;
        Ok(raw.map(|r| self.parse(&r)).unwrap_or_default())
    }

    fn parse(&self, raw: &str) -> Vec<ProcessedPhoto> {
        match serde_json::from_str(raw) {
            Ok(photos) => photos,
            Err(e) => {
                warn!(key = %self.slot_key, error = %e, "photo slot is corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    fn compress_images(
        &self,
        images: &PhotoImages,
        quality: f32,
    ) -> Result<PhotoImages, BoothError> {
        match images {
            PhotoImages::Inline {
                original_base64,
                processed_base64,
            } => Ok(PhotoImages::Inline {
                original_base64: self.compressor.compress(original_base64, quality)?,
                processed_base64: self.compressor.compress(processed_base64, quality)?,
            }),
            // URLs have nothing to re-encode.
            PhotoImages::Remote { .. } => Ok(images.clone()),
        }
    }
}
