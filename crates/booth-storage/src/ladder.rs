// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Degradation ladder applied when a local save cannot be persisted.
//!
//! Each tier names how many entries to keep and, optionally, the JPEG quality
//! the new entry's images are re-encoded at before the write is retried.
//! Compression is cumulative: a tier compresses the new entry as the previous
//! tier left it.

use booth_config::model::StorageConfig;
use booth_core::ProcessedPhoto;

/// One rung of the ladder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaveTier {
    /// Maximum number of entries retained, new entry included.
    pub keep: usize,
    /// JPEG quality applied to the new entry, or `None` to store it as is.
    pub quality: Option<f32>,
}

impl SaveTier {
    pub const fn new(keep: usize, quality: Option<f32>) -> Self {
        Self { keep, quality }
    }
}

/// Ordered tiers tried by [`crate::LocalPhotoStore::save`].
#[derive(Debug, Clone, PartialEq)]
pub struct DegradationLadder {
    tiers: Vec<SaveTier>,
}

impl DegradationLadder {
    pub fn new(tiers: Vec<SaveTier>) -> Self {
        Self { tiers }
    }

    /// `[{10, none}, {10, 0.8}, {5, 0.6}]`.
    pub fn standard() -> Self {
        Self::new(vec![
            SaveTier::new(10, None),
            SaveTier::new(10, Some(0.8)),
            SaveTier::new(5, Some(0.6)),
        ])
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(vec![
            SaveTier::new(config.max_photos, None),
            SaveTier::new(config.max_photos, Some(config.first_retry_quality)),
            SaveTier::new(config.reduced_photos, Some(config.second_retry_quality)),
        ])
    }

    pub fn tiers(&self) -> &[SaveTier] {
        &self.tiers
    }

    /// Retention cap of the first tier, used when nothing has gone wrong.
    pub fn max_entries(&self) -> usize {
        self.tiers.first().map(|t| t.keep).unwrap_or(0)
    }
}

impl Default for DegradationLadder {
    fn default() -> Self {
        Self::standard()
    }
}

/// What happened at a single tier.
#[derive(Debug, Clone, PartialEq)]
pub enum TierOutcome {
    Stored,
    CompressionFailed(String),
    WriteFailed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TierAttempt {
    pub tier: SaveTier,
    pub outcome: TierOutcome,
}

/// Result of a successful save along with every tier that was tried.
#[derive(Debug, Clone)]
pub struct SaveReport {
    pub photo: ProcessedPhoto,
    pub attempts: Vec<TierAttempt>,
}

impl SaveReport {
    /// Zero-based index of the tier that stored the photo.
    pub fn stored_at(&self) -> Option<usize> {
        self.attempts
            .iter()
            .position(|a| a.outcome == TierOutcome::Stored)
    }

    /// Number of successful compression passes applied to the stored entry.
    pub fn compression_passes(&self) -> usize {
        self.attempts
            .iter()
            .filter(|a| a.tier.quality.is_some())
            .filter(|a| !matches!(a.outcome, TierOutcome::CompressionFailed(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_ladder_mirrors_settings() {
        let config = StorageConfig {
            max_photos: 8,
            reduced_photos: 3,
            first_retry_quality: 0.7,
            second_retry_quality: 0.5,
            ..StorageConfig::default()
        };
        let ladder = DegradationLadder::from_config(&config);
        assert_eq!(
            ladder.tiers(),
            &[
                SaveTier::new(8, None),
                SaveTier::new(8, Some(0.7)),
                SaveTier::new(3, Some(0.5)),
            ]
        );
        assert_eq!(ladder.max_entries(), 8);
    }

    #[test]
    fn default_config_matches_standard() {
        assert_eq!(
            DegradationLadder::from_config(&StorageConfig::default()),
            DegradationLadder::standard()
        );
    }

    #[test]
    fn empty_ladder_keeps_nothing() {
        assert_eq!(DegradationLadder::new(Vec::new()).max_entries(), 0);
    }
}
