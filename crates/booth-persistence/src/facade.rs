// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cloud-preferred, local-fallback photo persistence.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use booth_cloud::{CloudPhotoClient, enforce_https};
use booth_config::BoothConfig;
use booth_core::{BoothError, PhotoCloud, PhotoDraft, StorageStats, StoredPhoto};
use booth_imaging::JpegCompressor;
use booth_storage::{LocalPhotoStore, SqliteSlotStore};

/// Origin share links are built on when none is configured.
pub const DEFAULT_SHARE_BASE: &str = "https://pictureme.now";

/// One save/read API over the photo service and the local store.
///
/// Writes go to the cloud first and fall back to the local store on any
/// cloud failure. Reads try the cloud and fall back to the local store on a
/// miss or a failure. Cloud failures are logged, never returned.
pub struct PhotoPersistence {
    cloud: Arc<dyn PhotoCloud>,
    local: LocalPhotoStore,
    share_base: String,
}

impl PhotoPersistence {
    pub fn new(cloud: Arc<dyn PhotoCloud>, local: LocalPhotoStore) -> Self {
        Self {
            cloud,
            local,
            share_base: DEFAULT_SHARE_BASE.to_string(),
        }
    }

    /// Wire up the SQLite slot store, JPEG compressor and HTTP client
    /// described by `config`.
    pub async fn from_config(config: &BoothConfig) -> Result<Self, BoothError> {
        let slots =
            SqliteSlotStore::open(&config.storage.database_path, config.storage.quota_bytes)
                .await?;
        let local = LocalPhotoStore::from_config(
            &config.storage,
            Arc::new(slots),
            Arc::new(JpegCompressor::new()),
        );
        let cloud = CloudPhotoClient::new(&config.api)?;
        Self::new(Arc::new(cloud), local).with_share_base(&config.share.base_url)
    }

    /// Set the origin used by [`PhotoPersistence::share_url`].
    ///
    /// Non-local `http` origins are upgraded to `https`; trailing slashes
    /// are dropped.
    pub fn with_share_base(mut self, base: &str) -> Result<Self, BoothError> {
        let url = enforce_https(base)?;
        self.share_base = url.as_str().trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn local(&self) -> &LocalPhotoStore {
        &self.local
    }

    /// Persist a new photo.
    ///
    /// Drafts carrying inline images are uploaded first; the cloud record is
    /// returned as is and nothing is written locally. Drafts that already
    /// reference remote images skip the upload.
    pub async fn save(&self, draft: PhotoDraft) -> Result<StoredPhoto, BoothError> {
        match draft.to_upload() {
            Some(upload) => match self.cloud.upload(&upload).await {
                Ok(photo) => {
                    info!(id = %photo.id, share_code = %photo.share_code, "photo saved to cloud");
                    return Ok(StoredPhoto::Cloud(photo));
                }
                Err(e) => {
                    warn!(error = %e, "cloud upload failed, falling back to local storage");
                }
            },
            None => debug!("draft has no inline images, skipping cloud upload"),
        }

        let photo = self.local.save(draft).await?;
        Ok(StoredPhoto::Local(photo))
    }

    /// Find a photo by share code, cloud first.
    pub async fn get_by_share_code(&self, share_code: &str) -> Option<StoredPhoto> {
        match self.cloud.fetch_by_share_code(share_code).await {
            Ok(Some(photo)) => return Some(StoredPhoto::Cloud(photo)),
            Ok(None) => debug!(share_code, "not found in cloud, checking local storage"),
            Err(e) => warn!(share_code, error = %e, "cloud lookup failed, checking local storage"),
        }
        self.local
            .get_by_share_code(share_code)
            .await
            .map(StoredPhoto::Local)
    }

    /// Cloud photos merged with local ones, newest first.
    ///
    /// Falls back to the local list alone when the cloud is unavailable.
    pub async fn list_recent(&self) -> Vec<StoredPhoto> {
        let cloud = match self.cloud.fetch_all().await {
            Ok(photos) => photos,
            Err(e) => {
                warn!(error = %e, "cloud listing failed, showing local photos only");
                Vec::new()
            }
        };

        let seen: HashSet<String> = cloud.iter().map(|p| p.id.clone()).collect();
        let mut photos: Vec<StoredPhoto> = cloud.into_iter().map(StoredPhoto::Cloud).collect();
        photos.extend(
            self.local
                .get_all()
                .await
                .into_iter()
                .filter(|p| !seen.contains(&p.id))
                .map(StoredPhoto::Local),
        );
        photos.sort_by_key(|p| std::cmp::Reverse(p.created_at()));
        photos
    }

    /// Delete `id` from the cloud (best effort) and from the local store.
    ///
    /// Returns true when either side removed something.
    pub async fn delete(&self, id: &str) -> Result<bool, BoothError> {
        let from_cloud = self.cloud.delete(id).await;
        let from_local = self.local.delete(id).await?;
        debug!(id, from_cloud, from_local, "delete finished");
        Ok(from_cloud || from_local)
    }

    /// Public link for a share code.
    pub fn share_url(&self, share_code: &str) -> String {
        format!("{}/share/{share_code}", self.share_base)
    }

    pub async fn stats(&self) -> StorageStats {
        self.local.stats().await
    }

    /// Remove every locally stored photo. Cloud photos are untouched.
    pub async fn clear(&self) -> Result<(), BoothError> {
        self.local.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booth_test_utils::fixtures::{inline_draft, sunset_draft};
    use booth_test_utils::{FlakySlotStore, MockCloud, RecordingCompressor};
    use booth_core::{CloudPhoto, PhotoImages, is_valid_share_code};
    use tracing_test::traced_test;

    fn facade(cloud: Arc<MockCloud>) -> (PhotoPersistence, Arc<FlakySlotStore>) {
        let slots = Arc::new(FlakySlotStore::new());
        let local = LocalPhotoStore::new(slots.clone(), Arc::new(RecordingCompressor::new()));
        (PhotoPersistence::new(cloud, local), slots)
    }

    fn cloud_photo(id: &str, code: &str, created_at: i64) -> CloudPhoto {
        CloudPhoto {
            id: id.into(),
            original_image_url: format!("https://cdn.test/{id}_original.jpg"),
            processed_image_url: format!("https://cdn.test/{id}_processed.jpg"),
            background_id: "bg1".into(),
            background_name: "Sunset".into(),
            share_code: code.into(),
            created_at,
            prompt: "smile".into(),
            user_slug: None,
            event_slug: None,
        }
    }

    #[tokio::test]
    async fn online_save_never_touches_local_storage() {
        let cloud = Arc::new(MockCloud::online());
        let (persistence, slots) = facade(cloud.clone());

        let saved = persistence.save(sunset_draft()).await.unwrap();
        assert!(saved.is_cloud());
        assert_eq!(saved.share_code(), "CLD001");
        assert_eq!(slots.set_calls(), 0);
        assert!(persistence.local().get_all().await.is_empty());
    }

    #[tokio::test]
    #[traced_test]
    async fn failed_upload_falls_back_and_logs() {
        let cloud = Arc::new(MockCloud::failing(500));
        let (persistence, _slots) = facade(cloud.clone());

        let saved = persistence.save(sunset_draft()).await.unwrap();
        assert!(!saved.is_cloud());
        assert!(is_valid_share_code(saved.share_code()));
        assert_eq!(cloud.request_count(), 1);
        assert!(logs_contain("cloud upload failed, falling back to local storage"));
    }

    #[tokio::test]
    async fn remote_draft_skips_upload() {
        let cloud = Arc::new(MockCloud::online());
        let (persistence, _slots) = facade(cloud.clone());
        let draft = PhotoDraft::new(PhotoImages::remote(
            "https://cdn.test/o.jpg",
            "https://cdn.test/p.jpg",
        ));

        let saved = persistence.save(draft).await.unwrap();
        assert!(!saved.is_cloud());
        assert_eq!(cloud.request_count(), 0);
    }

    #[tokio::test]
    async fn exhausted_local_storage_surfaces_after_cloud_failure() {
        let cloud = Arc::new(MockCloud::offline());
        let slots = Arc::new(FlakySlotStore::always_full());
        let local = LocalPhotoStore::new(slots, Arc::new(RecordingCompressor::new()));
        let persistence = PhotoPersistence::new(cloud, local);

        let err = persistence.save(sunset_draft()).await.unwrap_err();
        assert!(matches!(err, BoothError::StorageExhausted { .. }));
    }

    #[tokio::test]
    #[traced_test]
    async fn lookup_falls_back_on_cloud_error() {
        let cloud = Arc::new(MockCloud::offline());
        let (persistence, _slots) = facade(cloud);
        let saved = persistence.save(inline_draft("a")).await.unwrap();

        let found = persistence.get_by_share_code(saved.share_code()).await.unwrap();
        assert_eq!(found.id(), saved.id());
        assert!(logs_contain("cloud lookup failed"));
    }

    #[tokio::test]
    async fn lookup_prefers_cloud_record() {
        let cloud = Arc::new(MockCloud::online());
        cloud.insert(cloud_photo("c9", "ABC123", 5)).await;
        let (persistence, _slots) = facade(cloud);

        let found = persistence.get_by_share_code("ABC123").await.unwrap();
        assert!(found.is_cloud());
        assert!(persistence.get_by_share_code("ZZZZZZ").await.is_none());
    }

    #[tokio::test]
    async fn list_recent_merges_newest_first() {
        let cloud = Arc::new(MockCloud::offline());
        let (persistence, _slots) = facade(cloud.clone());
        let local = persistence.save(inline_draft("local")).await.unwrap();

        cloud.set_mode(booth_test_utils::CloudMode::Online).await;
        cloud.insert(cloud_photo("old", "OLD001", 1)).await;
        cloud
            .insert(cloud_photo("new", "NEW001", local.created_at() + 10_000))
            .await;

        let ids: Vec<String> = persistence
            .list_recent()
            .await
            .iter()
            .map(|p| p.id().to_string())
            .collect();
        assert_eq!(ids, vec!["new".to_string(), local.id().to_string(), "old".to_string()]);
    }

    #[tokio::test]
    async fn list_recent_without_cloud_is_local_only() {
        let cloud = Arc::new(MockCloud::offline());
        let (persistence, _slots) = facade(cloud);
        persistence.save(inline_draft("a")).await.unwrap();
        persistence.save(inline_draft("b")).await.unwrap();

        let photos = persistence.list_recent().await;
        assert_eq!(photos.len(), 2);
        assert!(photos.iter().all(|p| !p.is_cloud()));
    }

    #[tokio::test]
    async fn delete_reaches_both_sides() {
        let cloud = Arc::new(MockCloud::offline());
        let (persistence, _slots) = facade(cloud.clone());
        let local = persistence.save(inline_draft("a")).await.unwrap();

        assert!(persistence.delete(local.id()).await.unwrap());
        assert!(!persistence.delete(local.id()).await.unwrap());

        cloud.set_mode(booth_test_utils::CloudMode::Online).await;
        cloud.insert(cloud_photo("c1", "ABC123", 1)).await;
        assert!(persistence.delete("c1").await.unwrap());
        assert!(!persistence.delete("c1").await.unwrap());
    }

    #[test]
    fn share_url_normalizes_base() {
        let cloud = Arc::new(MockCloud::online());
        let (persistence, _slots) = facade(cloud.clone());
        assert_eq!(persistence.share_url("ABC123"), "https://pictureme.now/share/ABC123");

        let (persistence, _slots) = facade(cloud.clone());
        let persistence = persistence.with_share_base("http://booth.example.com/").unwrap();
        assert_eq!(
            persistence.share_url("ABC123"),
            "https://booth.example.com/share/ABC123"
        );

        let (persistence, _slots) = facade(cloud);
        let persistence = persistence.with_share_base("http://localhost:5173").unwrap();
        assert_eq!(persistence.share_url("XY12ZZ"), "http://localhost:5173/share/XY12ZZ");
    }

    #[tokio::test]
    async fn stats_and_clear_pass_through() {
        let cloud = Arc::new(MockCloud::offline());
        let (persistence, _slots) = facade(cloud);
        persistence.save(inline_draft("a")).await.unwrap();
        assert_eq!(persistence.stats().await.photo_count, 1);

        persistence.clear().await.unwrap();
        assert_eq!(persistence.stats().await.photo_count, 0);
    }
}
