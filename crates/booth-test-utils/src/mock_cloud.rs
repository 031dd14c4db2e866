// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory remote photo service for deterministic testing.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use booth_core::{BoothError, Clock, CloudPhoto, PhotoCloud, PhotoUpload, SystemClock};

/// How the mock service answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudMode {
    /// Requests succeed against the in-memory photo list.
    Online,
    /// Requests fail as if the host were unreachable.
    Offline,
    /// Requests come back with the given HTTP status.
    Failing(u16),
}

/// A mock photo service holding uploads in memory.
///
/// Uploads get ids `cloud-1`, `cloud-2`, ... and share codes `CLD001`,
/// `CLD002`, ...
pub struct MockCloud {
    mode: Mutex<CloudMode>,
    photos: Mutex<Vec<CloudPhoto>>,
    uploads: AtomicUsize,
    requests: AtomicUsize,
}

impl MockCloud {
    pub fn new(mode: CloudMode) -> Self {
        Self {
            mode: Mutex::new(mode),
            photos: Mutex::new(Vec::new()),
            uploads: AtomicUsize::new(0),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn online() -> Self {
        Self::new(CloudMode::Online)
    }

    pub fn offline() -> Self {
        Self::new(CloudMode::Offline)
    }

    pub fn failing(status: u16) -> Self {
        Self::new(CloudMode::Failing(status))
    }

    pub async fn set_mode(&self, mode: CloudMode) {
        *self.mode.lock().await = mode;
    }

    /// Preload a photo as if uploaded earlier.
    pub async fn insert(&self, photo: CloudPhoto) {
        self.photos.lock().await.push(photo);
    }

    /// Number of successful uploads.
    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    /// Number of requests of any kind, including failed ones.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    async fn check(&self) -> Result<(), BoothError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match *self.mode.lock().await {
            CloudMode::Online => Ok(()),
            CloudMode::Offline => Err(BoothError::Transport {
                message: "connection refused".into(),
                source: None,
            }),
            CloudMode::Failing(status) => Err(BoothError::Server {
                status,
                message: "scripted failure".into(),
            }),
        }
    }
}

#[async_trait]
impl PhotoCloud for MockCloud {
    async fn upload(&self, upload: &PhotoUpload) -> Result<CloudPhoto, BoothError> {
        self.check().await.map_err(|e| match e {
            BoothError::Server { status, message } => BoothError::Upload {
                status: Some(status),
                message,
            },
            other => other,
        })?;

        let n = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("cloud-{n}");
        let photo = CloudPhoto {
            original_image_url: format!("https://cdn.test/{id}_original.jpg"),
            processed_image_url: format!("https://cdn.test/{id}_processed.jpg"),
            id,
            background_id: upload.background_id.clone(),
            background_name: upload.background_name.clone(),
            share_code: format!("CLD{n:03}"),
            created_at: SystemClock.now_millis(),
            prompt: upload.prompt.clone(),
            user_slug: upload.user_slug.clone(),
            event_slug: upload.event_slug.clone(),
        };
        self.photos.lock().await.push(photo.clone());
        Ok(photo)
    }

    async fn fetch_by_share_code(
        &self,
        share_code: &str,
    ) -> Result<Option<CloudPhoto>, BoothError> {
        self.check().await?;
        Ok(self
            .photos
            .lock()
            .await
            .iter()
            .find(|p| p.share_code == share_code)
            .cloned())
    }

    async fn fetch_all(&self) -> Result<Vec<CloudPhoto>, BoothError> {
        self.check().await?;
        Ok(self.photos.lock().await.clone())
    }

    async fn delete(&self, id: &str) -> bool {
        if self.check().await.is_err() {
            return false;
        }
        let mut photos = self.photos.lock().await;
        let before = photos.len();
        photos.retain(|p| p.id != id);
        photos.len() != before
    }
}
