// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Photo records shared by the local store, the cloud client, and the facade.
//!
//! Field names serialize in camelCase so the local slot holds the same JSON
//! shape the remote photo API speaks.

use serde::{Deserialize, Serialize};

/// Where a photo's image data lives.
///
/// Flattened into the owning record, so an inline photo carries
/// `originalImageBase64`/`processedImageBase64` and a remote one carries
/// `originalImageUrl`/`processedImageUrl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PhotoImages {
    /// Image payloads held inline as base64 data URLs.
    Inline {
        #[serde(rename = "originalImageBase64")]
        original_base64: String,
        #[serde(rename = "processedImageBase64")]
        processed_base64: String,
    },
    /// References to images already stored by the remote service.
    Remote {
        #[serde(rename = "originalImageUrl")]
        original_url: String,
        #[serde(rename = "processedImageUrl")]
        processed_url: String,
    },
}

impl PhotoImages {
    pub fn inline(original: impl Into<String>, processed: impl Into<String>) -> Self {
        PhotoImages::Inline {
            original_base64: original.into(),
            processed_base64: processed.into(),
        }
    }

    pub fn remote(original: impl Into<String>, processed: impl Into<String>) -> Self {
        PhotoImages::Remote {
            original_url: original.into(),
            processed_url: processed.into(),
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, PhotoImages::Inline { .. })
    }
}

/// A photo about to be persisted: everything except the identity fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoDraft {
    pub images: PhotoImages,
    pub background_id: String,
    pub background_name: String,
    pub prompt: String,
    /// Booth owner the photo is attributed to.
    pub user_slug: Option<String>,
    /// Event the photo was taken at.
    pub event_slug: Option<String>,
}

impl PhotoDraft {
    pub fn new(images: PhotoImages) -> Self {
        Self {
            images,
            background_id: String::new(),
            background_name: String::new(),
            prompt: String::new(),
            user_slug: None,
            event_slug: None,
        }
    }

    pub fn with_background(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.background_id = id.into();
        self.background_name = name.into();
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_booth(mut self, user_slug: Option<String>, event_slug: Option<String>) -> Self {
        self.user_slug = user_slug;
        self.event_slug = event_slug;
        self
    }

    /// Builds the upload body, or `None` when the images are not inline.
    pub fn to_upload(&self) -> Option<PhotoUpload> {
        match &self.images {
            PhotoImages::Inline {
                original_base64,
                processed_base64,
            } => Some(PhotoUpload {
                original_image_base64: original_base64.clone(),
                processed_image_base64: processed_base64.clone(),
                background_id: self.background_id.clone(),
                background_name: self.background_name.clone(),
                prompt: self.prompt.clone(),
                user_slug: self.user_slug.clone(),
                event_slug: self.event_slug.clone(),
            }),
            PhotoImages::Remote { .. } => None,
        }
    }
}

/// Body of an upload request to the remote photo service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoUpload {
    pub original_image_base64: String,
    pub processed_image_base64: String,
    pub background_id: String,
    pub background_name: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_slug: Option<String>,
}

/// A photo persisted in the local slot store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedPhoto {
    pub id: String,
    #[serde(flatten)]
    pub images: PhotoImages,
    #[serde(default)]
    pub background_id: String,
    #[serde(default)]
    pub background_name: String,
    pub share_code: String,
    /// Epoch milliseconds.
    pub created_at: i64,
    #[serde(default)]
    pub prompt: String,
}

/// A photo confirmed by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudPhoto {
    pub id: String,
    pub original_image_url: String,
    pub processed_image_url: String,
    pub background_id: String,
    pub background_name: String,
    pub share_code: String,
    /// Epoch milliseconds.
    pub created_at: i64,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_slug: Option<String>,
}

/// A photo as returned by the persistence facade, tagged with where it lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum StoredPhoto {
    Cloud(CloudPhoto),
    Local(ProcessedPhoto),
}

impl StoredPhoto {
    pub fn id(&self) -> &str {
        match self {
            StoredPhoto::Cloud(p) => &p.id,
            StoredPhoto::Local(p) => &p.id,
        }
    }

    pub fn share_code(&self) -> &str {
        match self {
            StoredPhoto::Cloud(p) => &p.share_code,
            StoredPhoto::Local(p) => &p.share_code,
        }
    }

    pub fn created_at(&self) -> i64 {
        match self {
            StoredPhoto::Cloud(p) => p.created_at,
            StoredPhoto::Local(p) => p.created_at,
        }
    }

    pub fn background_id(&self) -> &str {
        match self {
            StoredPhoto::Cloud(p) => &p.background_id,
            StoredPhoto::Local(p) => &p.background_id,
        }
    }

    pub fn background_name(&self) -> &str {
        match self {
            StoredPhoto::Cloud(p) => &p.background_name,
            StoredPhoto::Local(p) => &p.background_name,
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            StoredPhoto::Cloud(p) => &p.prompt,
            StoredPhoto::Local(p) => &p.prompt,
        }
    }

    pub fn is_cloud(&self) -> bool {
        matches!(self, StoredPhoto::Cloud(_))
    }
}

/// Usage report for the local slot store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageStats {
    pub photo_count: usize,
    /// Serialized size of the stored list in bytes.
    pub storage_used: usize,
    pub storage_limit: usize,
    pub percent_used: f64,
}
