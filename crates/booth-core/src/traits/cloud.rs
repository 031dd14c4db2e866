// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote photo service contract.

use async_trait::async_trait;

use crate::error::BoothError;
use crate::types::{CloudPhoto, PhotoUpload};

/// Client for the remote photo service, the source of truth when reachable.
#[async_trait]
pub trait PhotoCloud: Send + Sync + 'static {
    /// Uploads both images and their metadata, returning the server record.
    async fn upload(&self, upload: &PhotoUpload) -> Result<CloudPhoto, BoothError>;

    /// Fetches a photo by share code. A 404 is `Ok(None)`.
    async fn fetch_by_share_code(
        &self,
        share_code: &str,
    ) -> Result<Option<CloudPhoto>, BoothError>;

    /// Fetches the public photo list.
    async fn fetch_all(&self) -> Result<Vec<CloudPhoto>, BoothError>;

    /// Deletes a photo by id. Never fails; returns whether the server accepted.
    async fn delete(&self, id: &str) -> bool;
}
