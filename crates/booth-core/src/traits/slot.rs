// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value slot storage, the medium behind the local photo store.

use async_trait::async_trait;

use crate::error::BoothError;

/// A string-keyed store of string values.
///
/// Writes replace the whole value. Implementations report
/// [`BoothError::QuotaExceeded`] when a write does not fit.
#[async_trait]
pub trait SlotStore: Send + Sync + 'static {
    /// Reads the value at `key`, `None` when the slot is empty.
    async fn get(&self, key: &str) -> Result<Option<String>, BoothError>;

    /// Replaces the value at `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), BoothError>;

    /// Empties the slot. Removing an empty slot is not an error.
    async fn remove(&self, key: &str) -> Result<(), BoothError>;
}
