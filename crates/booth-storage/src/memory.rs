// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ephemeral slot store held in process memory.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use booth_core::{BoothError, SlotStore};

/// In-memory slot store enforcing the same byte quota as [`crate::SqliteSlotStore`].
pub struct MemorySlotStore {
    slots: Mutex<HashMap<String, String>>,
    quota_bytes: usize,
}

impl MemorySlotStore {
    pub fn new(quota_bytes: usize) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            quota_bytes,
        }
    }

    /// A store without a practical quota.
    pub fn unbounded() -> Self {
        Self::new(usize::MAX)
    }
}

#[async_trait]
impl SlotStore for MemorySlotStore {
    async fn get(&self, key: &str) -> Result<Option<String>, BoothError> {
        Ok(self.slots.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BoothError> {
        let mut slots = self.slots.lock().await;
        let others: usize = slots
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len())
            .sum();
        let attempted = others.saturating_add(value.len());
        if attempted > self.quota_bytes {
            return Err(BoothError::QuotaExceeded {
                attempted,
                quota: self.quota_bytes,
            });
        }
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), BoothError> {
        self.slots.lock().await.remove(key);
        Ok(())
    }
}
