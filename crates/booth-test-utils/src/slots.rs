// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slot store with scripted write failures.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use booth_core::{BoothError, SlotStore};

/// In-memory slot store whose next `n` writes fail with
/// [`BoothError::QuotaExceeded`]. Reads can be scripted to fail too.
///
/// Every `set` call, failed or not, is counted, and successful writes are kept
/// in order so tests can inspect exactly what reached the medium.
#[derive(Default)]
pub struct FlakySlotStore {
    slots: Mutex<HashMap<String, String>>,
    failures_remaining: AtomicUsize,
    read_failures: AtomicUsize,
    set_calls: AtomicUsize,
    writes: Mutex<Vec<String>>,
}

impl FlakySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose first `n` writes fail.
    pub fn failing_writes(n: usize) -> Self {
        let store = Self::default();
        store.fail_next_writes(n);
        store
    }

    /// A store that rejects every write.
    pub fn always_full() -> Self {
        Self::failing_writes(usize::MAX)
    }

    /// Schedule the next `n` writes to fail.
    pub fn fail_next_writes(&self, n: usize) {
        self.failures_remaining.store(n, Ordering::SeqCst);
    }

    /// Schedule the next `n` reads to fail with a storage error.
    pub fn fail_next_reads(&self, n: usize) {
        self.read_failures.store(n, Ordering::SeqCst);
    }

    /// Number of `set` calls seen, including failed ones.
    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }

    /// Values of successful writes, oldest first.
    pub async fn writes(&self) -> Vec<String> {
        self.writes.lock().await.clone()
    }

    /// Place a raw value in a slot, bypassing failure scripting.
    pub async fn put_raw(&self, key: &str, value: &str) {
        self.slots
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
    }

    /// Read a raw slot value.
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.slots.lock().await.get(key).cloned()
    }

    fn take_failure(&self) -> bool {
        take(&self.failures_remaining)
    }
}

fn take(counter: &AtomicUsize) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

#[async_trait]
impl SlotStore for FlakySlotStore {
    async fn get(&self, key: &str) -> Result<Option<String>, BoothError> {
        if take(&self.read_failures) {
            return Err(BoothError::Internal("disk I/O error".into()));
        }
        Ok(self.slots.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BoothError> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        if self.take_failure() {
            return Err(BoothError::QuotaExceeded {
                attempted: value.len(),
                quota: 0,
            });
        }
        self.slots
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        self.writes.lock().await.push(value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), BoothError> {
        self.slots.lock().await.remove(key);
        Ok(())
    }
}
