// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed slot store with a byte quota.
//!
//! All reads and writes go through tokio-rusqlite's single background thread,
//! so one `SqliteSlotStore` is the only writer of its file.

use std::path::Path;

use async_trait::async_trait;
use rusqlite::OptionalExtension;
use tokio_rusqlite::Connection;
use tracing::debug;

use booth_core::{BoothError, SlotStore};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS slots (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);";

/// Slot store persisted in a SQLite table.
///
/// The quota covers the byte length of every stored value, mirroring the
/// per-origin limit of browser storage.
pub struct SqliteSlotStore {
    conn: Connection,
    quota_bytes: usize,
}

impl SqliteSlotStore {
    /// Open (or create) the slot database at `path`.
    pub async fn open(path: impl AsRef<Path>, quota_bytes: usize) -> Result<Self, BoothError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(BoothError::storage)?;
        }
        let conn = Connection::open(path.to_path_buf())
            .await
            .map_err(BoothError::storage)?;
        debug!(path = %path.display(), quota_bytes, "opened slot database");
        Self::init(conn, quota_bytes).await
    }

    /// Open a private in-memory slot database.
    pub async fn open_in_memory(quota_bytes: usize) -> Result<Self, BoothError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(BoothError::storage)?;
        Self::init(conn, quota_bytes).await
    }

    async fn init(conn: Connection, quota_bytes: usize) -> Result<Self, BoothError> {
        conn.call(|conn| -> Result<(), rusqlite::Error> {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await
        .map_err(BoothError::storage)?;
        Ok(Self { conn, quota_bytes })
    }

    pub fn quota_bytes(&self) -> usize {
        self.quota_bytes
    }
}

#[async_trait]
impl SlotStore for SqliteSlotStore {
    async fn get(&self, key: &str) -> Result<Option<String>, BoothError> {
        let key = key.to_string();
        self.conn
            .call(move |conn| -> Result<Option<String>, rusqlite::Error> {
                conn.query_row(
                    "SELECT value FROM slots WHERE key = ?1",
                    rusqlite::params![key],
                    |row| row.get(0),
                )
                .optional()
            })
            .await
            .map_err(BoothError::storage)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BoothError> {
        let key = key.to_string();
        let value = value.to_string();
        let quota = self.quota_bytes;

        // Returns the would-be total when the write does not fit.
        let rejected = self
            .conn
            .call(move |conn| -> Result<Option<usize>, rusqlite::Error> {
                let tx = conn.transaction()?;
                let others: i64 = tx.query_row(
                    "SELECT COALESCE(SUM(LENGTH(CAST(value AS BLOB))), 0) FROM slots WHERE key != ?1",
                    rusqlite::params![key],
                    |row| row.get(0),
                )?;
                let total = usize::try_from(others).unwrap_or(usize::MAX) + value.len();
                if total > quota {
                    return Ok(Some(total));
                }
                tx.execute(
                    "INSERT INTO slots (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    rusqlite::params![key, value],
                )?;
                tx.commit()?;
                Ok(None)
            })
            .await
            .map_err(BoothError::storage)?;

        match rejected {
            Some(attempted) => Err(BoothError::QuotaExceeded { attempted, quota }),
            None => Ok(()),
        }
    }

    async fn remove(&self, key: &str) -> Result<(), BoothError> {
        let key = key.to_string();
        self.conn
            .call(move |conn| -> Result<(), rusqlite::Error> {
                conn.execute("DELETE FROM slots WHERE key = ?1", rusqlite::params![key])?;
                Ok(())
            })
            .await
            .map_err(BoothError::storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn set_get_remove_round() {
        let store = SqliteSlotStore::open_in_memory(1024).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("k", "first").await.unwrap();
        store.set("k", "second").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("second"));

        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
        store.remove("k").await.unwrap();
    }

    #[tokio::test]
    async fn overwrite_does_not_count_old_value() {
        let store = SqliteSlotStore::open_in_memory(10).await.unwrap();
        store.set("k", "0123456789").await.unwrap();
        store.set("k", "abcdefghij").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("abcdefghij"));
    }

    #[tokio::test]
    async fn quota_spans_all_slots() {
        let store = SqliteSlotStore::open_in_memory(10).await.unwrap();
        store.set("a", "123456").await.unwrap();

        let err = store.set("b", "12345").await.unwrap_err();
        assert!(
            matches!(err, BoothError::QuotaExceeded { attempted: 11, quota: 10 }),
            "got {err:?}"
        );
        assert_eq!(store.get("b").await.unwrap(), None);
        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("123456"));
    }

    #[tokio::test]
    async fn quota_counts_bytes_not_chars() {
        let store = SqliteSlotStore::open_in_memory(4).await.unwrap();
        // Three characters, six bytes.
        assert!(store.set("k", "ééé").await.is_err());
    }

    #[tokio::test]
    async fn survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("slots.db");

        {
            let store = SqliteSlotStore::open(&path, 1024).await.unwrap();
            store.set("photos", "[]").await.unwrap();
        }

        let reopened = SqliteSlotStore::open(&path, 1024).await.unwrap();
        assert_eq!(reopened.get("photos").await.unwrap().as_deref(), Some("[]"));
    }
}
