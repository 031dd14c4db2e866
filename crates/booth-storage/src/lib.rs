// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local photo persistence for booth.
//!
//! Provides slot storage backends (SQLite via `tokio-rusqlite`, and in-memory)
//! that enforce a byte quota, and a [`LocalPhotoStore`] that keeps a bounded,
//! newest-first photo list in one slot and degrades gracefully when the
//! quota is hit.

pub mod database;
pub mod ladder;
pub mod local;
pub mod memory;

pub use database::SqliteSlotStore;
pub use ladder::{DegradationLadder, SaveReport, SaveTier, TierAttempt, TierOutcome};
pub use local::{DEFAULT_SLOT_KEY, LocalPhotoStore};
pub use memory::MemorySlotStore;
