// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for booth crates.
//!
//! Provides scripted fakes for every seam trait in `booth-core`, enabling
//! fast, deterministic tests without a network or a real disk.
//!
//! # Components
//!
//! - [`FlakySlotStore`] - slot store whose next N writes fail with a quota error
//! - [`RecordingCompressor`] - compressor that records every pass it makes
//! - [`MockCloud`] - in-memory photo service that can be switched offline
//! - [`SeqRandom`] and [`ManualClock`] - deterministic id inputs
//! - [`fixtures`] - real PNG payloads and ready-made drafts

pub mod fixtures;
pub mod mock_cloud;
pub mod recording;
pub mod slots;

pub use mock_cloud::{CloudMode, MockCloud};
pub use recording::{ManualClock, RecordingCompressor, SeqRandom};
pub use slots::FlakySlotStore;
