// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seam traits between the persistence layers.
//!
//! Every collaborator the stores and the facade depend on is injected through
//! one of these traits so tests can substitute scripted fakes.

pub mod cloud;
pub mod compressor;
pub mod random;
pub mod slot;

pub use cloud::PhotoCloud;
pub use compressor::ImageCompressor;
pub use random::{Clock, RandomSource, SeededRandom, SystemClock, ThreadRandom};
pub use slot::SlotStore;
