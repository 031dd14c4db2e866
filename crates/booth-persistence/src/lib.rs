// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Photo persistence facade for booth.
//!
//! [`PhotoPersistence`] unifies the remote photo service and the bounded
//! local store behind one save/read API: cloud preferred, local fallback.

pub mod facade;

pub use facade::{DEFAULT_SHARE_BASE, PhotoPersistence};
