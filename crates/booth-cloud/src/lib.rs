// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote photo service adapter for booth.
//!
//! Implements [`booth_core::PhotoCloud`] over the service's REST API with
//! `reqwest`, enforcing HTTPS for every non-local host.

pub mod client;
pub mod tls;
mod wire;

pub use client::CloudPhotoClient;
pub use tls::{enforce_https, is_localhost};
