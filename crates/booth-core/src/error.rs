// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for booth photo persistence.

use thiserror::Error;

/// The primary error type used across every booth crate.
///
/// Not-found is never an error: lookups return `Option`.
#[derive(Debug, Error)]
pub enum BoothError {
    /// Configuration errors (invalid TOML, bad URLs, out-of-range values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage medium errors (database failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A write would push the slot store past its byte quota.
    #[error("storage quota exceeded: {attempted} bytes requested, {quota} bytes allowed")]
    QuotaExceeded { attempted: usize, quota: usize },

    /// An image payload could not be decoded.
    #[error("image decode error: {0}")]
    Decode(String),

    /// An image could not be re-encoded.
    #[error("image encode error: {0}")]
    Encode(String),

    /// The remote photo service could not be reached or returned garbage.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The remote photo service rejected an upload.
    #[error("upload failed: {message}")]
    Upload { status: Option<u16>, message: String },

    /// The remote photo service answered a read with a non-success status.
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    /// Every tier of the local degradation ladder failed.
    #[error("storage limit reached, free space by deleting old photos ({})", reasons.join("; "))]
    StorageExhausted { reasons: Vec<String> },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl BoothError {
    /// Wraps any error as a storage failure.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        BoothError::Storage {
            source: Box::new(err),
        }
    }

    /// True for failures of the remote service rather than of local state.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            BoothError::Transport { .. } | BoothError::Upload { .. } | BoothError::Server { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_exhausted_mentions_limit_and_reasons() {
        let err = BoothError::StorageExhausted {
            reasons: vec!["tier 1: quota".into(), "tier 2: quota".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("storage limit reached"));
        assert!(msg.contains("tier 1: quota; tier 2: quota"));
    }

    #[test]
    fn remote_classification() {
        assert!(BoothError::Server { status: 500, message: "boom".into() }.is_remote());
        assert!(BoothError::Upload { status: None, message: "x".into() }.is_remote());
        assert!(!BoothError::Decode("bad".into()).is_remote());
        assert!(!BoothError::QuotaExceeded { attempted: 2, quota: 1 }.is_remote());
    }
}
