// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic stand-ins for the compressor, randomness, and clock.

use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use booth_core::{BoothError, Clock, ImageCompressor, RandomSource};

/// Compressor that records each pass and tags the payload with its quality.
///
/// `compress("x", 0.8)` returns `"x|q=0.8"`, so the pass history of a stored
/// payload can be read straight off the payload itself.
#[derive(Debug, Default)]
pub struct RecordingCompressor {
    calls: Mutex<Vec<(String, f32)>>,
    fail: bool,
}

impl RecordingCompressor {
    pub fn new() -> Self {
        Self::default()
    }

    /// A compressor that fails every pass with a decode error.
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Every `(input, quality)` pair seen, in call order.
    pub fn calls(&self) -> Vec<(String, f32)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Qualities requested, in call order.
    pub fn qualities(&self) -> Vec<f32> {
        self.calls().into_iter().map(|(_, q)| q).collect()
    }
}

impl ImageCompressor for RecordingCompressor {
    fn compress(&self, data_url: &str, quality: f32) -> Result<String, BoothError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((data_url.to_string(), quality));
        }
        if self.fail {
            return Err(BoothError::Decode("scripted decode failure".into()));
        }
        Ok(format!("{data_url}|q={quality}"))
    }
}

/// Random source that replays a fixed sequence, wrapping around.
#[derive(Debug)]
pub struct SeqRandom {
    values: Vec<usize>,
    cursor: AtomicUsize,
}

impl SeqRandom {
    pub fn new(values: Vec<usize>) -> Self {
        Self {
            values,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl RandomSource for SeqRandom {
    fn next_index(&self, bound: usize) -> usize {
        if bound == 0 || self.values.is_empty() {
            return 0;
        }
        let i = self.cursor.fetch_add(1, Ordering::SeqCst) % self.values.len();
        self.values[i] % bound
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(start_millis),
        }
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
