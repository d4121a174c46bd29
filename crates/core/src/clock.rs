// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for update timestamps

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A clock that provides the wall-clock time used for defaulted `time` fields
pub trait Clock: Clone + Send + Sync {
    /// Seconds since the Unix epoch, with sub-second precision.
    fn epoch_secs(&self) -> f64;
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn epoch_secs(&self) -> f64 {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs_f64()
    }
}

/// Fake clock for testing with controllable time
#[derive(Clone)]
pub struct FakeClock {
    epoch_secs: Arc<Mutex<f64>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self { epoch_secs: Arc::new(Mutex::new(1_000_000.0)) }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        *self.epoch_secs.lock() += duration.as_secs_f64();
    }

    /// Set the epoch seconds value
    pub fn set_epoch_secs(&self, secs: f64) {
        *self.epoch_secs.lock() = secs;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn epoch_secs(&self) -> f64 {
        *self.epoch_secs.lock()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
