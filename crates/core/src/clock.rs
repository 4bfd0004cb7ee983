//! Injectable time source.
//!
//! Defaults (`created_at`, the default deadline) and the deadline check all
//! read time through a [`Clock`] so tests can pin "now" to a known instant.

use std::sync::Mutex;

use chrono::Utc;

use crate::types::{Date, Timestamp};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current UTC instant.
    fn now(&self) -> Timestamp;

    /// Current UTC calendar date.
    fn today(&self) -> Date {
        self.now().date_naive()
    }
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<Timestamp>,
}

impl FixedClock {
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: chrono::Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += delta;
    }

    /// Jump to an arbitrary instant.
    pub fn set(&self, instant: Timestamp) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now = instant;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}
