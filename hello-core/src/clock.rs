//! ## hello-core::clock
//! **Timestamp sources for records**
//!
//! - `MonotonicClock`: nanoseconds elapsed since the clock was created
//! - `VirtualClock`: deterministic clock using an atomic counter, for tests and
//!   reproducible runs

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::record::Timestamp;

/// Source of record timestamps.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall-independent monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        let ns = u64::try_from(self.epoch.elapsed().as_nanos()).unwrap_or(u64::MAX);
        Timestamp::from_nanos(ns)
    }
}

/// Deterministic clock. Clones share the same counter.
#[derive(Debug, Clone)]
pub struct VirtualClock {
    offset: Arc<AtomicU64>, // Nanoseconds
    step: u64,
}

impl VirtualClock {
    pub fn new(start: u64) -> Self {
        Self {
            offset: Arc::new(AtomicU64::new(start)),
            step: 0,
        }
    }

    /// Advances the clock by `step` nanoseconds after every reading.
    pub fn with_step(mut self, step: u64) -> Self {
        self.step = step;
        self
    }

    pub fn now_ns(&self) -> u64 {
        self.offset.load(Ordering::Acquire)
    }

    pub fn advance(&self, ns: u64) {
        self.offset.fetch_add(ns, Ordering::Release);
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_nanos(self.offset.fetch_add(self.step, Ordering::AcqRel))
    }
}
