//! Timestamped records stored in the registry.

use std::fmt;

/// Monotonic point in time, in nanoseconds. Only meaningful for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const fn from_nanos(ns: u64) -> Self {
        Self(ns)
    }

    pub const fn as_nanos(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ns", self.0)
    }
}

/// One unit of work performed during activation.
///
/// Deliberately neither `Clone` nor `Copy`: a record has exactly one owner,
/// so it cannot be duplicated or aliased while it sits in the registry.
#[derive(Debug, PartialEq, Eq)]
pub struct Record {
    timestamp: Timestamp,
}

impl Record {
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}
