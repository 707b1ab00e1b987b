//! Classification of the configured record count.

use std::fmt;

/// Hard ceiling on the number of records a single activation may create.
pub const MAX_COUNT: u32 = 10;

/// Counts at or above this value activate, but with an advisory notice.
pub const ADVISORY_THRESHOLD: u32 = 5;

/// Count used when the host does not supply one.
pub const DEFAULT_COUNT: u32 = 1;

/// Verdict on a configured count. Checks run in declaration order, first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountPolicy {
    /// `0`: nothing to allocate.
    Empty,
    /// Above [`MAX_COUNT`]: refused.
    OutOfRange,
    /// `ADVISORY_THRESHOLD..=MAX_COUNT`: allowed, but may not be ideal.
    Advisory,
    /// `1..ADVISORY_THRESHOLD`: allowed silently.
    Nominal,
}

impl CountPolicy {
    pub fn classify(count: u32) -> Self {
        if count == 0 {
            CountPolicy::Empty
        } else if count > MAX_COUNT {
            CountPolicy::OutOfRange
        } else if count >= ADVISORY_THRESHOLD {
            CountPolicy::Advisory
        } else {
            CountPolicy::Nominal
        }
    }

    /// Whether an activation with this verdict returns successfully.
    pub fn permits_activation(self) -> bool {
        !matches!(self, CountPolicy::OutOfRange)
    }
}

impl fmt::Display for CountPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CountPolicy::Empty => "empty",
            CountPolicy::OutOfRange => "out of range",
            CountPolicy::Advisory => "advisory",
            CountPolicy::Nominal => "nominal",
        };
        f.write_str(label)
    }
}
