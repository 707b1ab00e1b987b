//! Leveled notices emitted over the activation lifecycle.
//!
//! The manager never logs directly. It hands each [`Notice`] to a
//! [`NoticeSink`]; [`TracingSink`] forwards them to `tracing`, and
//! [`MemorySink`] keeps them for inspection.

use std::fmt;

use tracing::{error, info, warn};

use crate::policy::MAX_COUNT;
use crate::record::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NothingToDo,
    CountOutOfRange { count: u32 },
    VolumeAdvisory { count: u32 },
    /// `index` is 1-based.
    Progress { index: u32, total: u32 },
    Activated { count: u32 },
    /// `index` is the 1-based item whose allocation failed.
    AllocationFailed { index: u32, count: u32 },
    Freeing { timestamp: Timestamp },
    DeactivationStarted,
    DeactivationFinished,
}

impl Notice {
    pub fn level(&self) -> Level {
        match self {
            Notice::NothingToDo | Notice::VolumeAdvisory { .. } => Level::Warn,
            Notice::CountOutOfRange { .. } | Notice::AllocationFailed { .. } => Level::Error,
            Notice::Progress { .. }
            | Notice::Activated { .. }
            | Notice::Freeing { .. }
            | Notice::DeactivationStarted
            | Notice::DeactivationFinished => Level::Info,
        }
    }

    /// Stable machine-readable name, used as a structured log field and metric label.
    pub fn kind(&self) -> &'static str {
        match self {
            Notice::NothingToDo => "nothing_to_do",
            Notice::CountOutOfRange { .. } => "count_out_of_range",
            Notice::VolumeAdvisory { .. } => "volume_advisory",
            Notice::Progress { .. } => "progress",
            Notice::Activated { .. } => "activated",
            Notice::AllocationFailed { .. } => "allocation_failed",
            Notice::Freeing { .. } => "freeing",
            Notice::DeactivationStarted => "deactivation_started",
            Notice::DeactivationFinished => "deactivation_finished",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NothingToDo => write!(f, "count is 0, nothing to do"),
            Notice::CountOutOfRange { count } => write!(
                f,
                "count {count} exceeds maximum ({MAX_COUNT}); activation refused"
            ),
            Notice::VolumeAdvisory { count } => {
                write!(f, "count is {count}; this may not be ideal")
            }
            Notice::Progress { index, total } => write!(f, "progress {index}/{total}"),
            Notice::Activated { count } => write!(f, "activated with {count} items"),
            Notice::AllocationFailed { index, count } => write!(
                f,
                "allocation of item {index} of {count} failed; rolling back"
            ),
            Notice::Freeing { timestamp } => {
                write!(f, "freeing item with timestamp {timestamp}")
            }
            Notice::DeactivationStarted => write!(f, "deactivating, freeing resources"),
            Notice::DeactivationFinished => write!(f, "deactivated"),
        }
    }
}

/// Receives notices. Emission cannot fail.
pub trait NoticeSink {
    fn emit(&mut self, notice: &Notice);
}

impl<S: NoticeSink + ?Sized> NoticeSink for Box<S> {
    fn emit(&mut self, notice: &Notice) {
        (**self).emit(notice)
    }
}

/// Forwards notices to the global `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NoticeSink for TracingSink {
    fn emit(&mut self, notice: &Notice) {
        let kind = notice.kind();
        match notice.level() {
            Level::Info => info!(kind, "{}", notice),
            Level::Warn => warn!(kind, "{}", notice),
            Level::Error => error!(kind, "{}", notice),
        }
    }
}

/// Keeps every notice in emission order.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    notices: Vec<Notice>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Number of stored notices matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&Notice) -> bool) -> usize {
        self.notices.iter().filter(|n| predicate(n)).count()
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }
}

impl NoticeSink for MemorySink {
    fn emit(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}
