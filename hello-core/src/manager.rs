//! ## hello-core::manager
//! **Activation lifecycle**
//!
//! `Uninitialized -> activate -> Active -> deactivate -> Uninitialized`.
//! A failed activation rolls back to `Uninitialized` with an empty registry;
//! the partially populated state is never observable from outside `activate`.
//!
//! Both operations take `&mut self`, so calls on one manager are serialized by
//! ownership. There is no locking.

use tracing::debug;

use crate::alloc::{AllocError, HeapAllocator, RecordAllocator};
use crate::clock::{Clock, MonotonicClock};
use crate::error::ActivationError;
use crate::notice::{Notice, NoticeSink, TracingSink};
use crate::policy::{CountPolicy, MAX_COUNT};
use crate::record::Timestamp;
use crate::registry::Registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Active,
}

pub struct ActivationManager<A = HeapAllocator, C = MonotonicClock, S = TracingSink> {
    registry: Registry,
    allocator: A,
    clock: C,
    sink: S,
    state: Lifecycle,
}

impl ActivationManager {
    /// Heap allocation, monotonic timestamps and `tracing` output.
    pub fn new() -> Self {
        Self::with_parts(HeapAllocator::new(), MonotonicClock::new(), TracingSink)
    }
}

impl Default for ActivationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, C, S> ActivationManager<A, C, S>
where
    A: RecordAllocator,
    C: Clock,
    S: NoticeSink,
{
    pub fn with_parts(allocator: A, clock: C, sink: S) -> Self {
        Self {
            registry: Registry::new(),
            allocator,
            clock,
            sink,
            state: Lifecycle::Uninitialized,
        }
    }

    /// Caps the registry at `limit` records, independently of the allocator.
    pub fn with_registry_limit(mut self, limit: usize) -> Self {
        debug_assert!(self.registry.is_empty());
        self.registry = Registry::with_limit(limit);
        self
    }

    /// Validates `count` and populates the registry with that many records.
    ///
    /// The host calls this once, on an empty registry. On error the registry is
    /// empty again and every record allocated by this call has been released.
    pub fn activate(&mut self, count: u32) -> Result<(), ActivationError> {
        debug_assert!(
            self.registry.is_empty(),
            "activate called on a populated registry"
        );

        match CountPolicy::classify(count) {
            CountPolicy::Empty => {
                self.sink.emit(&Notice::NothingToDo);
                self.state = Lifecycle::Active;
                return Ok(());
            }
            CountPolicy::OutOfRange => {
                self.sink.emit(&Notice::CountOutOfRange { count });
                return Err(ActivationError::ConfigurationOutOfRange {
                    count,
                    max: MAX_COUNT,
                });
            }
            CountPolicy::Advisory => self.sink.emit(&Notice::VolumeAdvisory { count }),
            CountPolicy::Nominal => {}
        }

        for index in 1..=count {
            if let Err(source) = self.append() {
                self.sink.emit(&Notice::AllocationFailed { index, count });
                self.drain();
                return Err(ActivationError::ResourceExhausted {
                    index,
                    count,
                    source,
                });
            }
            self.sink.emit(&Notice::Progress {
                index,
                total: count,
            });
        }

        self.state = Lifecycle::Active;
        self.sink.emit(&Notice::Activated { count });
        Ok(())
    }

    /// Releases every record in insertion order. Safe to call on an empty registry.
    pub fn deactivate(&mut self) {
        self.sink.emit(&Notice::DeactivationStarted);
        self.drain();
        self.state = Lifecycle::Uninitialized;
        self.sink.emit(&Notice::DeactivationFinished);
    }

    fn append(&mut self) -> Result<(), AllocError> {
        let record = self.allocator.allocate(self.clock.now())?;
        match self.registry.push(record) {
            Ok(()) => Ok(()),
            Err((record, err)) => {
                self.allocator.free(record);
                Err(err.into())
            }
        }
    }

    fn drain(&mut self) {
        let mut freed = 0usize;
        while let Some(record) = self.registry.pop_front() {
            self.sink.emit(&Notice::Freeing {
                timestamp: record.timestamp(),
            });
            self.allocator.free(record);
            freed += 1;
        }
        debug!(freed, "registry drained");
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Timestamps of the live records, oldest first.
    pub fn timestamps(&self) -> impl Iterator<Item = Timestamp> + '_ {
        self.registry.timestamps()
    }

    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
