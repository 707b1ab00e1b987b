//! ## hello-core::alloc
//! **Record allocators**
//!
//! Every record enters the registry through a [`RecordAllocator`] and leaves it
//! through the same allocator, which lets the allocation statistics prove that
//! each record is released exactly once.
//!
//! ### Key Submodules:
//! - `heap/`: plain boxed allocation
//! - `bounded/`: fixed record budget, fails once the budget is used up
//! - `stats/`: allocation and release counters

pub mod bounded;
pub mod heap;
pub mod stats;

pub use bounded::BoundedAllocator;
pub use heap::HeapAllocator;
pub use stats::AllocationStats;

use thiserror::Error;

use crate::record::{Record, Timestamp};
use crate::registry::RegistryError;

#[derive(Debug, Error)]
pub enum AllocError {
    #[error("record budget of {capacity} exhausted")]
    BudgetExhausted { capacity: usize },

    #[error("registry could not grow: {0}")]
    Registry(#[from] RegistryError),
}

/// Creates and releases records.
pub trait RecordAllocator {
    /// Allocates a record stamped with `timestamp`.
    fn allocate(&mut self, timestamp: Timestamp) -> Result<Box<Record>, AllocError>;

    /// Releases a record previously returned by [`RecordAllocator::allocate`].
    fn free(&mut self, record: Box<Record>);

    fn stats(&self) -> &AllocationStats;
}
