//! ## hello-core::alloc::bounded
//! **Fixed record budget**
//!
//! Hands out at most `capacity` live records. Once the budget is used up,
//! allocation fails until a record is released, which makes a mid-activation
//! allocation failure reproducible.

use tracing::debug;

use crate::alloc::{AllocError, AllocationStats, RecordAllocator};
use crate::record::{Record, Timestamp};

#[derive(Debug)]
pub struct BoundedAllocator {
    capacity: usize,
    stats: AllocationStats,
}

impl BoundedAllocator {
    /// A zero capacity is allowed and fails the very first allocation.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            stats: AllocationStats::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records that can still be allocated before the budget runs out.
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.stats.live())
    }
}

impl RecordAllocator for BoundedAllocator {
    fn allocate(&mut self, timestamp: Timestamp) -> Result<Box<Record>, AllocError> {
        if self.remaining() == 0 {
            debug!(capacity = self.capacity, "record budget exhausted");
            return Err(AllocError::BudgetExhausted {
                capacity: self.capacity,
            });
        }
        self.stats.record_allocation();
        Ok(Box::new(Record::new(timestamp)))
    }

    fn free(&mut self, record: Box<Record>) {
        drop(record);
        self.stats.record_free();
    }

    fn stats(&self) -> &AllocationStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_allocator_capacity() {
        let mut pool = BoundedAllocator::new(3);
        let mut allocations = Vec::with_capacity(3);

        for ns in 0..3 {
            allocations.push(pool.allocate(Timestamp::from_nanos(ns)).unwrap());
        }

        assert_eq!(pool.stats().live(), 3);
        assert!(matches!(
            pool.allocate(Timestamp::from_nanos(99)),
            Err(AllocError::BudgetExhausted { capacity: 3 })
        ));
    }

    #[test]
    fn test_bounded_allocator_free_restores_budget() {
        let mut pool = BoundedAllocator::new(1);
        let record = pool.allocate(Timestamp::from_nanos(7)).unwrap();
        assert_eq!(pool.remaining(), 0);

        pool.free(record);
        assert_eq!(pool.remaining(), 1);
        assert!(pool.allocate(Timestamp::from_nanos(8)).is_ok());
    }

    #[test]
    fn test_bounded_allocator_zero_capacity() {
        let mut pool = BoundedAllocator::new(0);
        assert!(pool.allocate(Timestamp::from_nanos(0)).is_err());
        assert_eq!(pool.stats().allocations(), 0);
    }
}
