//! ## hello-core::alloc::stats
//! **Allocation statistics**
//!
//! Counts allocations and releases so callers can check that the number of
//! live records returns to zero after a drain.

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AllocationStats {
    allocations: usize,
    frees: usize,
}

impl AllocationStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_allocation(&mut self) {
        self.allocations += 1;
    }

    #[inline]
    pub fn record_free(&mut self) {
        self.frees += 1;
    }

    pub fn allocations(&self) -> usize {
        self.allocations
    }

    pub fn frees(&self) -> usize {
        self.frees
    }

    /// Records allocated but not yet released.
    pub fn live(&self) -> usize {
        self.allocations.saturating_sub(self.frees)
    }
}
