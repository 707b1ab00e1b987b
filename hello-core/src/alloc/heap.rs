use crate::alloc::{AllocError, AllocationStats, RecordAllocator};
use crate::record::{Record, Timestamp};

/// Boxes every record on the global heap.
#[derive(Debug, Default)]
pub struct HeapAllocator {
    stats: AllocationStats,
}

impl HeapAllocator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordAllocator for HeapAllocator {
    fn allocate(&mut self, timestamp: Timestamp) -> Result<Box<Record>, AllocError> {
        let record = Box::new(Record::new(timestamp));
        self.stats.record_allocation();
        Ok(record)
    }

    fn free(&mut self, record: Box<Record>) {
        drop(record);
        self.stats.record_free();
    }

    fn stats(&self) -> &AllocationStats {
        &self.stats
    }
}
