use hello_core::notice::{Level, Notice, NoticeSink};

use crate::metrics::MetricsRecorder;

/// Counts every notice into [`MetricsRecorder`] before forwarding it.
#[derive(Debug, Clone)]
pub struct MetricsSink<S> {
    inner: S,
    metrics: MetricsRecorder,
}

impl<S: NoticeSink> MetricsSink<S> {
    pub fn new(inner: S, metrics: MetricsRecorder) -> Self {
        Self { inner, metrics }
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: NoticeSink> NoticeSink for MetricsSink<S> {
    fn emit(&mut self, notice: &Notice) {
        match notice {
            Notice::Progress { .. } => self.metrics.items_allocated.inc(),
            Notice::Freeing { .. } => self.metrics.items_freed.inc(),
            Notice::CountOutOfRange { .. } | Notice::AllocationFailed { .. } => {
                self.metrics.activation_failures.inc()
            }
            _ => {}
        }
        let level = match notice.level() {
            Level::Info => "info",
            Level::Warn => "warning",
            Level::Error => "error",
        };
        self.metrics.notices.with_label_values(&[level]).inc();
        self.inner.emit(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hello_core::alloc::{BoundedAllocator, HeapAllocator};
    use hello_core::clock::VirtualClock;
    use hello_core::notice::MemorySink;
    use hello_core::ActivationManager;

    #[test]
    fn test_round_trip_balances_counters() {
        let metrics = MetricsRecorder::new().unwrap();
        let sink = MetricsSink::new(MemorySink::new(), metrics.clone());
        let mut manager =
            ActivationManager::with_parts(HeapAllocator::new(), VirtualClock::new(0), sink);

        manager.activate(6).unwrap();
        manager.deactivate();

        assert_eq!(metrics.items_allocated.get(), 6);
        assert_eq!(metrics.items_freed.get(), 6);
        assert_eq!(metrics.live_items(), 0);
        assert_eq!(metrics.notices.with_label_values(&["warning"]).get(), 1);
        assert_eq!(manager.sink().inner().notices().len(), 6 + 1 + 1 + 6 + 2);
    }

    #[test]
    fn test_rollback_counts_failure() {
        let metrics = MetricsRecorder::new().unwrap();
        let sink = MetricsSink::new(MemorySink::new(), metrics.clone());
        let mut manager =
            ActivationManager::with_parts(BoundedAllocator::new(2), VirtualClock::new(0), sink);

        assert!(manager.activate(4).is_err());

        assert_eq!(metrics.activation_failures.get(), 1);
        assert_eq!(metrics.items_allocated.get(), 2);
        assert_eq!(metrics.items_freed.get(), 2);
    }
}
