//! ## hello-telemetry::metrics
//! **Prometheus counters**
//!
//! Counts allocated and freed records, failed activations and notices by level.
//! After a full lifecycle `items_allocated` and `items_freed` must match.

use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    pub items_allocated: IntCounter,
    pub items_freed: IntCounter,
    pub activation_failures: IntCounter,
    pub notices: IntCounterVec,
}

impl MetricsRecorder {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let items_allocated =
            IntCounter::new("hello_items_allocated_total", "Records added to the registry")?;
        let items_freed =
            IntCounter::new("hello_items_freed_total", "Records released from the registry")?;
        let activation_failures = IntCounter::new(
            "hello_activation_failures_total",
            "Activations refused or rolled back",
        )?;
        let notices = IntCounterVec::new(
            Opts::new("hello_notices_total", "Notices emitted, by level"),
            &["level"],
        )?;

        registry.register(Box::new(items_allocated.clone()))?;
        registry.register(Box::new(items_freed.clone()))?;
        registry.register(Box::new(activation_failures.clone()))?;
        registry.register(Box::new(notices.clone()))?;

        Ok(Self {
            registry,
            items_allocated,
            items_freed,
            activation_failures,
            notices,
        })
    }

    /// Text exposition of every registered metric.
    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    pub fn live_items(&self) -> u64 {
        self.items_allocated
            .get()
            .saturating_sub(self.items_freed.get())
    }
}
