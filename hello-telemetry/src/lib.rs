//! # Hello Telemetry
//!
//! Crate for logging and metrics.
//!
//! - `logging`: subscriber setup and lifecycle spans
//! - `metrics`: prometheus counters for records and notices
//! - `sink`: notice sink decorator feeding the counters

pub mod logging;
pub mod metrics;
pub mod sink;

pub use metrics::MetricsRecorder;
pub use sink::MetricsSink;
