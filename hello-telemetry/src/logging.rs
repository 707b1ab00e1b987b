//! ## hello-telemetry::logging
//! **Subscriber setup**
//!
//! Installs a `tracing-subscriber` fmt subscriber. `RUST_LOG` wins over the
//! configured level; the configured format picks human-readable or JSON lines.

use hello_config::{LogFormat, TelemetryConfig};
use tracing::{info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};

type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Installs the global subscriber. Fails if one is already set.
pub fn init(config: &TelemetryConfig) -> Result<(), InitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));

    match config.format {
        LogFormat::Pretty => fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init(),
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .try_init(),
    }
}

fn default_directive(config: &TelemetryConfig) -> String {
    config.level.to_lowercase()
}

/// Span wrapping one lifecycle hook invocation.
pub fn lifecycle_span(operation: &'static str, count: u32) -> Span {
    info_span!("lifecycle", operation, count)
}
