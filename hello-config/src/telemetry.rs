//! Observability configuration.
//!
//! Parameters for log output and the metrics dump printed on exit.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation;

/// Output format of the log subscriber.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Telemetry configuration.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct TelemetryConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[validate(custom(function = validation::validate_level))]
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// Print prometheus counters after the lifecycle completes.
    #[serde(default)]
    pub metrics: bool,
}

fn default_level() -> String {
    "info".into()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            metrics: false,
        }
    }
}
