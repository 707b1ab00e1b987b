//! Module parameters supplied to the activation manager.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Parameters read once at activation time.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct ModuleConfig {
    /// The number of times to print "Hello, world!".
    #[serde(default = "default_count")]
    pub count: u32,

    /// Record budget for the bounded allocator. Unset means plain heap allocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
}

fn default_count() -> u32 {
    hello_core::DEFAULT_COUNT
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            capacity: None,
        }
    }
}
