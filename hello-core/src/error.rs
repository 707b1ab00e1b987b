use thiserror::Error;

use crate::alloc::AllocError;

/// Reasons an activation is refused or abandoned.
///
/// Both variants leave the manager uninitialized with an empty registry.
#[derive(Debug, Error)]
pub enum ActivationError {
    #[error("count {count} exceeds maximum ({max}); activation refused")]
    ConfigurationOutOfRange { count: u32, max: u32 },

    #[error("allocation of item {index} of {count} failed; activation rolled back")]
    ResourceExhausted {
        index: u32,
        count: u32,
        #[source]
        source: AllocError,
    },
}

impl ActivationError {
    /// Errno-style code a host can hand back to its loader.
    pub fn code(&self) -> i32 {
        match self {
            ActivationError::ConfigurationOutOfRange { .. } => -22,
            ActivationError::ResourceExhausted { .. } => -12,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        let err = ActivationError::ConfigurationOutOfRange { count: 11, max: 10 };
        assert_eq!(
            err.to_string(),
            "count 11 exceeds maximum (10); activation refused"
        );
        assert_eq!(err.code(), -22);
    }

    #[test]
    fn test_resource_exhausted_keeps_source() {
        let err = ActivationError::ResourceExhausted {
            index: 3,
            count: 4,
            source: AllocError::BudgetExhausted { capacity: 2 },
        };
        assert_eq!(err.code(), -12);
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("record budget of 2 exhausted"));
    }
}
