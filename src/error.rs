//! Error types for the point index.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PointSetError>;

#[derive(Debug, Error)]
pub enum PointSetError {
    /// The slab pool has no contiguous run of free slots long enough.
    ///
    /// This is never retried. Callers size the pool so that it cannot happen
    /// under correct use.
    #[error("allocation failure: no contiguous run of {requested} free slots (capacity {capacity})")]
    AllocationFailure { requested: usize, capacity: usize },

    /// Malformed point stream input. `position` is the 1-based token index.
    #[error("parse error at token {position} ({token:?}): {reason}")]
    Parse {
        position: usize,
        token: String,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PointSetError {
    pub(crate) fn parse(position: usize, token: impl Into<String>, reason: impl Into<String>) -> Self {
        PointSetError::Parse {
            position,
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for capacity exhaustion in a slab pool.
    pub fn is_allocation_failure(&self) -> bool {
        matches!(self, PointSetError::AllocationFailure { .. })
    }
}
