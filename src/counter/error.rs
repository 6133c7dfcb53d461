//! Error types for the counter store.

use std::sync::{MutexGuard, PoisonError};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CounterError {
    /// Another writer changed the value between read and swap. Retried by the allocator.
    #[error("Counter conflict on {sequence}: expected {expected}, found {actual:?}")]
    Conflict {
        sequence: String,
        expected: u64,
        actual: Option<u64>,
    },

    /// The backing store could not be reached or failed the operation.
    #[error("Counter store unavailable: {0}")]
    Unavailable(String),

    /// The stored bytes do not decode to a counter value.
    #[error("Corrupt counter value for {sequence}: {reason}")]
    Corrupt { sequence: String, reason: String },
}

impl CounterError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// Extension trait for converting lock errors to CounterError.
pub trait LockResultExt<T> {
    fn map_lock_err(self) -> Result<T, CounterError>;
}

impl<'a, T> LockResultExt<MutexGuard<'a, T>>
    for Result<MutexGuard<'a, T>, PoisonError<MutexGuard<'a, T>>>
{
    #[inline]
    fn map_lock_err(self) -> Result<MutexGuard<'a, T>, CounterError> {
        self.map_err(|e| CounterError::Unavailable(format!("lock poisoned: {e}")))
    }
}
