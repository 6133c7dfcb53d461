use crate::counter::{CounterError, LockResultExt, ReferenceCounterStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Process-local counter store.
///
/// Clones share the same rows, so handing one clone to each of several allocators
/// behaves like several nodes sharing one database.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCounterStore {
    rows: Arc<Mutex<HashMap<String, u64>>>,
}

impl InMemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with `sequence` already provisioned at `latest`.
    pub fn with_sequence(sequence: impl Into<String>, latest: u64) -> Self {
        let store = Self::new();
        if let Ok(mut rows) = store.rows.lock() {
            rows.insert(sequence.into(), latest);
        }
        store
    }
}

#[async_trait]
impl ReferenceCounterStore for InMemoryCounterStore {
    async fn read_latest(&self, sequence: &str) -> Result<Option<u64>, CounterError> {
        let rows = self.rows.lock().map_lock_err()?;
        Ok(rows.get(sequence).copied())
    }

    async fn compare_and_swap(
        &self,
        sequence: &str,
        expected: u64,
        new: u64,
    ) -> Result<(), CounterError> {
        let mut rows = self.rows.lock().map_lock_err()?;
        match rows.get_mut(sequence) {
            Some(current) if *current == expected => {
                *current = new;
                debug!(sequence, expected, new, "Swapped");
                Ok(())
            }
            current => Err(CounterError::Conflict {
                sequence: sequence.to_string(),
                expected,
                actual: current.map(|value| *value),
            }),
        }
    }

    async fn provision(&self, sequence: &str) -> Result<bool, CounterError> {
        let mut rows = self.rows.lock().map_lock_err()?;
        if rows.contains_key(sequence) {
            return Ok(false);
        }
        rows.insert(sequence.to_string(), 0);
        Ok(true)
    }
}
