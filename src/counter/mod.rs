//! Durable latest-value store behind the reference sequences.
//!
//! The store is the only state shared between nodes. It exposes exactly what the
//! optimistic allocation protocol needs: read the latest value, and swap it for a new
//! one only if nobody else changed it in between.
//!
//! - [`InMemoryCounterStore`] - process-local store; share one instance between
//!   several allocators to model several nodes.
//! - [`SledCounterStore`] - on-disk store built on sled's atomic compare-and-swap.

pub mod error;
pub mod memory;
pub mod sled_store;

pub use error::*;
pub use memory::InMemoryCounterStore;
pub use sled_store::SledCounterStore;

use async_trait::async_trait;

/// Key -> latest issued value, with an atomic compare-and-swap.
///
/// # Invariants
/// - A sequence row exists only after [`provision`](Self::provision); the value starts at 0.
/// - Values only change through `compare_and_swap`.
/// - `read_latest` has no side effects: two reads without an intervening swap agree.
#[async_trait]
pub trait ReferenceCounterStore: Send + Sync {
    /// Latest value of `sequence`, or `None` if the sequence was never provisioned.
    async fn read_latest(&self, sequence: &str) -> Result<Option<u64>, CounterError>;

    /// Replaces the value with `new` only if it still equals `expected`.
    ///
    /// Returns [`CounterError::Conflict`] if the stored value moved on (or the row
    /// disappeared) since it was read.
    async fn compare_and_swap(
        &self,
        sequence: &str,
        expected: u64,
        new: u64,
    ) -> Result<(), CounterError>;

    /// Creates the row at 0 if it does not exist. Returns `true` when created.
    async fn provision(&self, sequence: &str) -> Result<bool, CounterError>;
}
