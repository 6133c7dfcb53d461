//! # Allocator Actor
//!
//! The single task that runs the allocation protocol for this process.
//!
//! ## Protocol
//!
//! 1. Read the latest value of the sequence from the counter store.
//! 2. Propose `latest + 1`.
//! 3. Compare-and-swap `latest -> latest + 1` in the store.
//! 4. On success, hand out `latest + 1`.
//! 5. On conflict another node got there first: go back to 1.
//!
//! Requests are served one at a time, so two tasks of the same process can never race
//! on the same `latest`. Conflicts can only come from other processes sharing the store,
//! and every conflict means the stored value strictly grew, so a finite set of writers
//! always lets the loop finish. There is no attempt cap and no backoff.
//!
//! A caller that gives up mid-request does not undo the swap. The value stays spent
//! and is logged at `warn`.

use crate::allocator::{AllocationError, ReferenceAllocator};
use crate::counter::{CounterError, ReferenceCounterStore};
use crate::domain::ReferenceNumber;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Type alias for the one-shot response channel used by the allocator.
pub type Reply<T> = oneshot::Sender<Result<T, AllocationError>>;

/// Messages understood by the [`AllocatorActor`].
#[derive(Debug)]
pub enum AllocatorRequest {
    AllocateNext {
        sequence: String,
        respond_to: Reply<ReferenceNumber>,
    },
    Current {
        sequence: String,
        respond_to: Reply<u64>,
    },
}

/// Owner of the allocation critical section.
pub struct AllocatorActor {
    receiver: mpsc::Receiver<AllocatorRequest>,
    store: Arc<dyn ReferenceCounterStore>,
}

impl AllocatorActor {
    /// # Panics
    /// If `buffer_size` is zero, as [`mpsc::channel`] does.
    pub fn new(
        buffer_size: usize,
        store: Arc<dyn ReferenceCounterStore>,
    ) -> (Self, ReferenceAllocator) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, store };
        (actor, ReferenceAllocator::new(sender))
    }

    /// Serves requests until every [`ReferenceAllocator`] handle is dropped.
    pub async fn run(mut self) {
        info!("Allocator started");
        let mut issued: u64 = 0;

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                AllocatorRequest::AllocateNext {
                    sequence,
                    respond_to,
                } => {
                    let result = self.allocate_next(&sequence).await;
                    let allocated = result.is_ok();
                    match respond_to.send(result) {
                        Ok(()) if allocated => issued += 1,
                        Ok(()) => {}
                        // The swap is committed, so the value is gone for good.
                        Err(Ok(reference)) => {
                            warn!(sequence = %sequence, reference = %reference, "Caller gone, reference spent");
                        }
                        Err(Err(_)) => {}
                    }
                }
                AllocatorRequest::Current {
                    sequence,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.read_latest(&sequence).await);
                }
            }
        }

        info!(issued, "Allocator shutdown");
    }

    async fn allocate_next(&self, sequence: &str) -> Result<ReferenceNumber, AllocationError> {
        let mut attempt: u64 = 0;
        loop {
            attempt += 1;
            let latest = self.read_latest(sequence).await?;
            let candidate = latest
                .checked_add(1)
                .and_then(ReferenceNumber::new)
                .ok_or_else(|| AllocationError::Exhausted(sequence.to_string()))?;

            match self
                .store
                .compare_and_swap(sequence, latest, candidate.value())
                .await
            {
                Ok(()) => {
                    info!(sequence, reference = %candidate, attempt, "Reference allocated");
                    return Ok(candidate);
                }
                Err(CounterError::Conflict { actual, .. }) => {
                    debug!(sequence, latest, ?actual, attempt, "Counter moved, retrying");
                }
                Err(e) => {
                    warn!(sequence, attempt, error = %e, "Allocation failed");
                    return Err(surface(e));
                }
            }
        }
    }

    async fn read_latest(&self, sequence: &str) -> Result<u64, AllocationError> {
        self.store
            .read_latest(sequence)
            .await
            .map_err(surface)?
            .ok_or_else(|| {
                warn!(sequence, "Sequence not provisioned");
                AllocationError::UnknownSequence(sequence.to_string())
            })
    }
}

/// Maps a non-conflict store failure to what callers see.
fn surface(e: CounterError) -> AllocationError {
    match e {
        CounterError::Corrupt { .. } => AllocationError::CorruptCounter(e.to_string()),
        other => AllocationError::StoreUnavailable(other.to_string()),
    }
}
