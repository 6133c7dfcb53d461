use crate::allocator::actor::AllocatorRequest;
use crate::allocator::AllocationError;
use crate::domain::ReferenceNumber;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// Handle to this process's [`AllocatorActor`](crate::allocator::AllocatorActor).
///
/// Cheap to clone. Every clone talks to the same actor, so allocations made through
/// any of them are serialized.
#[derive(Clone)]
pub struct ReferenceAllocator {
    sender: mpsc::Sender<AllocatorRequest>,
}

impl ReferenceAllocator {
    pub fn new(sender: mpsc::Sender<AllocatorRequest>) -> Self {
        Self { sender }
    }

    /// Issues the next value of `sequence`, exactly once across every node sharing
    /// the counter store.
    ///
    /// # Errors
    /// - [`AllocationError::UnknownSequence`] if the sequence was never provisioned
    /// - [`AllocationError::StoreUnavailable`] if the counter store failed (not retried)
    /// - [`AllocationError::Exhausted`] once the 19 digit range is used up
    #[instrument(skip(self))]
    pub async fn allocate_next(&self, sequence: &str) -> Result<ReferenceNumber, AllocationError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(AllocatorRequest::AllocateNext {
                sequence: sequence.to_string(),
                respond_to,
            })
            .await
            .map_err(|_| AllocationError::AllocatorClosed)?;
        response
            .await
            .map_err(|_| AllocationError::AllocatorDropped)?
    }

    /// Latest value issued for `sequence` (0 when none has been issued yet).
    #[instrument(skip(self))]
    pub async fn current(&self, sequence: &str) -> Result<u64, AllocationError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(AllocatorRequest::Current {
                sequence: sequence.to_string(),
                respond_to,
            })
            .await
            .map_err(|_| AllocationError::AllocatorClosed)?;
        response
            .await
            .map_err(|_| AllocationError::AllocatorDropped)?
    }
}
