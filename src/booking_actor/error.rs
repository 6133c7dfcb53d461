//! Error types for the Booking store.

use thiserror::Error;

/// Errors that can occur while persisting or reading bookings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookingStoreError {
    /// The store rejected the operation.
    #[error("Booking store error: {0}")]
    StoreError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
