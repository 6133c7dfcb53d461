//! Error types for the BookingReference store.

use crate::domain::BookingId;
use thiserror::Error;

/// Errors that can occur while persisting or reading booking references.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReferenceStoreError {
    /// The code is not a 19 digit decimal string.
    #[error("Invalid reference code: {0:?}")]
    InvalidCode(String),

    /// The reference points to a booking that was never persisted.
    #[error("Booking not found: {0}")]
    UnknownBooking(BookingId),

    /// The booking already holds a reference.
    #[error("Booking already referenced: {0}")]
    AlreadyReferenced(String),

    /// The store rejected the operation.
    #[error("Reference store error: {0}")]
    StoreError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
