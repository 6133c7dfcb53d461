//! Error types for booking creation.

use crate::allocator::AllocationError;
use crate::booking_actor::BookingStoreError;
use crate::reference_actor::ReferenceStoreError;
use crate::validation::ValidationError;
use thiserror::Error;

/// The single failure a booking creation can end with.
///
/// Variants follow the pipeline steps, so the variant tells how far the request got:
/// a `Validation` failure touched nothing, a `Persistence` failure stored nothing, and
/// the last two leave a booking stored without a reference.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("Invalid booking: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to persist booking: {0}")]
    Persistence(#[from] BookingStoreError),

    #[error("Failed to allocate booking reference: {0}")]
    Allocation(#[from] AllocationError),

    #[error("Failed to persist booking reference: {0}")]
    ReferencePersistence(#[from] ReferenceStoreError),
}

impl BookingError {
    /// `true` when the caller sent a bad request (4xx), `false` for infrastructure
    /// failures (5xx).
    pub fn is_client_error(&self) -> bool {
        matches!(self, BookingError::Validation(_))
    }
}
