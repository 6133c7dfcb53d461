//! # Booking Pipeline
//!
//! Turns a [`BookingRequest`] into a persisted booking with its reference.
//!
//! ## Steps
//!
//! 1. Validate the request ([`BookingCreate::try_from`])
//! 2. Persist the booking ([`BookingClient::create_booking`])
//! 3. Allocate the next reference ([`ReferenceAllocator::allocate_next`])
//! 4. Persist the reference ([`BookingReferenceClient::create_reference`])
//! 5. Assemble the [`BookingReferenceDto`]
//!
//! Each step starts only after the previous one succeeded; the first failure ends the
//! request. There is no rollback: when step 3 or 4 fails the booking stays stored
//! without a reference.

pub mod error;

pub use error::*;

use crate::allocator::ReferenceAllocator;
use crate::clients::{BookingClient, BookingReferenceClient};
use crate::domain::{BookingCreate, BookingReferenceCreate, BookingReferenceDto, BookingRequest};
use tracing::{debug, info, instrument, warn};

/// Orchestrates booking creation across the stores and the allocator.
///
/// Cheap to clone; every request runs in the caller's task.
#[derive(Clone)]
pub struct BookingPipeline {
    bookings: BookingClient,
    references: BookingReferenceClient,
    allocator: ReferenceAllocator,
    sequence: String,
}

impl BookingPipeline {
    pub fn new(
        bookings: BookingClient,
        references: BookingReferenceClient,
        allocator: ReferenceAllocator,
        sequence: impl Into<String>,
    ) -> Self {
        Self {
            bookings,
            references,
            allocator,
            sequence: sequence.into(),
        }
    }

    #[instrument(skip(self, request))]
    pub async fn create_booking(
        &self,
        request: BookingRequest,
    ) -> Result<BookingReferenceDto, BookingError> {
        debug!(?request, "create_booking called");

        let params = BookingCreate::try_from(request)
            .inspect_err(|e| info!(error = %e, "Rejected booking request"))?;

        let booking_id = self.bookings.create_booking(params).await?;
        debug!(%booking_id, "Booking persisted");

        let reference = match self.allocator.allocate_next(&self.sequence).await {
            Ok(reference) => reference,
            Err(e) => {
                warn!(%booking_id, error = %e, "Booking persisted without reference");
                return Err(e.into());
            }
        };

        let code = reference.formatted();
        let params = BookingReferenceCreate {
            formatted_code: code.clone(),
            booking_id,
        };
        if let Err(e) = self.references.create_reference(params).await {
            warn!(%booking_id, %code, error = %e, "Booking persisted without reference");
            return Err(e.into());
        }

        info!(%booking_id, %code, "Booking created");
        Ok(BookingReferenceDto {
            formatted_code: code,
            booking_id,
        })
    }
}
