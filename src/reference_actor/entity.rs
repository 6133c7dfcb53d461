//! Entity trait implementation for the BookingReference domain type.
//!
//! References are keyed by the booking they belong to, which gives the 1:1 shape for
//! free: the framework refuses a second reference for the same booking. The
//! `on_create` hook uses the injected [`BookingClient`] to refuse references to
//! bookings that do not exist.

use crate::clients::{ActorClient, BookingClient};
use crate::domain::{BookingId, BookingReference, BookingReferenceCreate, REFERENCE_WIDTH};
use crate::framework::ActorEntity;
use crate::reference_actor::ReferenceStoreError;
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
impl ActorEntity for BookingReference {
    type Id = BookingId;
    type Create = BookingReferenceCreate;
    type Context = BookingClient;
    type Error = ReferenceStoreError;

    fn natural_id(params: &BookingReferenceCreate) -> Option<BookingId> {
        Some(params.booking_id)
    }

    fn from_create_params(
        id: BookingId,
        params: BookingReferenceCreate,
    ) -> Result<Self, Self::Error> {
        let code = params.formatted_code;
        if code.len() != REFERENCE_WIDTH || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ReferenceStoreError::InvalidCode(code));
        }
        Ok(Self {
            formatted_code: code,
            booking_id: id,
        })
    }

    async fn on_create(&mut self, bookings: &BookingClient) -> Result<(), Self::Error> {
        debug!(booking_id = %self.booking_id, "Checking booking exists");
        match bookings.get(self.booking_id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(ReferenceStoreError::UnknownBooking(self.booking_id)),
            Err(e) => Err(ReferenceStoreError::ActorCommunicationError(e.to_string())),
        }
    }
}
