//! Entity trait implementation for the Booking domain type.
//!
//! Bookings need no dependencies and no hooks: the payload was validated before it
//! reached the store, so construction cannot fail.

use crate::booking_actor::BookingStoreError;
use crate::domain::{Booking, BookingCreate, BookingId};
use crate::framework::ActorEntity;
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Booking {
    type Id = BookingId;
    type Create = BookingCreate;
    type Context = ();
    type Error = BookingStoreError;

    fn from_create_params(id: BookingId, params: BookingCreate) -> Result<Self, Self::Error> {
        Ok(Self::new(id, params))
    }
}
