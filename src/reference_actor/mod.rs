//! # Booking Reference Store
//!
//! Persists the reference issued for each booking.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for
//!   [`BookingReference`]
//! - [`error`] - [`ReferenceStoreError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Dependencies
//!
//! The actor is started with a [`BookingClient`](crate::clients::BookingClient) as its
//! context, so it can confirm the referenced booking exists:
//!
//! ```rust,ignore
//! let (booking_actor, bookings) = booking_actor::new(32);
//! let (reference_actor, references) = reference_actor::new(32);
//! tokio::spawn(booking_actor.run(()));
//! tokio::spawn(reference_actor.run(bookings.clone()));
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::BookingReferenceClient;
use crate::domain::BookingReference;
use crate::framework::ResourceActor;

/// Creates a new BookingReference actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<BookingReference>, BookingReferenceClient) {
    let (actor, generic_client) = ResourceActor::keyed(buffer_size);
    (actor, BookingReferenceClient::new(generic_client))
}
