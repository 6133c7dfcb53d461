//! Booking store: persists bookings and assigns their ids.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::BookingClient;
use crate::domain::{Booking, BookingId};
use crate::framework::ResourceActor;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Creates a new Booking actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Booking>, BookingClient) {
    let booking_id_counter = Arc::new(AtomicU64::new(1));
    let next_booking_id = move || BookingId(booking_id_counter.fetch_add(1, Ordering::SeqCst));

    let (actor, generic_client) = ResourceActor::new(buffer_size, next_booking_id);
    (actor, BookingClient::new(generic_client))
}
