//! Field rules shared by booking creation and availability checks.

pub mod error;

pub use error::*;

use crate::domain::{BookingRequest, ContainerSize};
use std::ops::RangeInclusive;

/// Allowed length (in characters) of origin and destination.
pub const PLACE_LENGTH: RangeInclusive<usize> = 5..=20;

/// Allowed number of containers per booking.
pub const QUANTITY: RangeInclusive<u32> = 1..=100;

/// Structural checks applied before anything touches a store or the network.
///
/// Rules, checked in this order:
/// - `containerType` present and not blank
/// - `origin` and `destination` between 5 and 20 characters
/// - `containerSize` is 20 or 40
/// - `quantity` between 1 and 100
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingValidator;

impl BookingValidator {
    /// Returns the request unchanged when every rule holds.
    pub fn validate(&self, request: BookingRequest) -> Result<BookingRequest, ValidationError> {
        self.check(&request)?;
        Ok(request)
    }

    pub fn check(&self, request: &BookingRequest) -> Result<(), ValidationError> {
        match request.container_type.as_deref() {
            Some(kind) if !kind.trim().is_empty() => {}
            _ => return Err(ValidationError::MissingContainerType),
        }

        let origin = request.origin.chars().count();
        if !PLACE_LENGTH.contains(&origin) {
            return Err(ValidationError::OriginLength(origin));
        }

        let destination = request.destination.chars().count();
        if !PLACE_LENGTH.contains(&destination) {
            return Err(ValidationError::DestinationLength(destination));
        }

        if ContainerSize::from_feet(request.container_size).is_none() {
            return Err(ValidationError::ContainerSize(request.container_size));
        }

        if !QUANTITY.contains(&request.quantity) {
            return Err(ValidationError::Quantity(request.quantity));
        }

        Ok(())
    }
}
