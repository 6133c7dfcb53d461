use crate::domain::BookingId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Width of a formatted booking reference.
pub const REFERENCE_WIDTH: usize = 19;

/// Largest value that still fits in [`REFERENCE_WIDTH`] decimal digits.
/// Sequences stop here instead of widening the code.
pub const MAX_REFERENCE: u64 = 9_999_999_999_999_999_999;

/// A value issued by a reference sequence.
///
/// Always in `1..=MAX_REFERENCE`; renders as a zero-padded 19 digit string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReferenceNumber(u64);

impl ReferenceNumber {
    pub fn new(value: u64) -> Option<Self> {
        (1..=MAX_REFERENCE).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u64 {
        self.0
    }

    pub fn formatted(self) -> String {
        self.to_string()
    }
}

impl Display for ReferenceNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:0width$}", self.0, width = REFERENCE_WIDTH)
    }
}

/// The externally visible reference issued once per booking.
///
/// Stored keyed by its booking, so a booking holds at most one reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingReference {
    pub formatted_code: String,
    pub booking_id: BookingId,
}

/// Payload for persisting a booking reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingReferenceCreate {
    pub formatted_code: String,
    pub booking_id: BookingId,
}

/// Response returned to clients after a booking is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingReferenceDto {
    pub formatted_code: String,
    pub booking_id: BookingId,
}

impl From<BookingReference> for BookingReferenceDto {
    fn from(reference: BookingReference) -> Self {
        Self {
            formatted_code: reference.formatted_code,
            booking_id: reference.booking_id,
        }
    }
}

/// Response of an availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityDto {
    pub available: bool,
}
