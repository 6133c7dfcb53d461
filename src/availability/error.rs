//! Error types for availability checks.

use crate::validation::ValidationError;
use thiserror::Error;

/// Failure of a single availability check. Nothing here is retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AvailabilityError {
    /// The request broke a booking rule and never reached the capacity service.
    #[error("Invalid availability request: {0}")]
    Validation(#[from] ValidationError),

    /// The capacity service answered with something other than HTTP 200.
    #[error("Capacity service returned HTTP {status}")]
    InvalidResponse { status: u16 },

    /// The capacity service answered HTTP 200 but the body is not an integer count.
    #[error("Capacity service returned a malformed body: {0}")]
    MalformedBody(String),

    /// The request could not be delivered or the response could not be read.
    #[error("Capacity service unreachable: {0}")]
    Transport(String),
}

impl AvailabilityError {
    /// `true` when the capacity service itself misbehaved.
    pub fn is_invalid_response(&self) -> bool {
        matches!(
            self,
            AvailabilityError::InvalidResponse { .. } | AvailabilityError::MalformedBody(_)
        )
    }
}
