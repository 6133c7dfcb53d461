//! Error types for booking request validation.

use thiserror::Error;

/// A booking request broke one of the field rules.
///
/// Never retried; surfaced to the caller as a client error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Container type is required")]
    MissingContainerType,

    #[error("Origin length should be between 5 and 20, got {0}")]
    OriginLength(usize),

    #[error("Destination length should be between 5 and 20, got {0}")]
    DestinationLength(usize),

    #[error("Container size should be 20 or 40, got {0}")]
    ContainerSize(u32),

    #[error("Quantity should be between 1 and 100, got {0}")]
    Quantity(u32),
}
