//! Error types for reference allocation.

use thiserror::Error;

/// Errors surfaced by [`ReferenceAllocator`](crate::allocator::ReferenceAllocator).
///
/// Compare-and-swap conflicts never appear here; they are retried inside the allocator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AllocationError {
    /// The sequence row was never provisioned. A configuration problem, not retried.
    #[error("Reference sequence not provisioned: {0}")]
    UnknownSequence(String),

    /// The next value would not fit in 19 digits.
    #[error("Reference sequence exhausted: {0}")]
    Exhausted(String),

    /// The counter store failed. Surfaced as-is; retry policy belongs to the caller.
    #[error("Counter store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Counter store returned a corrupt value: {0}")]
    CorruptCounter(String),

    #[error("Allocator closed")]
    AllocatorClosed,

    #[error("Allocator dropped response channel")]
    AllocatorDropped,
}
