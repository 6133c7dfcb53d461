//! # Reference Allocator
//!
//! Hands out the next value of a named sequence, exactly once, to concurrent callers
//! in this process and to other processes sharing the same counter store.
//!
//! ## Structure
//!
//! - [`actor`] - [`AllocatorActor`], the task that owns the allocation critical section
//! - [`client`] - [`ReferenceAllocator`], the cloneable handle callers use
//! - [`error`] - [`AllocationError`]
//!
//! ## Two layers of exclusion
//!
//! Inside one process the actor serves one request at a time, which plays the role of
//! a process-wide lock around "read latest, swap in latest + 1". Across processes there
//! is no lock at all: correctness rests on the store's compare-and-swap, and a lost
//! race is simply retried.
//!
//! ## Usage
//!
//! ```rust
//! use booking_reference::allocator;
//! use booking_reference::counter::InMemoryCounterStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = Arc::new(InMemoryCounterStore::with_sequence("ContainerBookingReference", 0));
//!     let (actor, allocator) = allocator::new(store);
//!     tokio::spawn(actor.run());
//!
//!     let reference = allocator.allocate_next("ContainerBookingReference").await.unwrap();
//!     assert_eq!(reference.formatted(), "0000000000000000001");
//! }
//! ```

pub mod actor;
pub mod client;
pub mod error;

pub use actor::AllocatorActor;
pub use client::ReferenceAllocator;
pub use error::*;

use crate::counter::ReferenceCounterStore;
use std::sync::Arc;

/// Creates a new allocator actor and its handle.
pub fn new(store: Arc<dyn ReferenceCounterStore>) -> (AllocatorActor, ReferenceAllocator) {
    AllocatorActor::new(32, store)
}
