#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Booking Reference Service
//!
//! > **Container bookings with unique, gap-free, 19 digit references.**
//!
//! A booking request is validated, persisted, given the next value of a named sequence
//! and answered with a zero-padded reference such as `0000000000000000042`. A second
//! entry point asks an external capacity service whether matching containers exist.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Actors own state
//! Every piece of mutable state belongs to exactly one Tokio task. Bookings and their
//! references live in generic [`ResourceActor`](framework::ResourceActor)s; the
//! allocation critical section lives in the [`AllocatorActor`](allocator::AllocatorActor).
//! Nobody else touches that state, so there are no locks around it.
//!
//! ### Optimistic concurrency across nodes
//! Several processes may share one counter store. Inside a process the allocator serves
//! one request at a time; across processes correctness rests entirely on the store's
//! compare-and-swap. A lost race is retried in a loop until it wins.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Each component defines its own `thiserror` enum (`ValidationError`, `CounterError`,
//! `AllocationError`, ...). The pipeline folds them into one
//! [`BookingError`](pipeline::BookingError) with `#[from]`, so a request ends with
//! exactly one success or exactly one failure.
//!
//! ### 2. Async Context Injection
//! The reference store is started with a [`BookingClient`](clients::BookingClient) as its
//! context and refuses references to bookings that do not exist.
//!
//! ### 3. No rollback
//! A booking whose reference could not be allocated stays persisted. The window is
//! logged at `warn` and surfaced as an error.
//!
//! ### 4. Observability
//! `tracing` everywhere, see [`lifecycle::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`], [`counter`], [`allocator`])
//! - [`framework`]: generic record store actor plus [`MockClient`](framework::mock::MockClient)
//! - [`counter`]: the [`ReferenceCounterStore`](counter::ReferenceCounterStore) seam with
//!   in-memory and sled implementations
//! - [`allocator`]: [`ReferenceAllocator::allocate_next`](allocator::ReferenceAllocator::allocate_next)
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! - **Key items**: [`AppConfig`](lifecycle::AppConfig), [`BookingSystem`](lifecycle::BookingSystem),
//!   [`shutdown`](lifecycle::BookingSystem::shutdown).
//!
//! ### 3. The Interface ([`pipeline`], [`availability`], [`clients`])
//! - [`BookingPipeline::create_booking`](pipeline::BookingPipeline::create_booking)
//! - [`AvailabilityChecker::check_availability`](availability::AvailabilityChecker::check_availability)
//!
//! ### 4. The Records ([`domain`], [`validation`], [`booking_actor`], [`reference_actor`])
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! CAPACITY_SERVICE_URL=http://localhost:8080/capacity RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod allocator;
pub mod availability;
pub mod booking_actor;
pub mod clients;
pub mod counter;
pub mod domain;
pub mod framework;
pub mod lifecycle;
pub mod pipeline;
pub mod reference_actor;
pub mod validation;
