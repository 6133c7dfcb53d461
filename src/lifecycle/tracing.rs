//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: `Actor started` / `Shutdown` per store, `Allocator started` /
//!   `Allocator shutdown` with the number of references issued
//! - **Allocation**: every compare-and-swap conflict at `debug` with the attempt number,
//!   every issued reference at `info`
//! - **Request Flow**: spans for `create_booking`, `check_availability` and
//!   `allocate_next`, full payloads once at `debug`
//! - **Failures**: rejected requests, store outages and bookings left without a
//!   reference at `warn`
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=debug cargo run
//! RUST_LOG=booking_reference::allocator=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Sequence provisioned sequence=ContainerBookingReference created=true
//! INFO Created entity_type="Booking" id=1 size=1
//! INFO create_booking:allocate_next: Reference allocated sequence="ContainerBookingReference" reference=0000000000000000001 attempt=1
//! INFO Created entity_type="BookingReference" id=1 size=1
//! INFO create_booking: Booking created booking_id=1 code=0000000000000000001
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type and sequence fields carry the context
        .compact()
        .init();
}
