//! Generic actor framework for the in-process record stores.
//!
//! This module provides the building blocks for type-safe, single-owner stores of
//! immutable records: one Tokio task owns the records, everyone else talks to it
//! through a cloneable client.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that record types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns the records
//! - [`ResourceClient`] - Type-safe handle used to create, get and list records
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use core::*;
