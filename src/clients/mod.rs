//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod actor_client;
pub mod booking_client;
pub mod reference_client;

pub use actor_client::*;
pub use booking_client::*;
pub use reference_client::*;
