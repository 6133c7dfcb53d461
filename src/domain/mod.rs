//! Pure data structures: wire DTOs and the records managed by the store actors.

pub mod booking;
pub mod reference;

pub use booking::*;
pub use reference::*;
