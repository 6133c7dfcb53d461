//! Startup, configuration, shutdown and log setup.

pub mod booking_system;
pub mod config;
pub mod tracing;

pub use booking_system::*;
pub use config::{AppConfig, ConfigError};
pub use self::tracing::setup_tracing;
