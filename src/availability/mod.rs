//! # Availability
//!
//! Answers "is at least one matching container available?" by asking an external
//! capacity service. Requests are validated with the same rules as booking creation
//! first, so an invalid request never reaches the network.
//!
//! - [`CapacityClient`] - the seam to the capacity service
//! - [`http::HttpCapacityClient`] - the reqwest implementation
//! - [`AvailabilityChecker`] - validation plus the `count > 0` decision

pub mod error;
pub mod http;

pub use error::*;
pub use http::HttpCapacityClient;

use crate::domain::{AvailabilityDto, BookingRequest};
use crate::validation::BookingValidator;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Source of container counts for a booking request.
#[async_trait]
pub trait CapacityClient: Send + Sync {
    /// Number of containers matching `request`. One attempt, no retries.
    async fn containers_available(&self, request: &BookingRequest) -> Result<i64, AvailabilityError>;
}

/// Validates requests and turns a capacity count into a yes/no answer.
#[derive(Clone)]
pub struct AvailabilityChecker {
    capacity: Arc<dyn CapacityClient>,
    validator: BookingValidator,
}

impl AvailabilityChecker {
    pub fn new(capacity: Arc<dyn CapacityClient>) -> Self {
        Self {
            capacity,
            validator: BookingValidator,
        }
    }

    #[instrument(skip(self, request))]
    pub async fn check_availability(
        &self,
        request: BookingRequest,
    ) -> Result<AvailabilityDto, AvailabilityError> {
        debug!(?request, "check_availability called");
        self.validator.check(&request)?;

        let count = self.capacity.containers_available(&request).await?;
        let available = count > 0;
        info!(count, available, "Availability checked");
        Ok(AvailabilityDto { available })
    }
}
