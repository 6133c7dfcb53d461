//! [`CapacityClient`] backed by an HTTP capacity service.

use crate::availability::{AvailabilityError, CapacityClient};
use crate::domain::BookingRequest;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

/// POSTs the booking fields as JSON and expects a JSON integer back.
#[derive(Debug, Clone)]
pub struct HttpCapacityClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpCapacityClient {
    /// Builds a client for `endpoint`; `timeout` bounds each whole request.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, AvailabilityError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AvailabilityError::Transport(e.to_string()))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CapacityClient for HttpCapacityClient {
    #[instrument(skip(self, request), fields(endpoint = %self.endpoint))]
    async fn containers_available(&self, request: &BookingRequest) -> Result<i64, AvailabilityError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Capacity request failed");
                AvailabilityError::Transport(e.to_string())
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Unexpected capacity response");
            return Err(AvailabilityError::InvalidResponse {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AvailabilityError::Transport(e.to_string()))?;
        let count: i64 = serde_json::from_str(body.trim())
            .map_err(|e| AvailabilityError::MalformedBody(format!("{e}: {body:?}")))?;

        debug!(count, "Capacity received");
        Ok(count)
    }
}
