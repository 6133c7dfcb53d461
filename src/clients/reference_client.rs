use crate::clients::actor_client::ActorClient;
use crate::domain::{BookingId, BookingReference, BookingReferenceCreate};
use crate::framework::{FrameworkError, ResourceClient};
use crate::reference_actor::ReferenceStoreError;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the BookingReference store actor.
#[derive(Clone)]
pub struct BookingReferenceClient {
    inner: ResourceClient<BookingReference>,
}

impl BookingReferenceClient {
    pub fn new(inner: ResourceClient<BookingReference>) -> Self {
        Self { inner }
    }

    /// Persists the reference issued for a booking.
    #[instrument(skip(self, params), fields(booking_id = %params.booking_id))]
    pub async fn create_reference(
        &self,
        params: BookingReferenceCreate,
    ) -> Result<BookingId, ReferenceStoreError> {
        debug!(code = %params.formatted_code, "Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<BookingReference> for BookingReferenceClient {
    type Error = ReferenceStoreError;

    fn inner(&self) -> &ResourceClient<BookingReference> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
                ReferenceStoreError::ActorCommunicationError(e.to_string())
            }
            FrameworkError::AlreadyExists(id) => ReferenceStoreError::AlreadyReferenced(id),
            // Hook and construction errors come back boxed; recover the typed error.
            FrameworkError::EntityError(inner) => match inner.downcast::<ReferenceStoreError>() {
                Ok(typed) => *typed,
                Err(other) => ReferenceStoreError::StoreError(other.to_string()),
            },
            other => ReferenceStoreError::StoreError(other.to_string()),
        }
    }
}
