use crate::booking_actor::BookingStoreError;
use crate::clients::actor_client::ActorClient;
use crate::domain::{Booking, BookingCreate, BookingId};
use crate::framework::{FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Booking store actor.
#[derive(Clone)]
pub struct BookingClient {
    inner: ResourceClient<Booking>,
}

impl BookingClient {
    pub fn new(inner: ResourceClient<Booking>) -> Self {
        Self { inner }
    }

    /// Persists a validated booking and returns its assigned id.
    #[instrument(skip(self, params))]
    pub async fn create_booking(&self, params: BookingCreate) -> Result<BookingId, BookingStoreError> {
        debug!(?params, "Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Booking> for BookingClient {
    type Error = BookingStoreError;

    fn inner(&self) -> &ResourceClient<Booking> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
                BookingStoreError::ActorCommunicationError(e.to_string())
            }
            other => BookingStoreError::StoreError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContainerSize;
    use crate::framework::mock::MockClient;

    fn params() -> BookingCreate {
        BookingCreate {
            origin: "Southampton".into(),
            destination: "Singapore".into(),
            container_type: "DRY".into(),
            container_size: ContainerSize::Twenty,
            quantity: 5,
        }
    }

    #[tokio::test]
    async fn test_create_booking_returns_assigned_id() {
        let mut mock = MockClient::<Booking>::new();
        mock.expect_create().return_ok(BookingId(9));

        let client = BookingClient::new(mock.client());
        assert_eq!(client.create_booking(params()).await.unwrap(), BookingId(9));
        assert_eq!(mock.create_calls(), 1);
        mock.verify();
    }

    #[tokio::test]
    async fn test_store_failure_maps_to_store_error() {
        let mut mock = MockClient::<Booking>::new();
        mock.expect_create()
            .return_err(FrameworkError::EntityError(Box::new(std::io::Error::other(
                "disk full",
            ))));

        let client = BookingClient::new(mock.client());
        match client.create_booking(params()).await {
            Err(BookingStoreError::StoreError(msg)) => assert!(msg.contains("disk full")),
            other => panic!("Expected StoreError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_closed_actor_maps_to_communication_error() {
        let mut mock = MockClient::<Booking>::new();
        mock.expect_create().return_err(FrameworkError::ActorClosed);

        let client = BookingClient::new(mock.client());
        assert!(matches!(
            client.create_booking(params()).await,
            Err(BookingStoreError::ActorCommunicationError(_))
        ));
    }

    #[tokio::test]
    async fn test_list_returns_stored_bookings() {
        let mut mock = MockClient::<Booking>::new();
        mock.expect_list().return_ok(vec![
            Booking::new(BookingId(1), params()),
            Booking::new(BookingId(2), params()),
        ]);

        let client = BookingClient::new(mock.client());
        let ids: Vec<_> = client.list().await.unwrap().into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![BookingId(1), BookingId(2)]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_list_on_dropped_actor_maps_to_communication_error() {
        let mut mock = MockClient::<Booking>::new();
        mock.expect_list().return_err(FrameworkError::ActorDropped);

        let client = BookingClient::new(mock.client());
        assert!(matches!(
            client.list().await,
            Err(BookingStoreError::ActorCommunicationError(_))
        ));
        mock.verify();
    }
}
