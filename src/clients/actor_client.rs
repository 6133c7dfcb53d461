use crate::framework::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for store-specific clients to inherit the standard read operations.
///
/// This trait reduces boilerplate by providing default implementations for
/// `get` and `list` on top of the wrapped [`ResourceClient`].
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The store-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific store error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a record by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every stored record, in no particular order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }
}
