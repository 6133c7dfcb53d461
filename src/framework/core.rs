//! # Core Actor Framework
//!
//! This module defines the generic building blocks for the in-process record stores.
//!
//! ## Key Types
//!
//! - [`ActorEntity`]: The trait that all stored record types must implement.
//! - [`ResourceActor`]: The generic actor that owns a collection of records.
//! - [`ResourceClient`]: The generic client for communicating with actors.
//! - [`FrameworkError`]: Common errors (e.g., ActorClosed, AlreadyExists).

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any record type must implement to be managed by [`ResourceActor`].
///
/// # Architecture Note
/// Bookings and booking references are both "persist once, read many" records.
/// By describing them through one contract we write the store loop *once*.
///
/// # Identity
/// Records either get a generated id (the actor's id function) or carry a
/// *natural* id derived from their creation payload via [`ActorEntity::natural_id`].
/// Natural ids are unique per store: a second create with the same id is rejected
/// with [`FrameworkError::AlreadyExists`].
///
/// # Async & Context
/// `on_create` is async and receives the injected `Context`, so a record can consult
/// other actors (e.g. check that the booking it points to exists) before it is stored.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this record.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// Record-specific error returned from construction and hooks.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Id derived from the creation payload. `None` means "let the actor generate one".
    fn natural_id(_params: &Self::Create) -> Option<Self::Id> {
        None
    }

    /// Construct the full record from the id and payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after construction and before the record is stored.
    /// Returning an error aborts the create; nothing is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("No id available for new item")]
    MissingId,
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor.
///
/// Records are immutable once stored, so the protocol is create + read only.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

type IdFn<Id> = Box<dyn Fn() -> Id + Send + Sync>;

/// The generic actor that manages a collection of records.
///
/// **Concurrency Model**:
/// Each `ResourceActor` processes its own messages *sequentially* in a loop, so the
/// `store` needs no `Mutex`. Exclusive ownership of state within the task is the lock.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Option<IdFn<T::Id>>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates an actor that generates ids with `next_id_fn` (unless the record
    /// supplies a natural id).
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        Self::build(buffer_size, Some(Box::new(next_id_fn)))
    }

    /// Creates an actor for records that always carry a natural id.
    pub fn keyed(buffer_size: usize) -> (Self, ResourceClient<T>) {
        Self::build(buffer_size, None)
    }

    fn build(buffer_size: usize, next_id_fn: Option<IdFn<T::Id>>) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is handed to every `on_create` hook. Dependencies
    /// (like other clients) can therefore be created *after* the actor itself.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Booking" instead of "booking_reference::domain::Booking")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(entity_type, params, &context).await;
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let items: Vec<T> = self.store.values().cloned().collect();
                    debug!(entity_type, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        entity_type: &str,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T::Id, FrameworkError> {
        let id = T::natural_id(&params)
            .or_else(|| self.next_id_fn.as_ref().map(|next| next()))
            .ok_or(FrameworkError::MissingId)?;

        if self.store.contains_key(&id) {
            warn!(entity_type, %id, "Already exists");
            return Err(FrameworkError::AlreadyExists(id.to_string()));
        }

        let mut item = T::from_create_params(id.clone(), params).map_err(|e| {
            warn!(entity_type, error = %e, "Create failed");
            FrameworkError::EntityError(Box::new(e))
        })?;

        if let Err(e) = item.on_create(context).await {
            warn!(entity_type, %id, error = %e, "on_create failed");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }

        self.store.insert(id.clone(), item);
        info!(entity_type, %id, size = self.store.len(), "Created");
        Ok(id)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for interacting with a `ResourceActor`.
///
/// Holds only a sender, so cloning is cheap and clones can be shared across tasks.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Create { params, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Get { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::List { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
