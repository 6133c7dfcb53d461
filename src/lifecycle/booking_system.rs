use crate::allocator::{AllocatorActor, ReferenceAllocator};
use crate::availability::{AvailabilityChecker, AvailabilityError, CapacityClient, HttpCapacityClient};
use crate::clients::{BookingClient, BookingReferenceClient};
use crate::counter::{CounterError, InMemoryCounterStore, ReferenceCounterStore, SledCounterStore};
use crate::lifecycle::config::{AppConfig, DEFAULT_SEQUENCE};
use crate::pipeline::BookingPipeline;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Errors raised while starting or stopping the [`BookingSystem`].
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Counter store unavailable: {0}")]
    Counter(#[from] CounterError),

    #[error("Capacity client setup failed: {0}")]
    Capacity(#[from] AvailabilityError),

    #[error("Invalid system settings: {0}")]
    InvalidSettings(String),

    #[error("Actor task failed: {0}")]
    ActorFailed(String),
}

/// Knobs for [`BookingSystem::start`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemSettings {
    /// Sequence the booking references are drawn from.
    pub sequence: String,
    /// Channel capacity of every actor. Must be non-zero.
    pub mailbox_size: usize,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            sequence: DEFAULT_SEQUENCE.to_string(),
            mailbox_size: 32,
        }
    }
}

impl From<&AppConfig> for SystemSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            sequence: config.sequence.clone(),
            mailbox_size: config.mailbox_size,
        }
    }
}

/// The running booking service.
///
/// `BookingSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the store and allocator actors
/// - **Dependency Wiring**: The reference store gets a `BookingClient` so it can check
///   that a booking exists; the pipeline gets both store clients and the allocator
/// - **Provisioning**: The reference sequence is created in the counter store at startup
///
/// # Example
///
/// ```ignore
/// let config = AppConfig::from_env()?;
/// let system = BookingSystem::from_config(&config).await?;
///
/// let reference = system.pipeline.create_booking(request).await?;
/// let availability = system.availability.check_availability(request).await?;
///
/// system.shutdown().await?;
/// ```
pub struct BookingSystem {
    /// Entry point for booking creation
    pub pipeline: BookingPipeline,

    /// Entry point for availability checks
    pub availability: AvailabilityChecker,

    /// Client for the Booking store
    pub bookings: BookingClient,

    /// Client for the BookingReference store
    pub references: BookingReferenceClient,

    /// Handle to this process's allocator
    pub allocator: ReferenceAllocator,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl BookingSystem {
    /// Builds the counter store and capacity client described by `config`, then starts
    /// the system.
    pub async fn from_config(config: &AppConfig) -> Result<Self, SystemError> {
        let store: Arc<dyn ReferenceCounterStore> = match &config.counter_db {
            Some(path) => {
                info!(path = %path.display(), "Opening counter store");
                Arc::new(SledCounterStore::open(path)?)
            }
            None => {
                info!("Using in-memory counter store");
                Arc::new(InMemoryCounterStore::new())
            }
        };
        let capacity = HttpCapacityClient::new(config.capacity_url.clone(), config.capacity_timeout)?;
        info!(endpoint = %capacity.endpoint(), timeout = ?config.capacity_timeout, "Capacity client ready");

        Self::start(store, Arc::new(capacity), SystemSettings::from(config)).await
    }

    /// Provisions the reference sequence and spawns every actor.
    ///
    /// Several systems may share one `store`; each behaves like a separate node.
    ///
    /// # Errors
    /// [`SystemError::InvalidSettings`] for a zero `mailbox_size`, before anything is
    /// provisioned or spawned.
    pub async fn start(
        store: Arc<dyn ReferenceCounterStore>,
        capacity: Arc<dyn CapacityClient>,
        settings: SystemSettings,
    ) -> Result<Self, SystemError> {
        if settings.mailbox_size == 0 {
            return Err(SystemError::InvalidSettings(
                "mailbox_size must be at least 1".into(),
            ));
        }

        let created = store.provision(&settings.sequence).await?;
        info!(sequence = %settings.sequence, created, "Sequence provisioned");

        // 1. Create actors
        let (booking_actor, bookings) = crate::booking_actor::new(settings.mailbox_size);
        let (reference_actor, references) = crate::reference_actor::new(settings.mailbox_size);
        let (allocator_actor, allocator) = AllocatorActor::new(settings.mailbox_size, store);

        // 2. Start actors with injected context
        let booking_handle = tokio::spawn(booking_actor.run(()));
        let reference_handle = tokio::spawn(reference_actor.run(bookings.clone()));
        let allocator_handle = tokio::spawn(allocator_actor.run());

        let pipeline = BookingPipeline::new(
            bookings.clone(),
            references.clone(),
            allocator.clone(),
            settings.sequence,
        );

        Ok(Self {
            pipeline,
            availability: AvailabilityChecker::new(capacity),
            bookings,
            references,
            allocator,
            handles: vec![booking_handle, reference_handle, allocator_handle],
        })
    }

    /// Gracefully shuts down the system.
    ///
    /// Drops every client held here and waits for the actor tasks to drain. Clones of
    /// the pipeline or clients held elsewhere keep their actors alive, so drop them
    /// first.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        drop(self.pipeline);
        drop(self.bookings);
        drop(self.references);
        drop(self.allocator);

        // The reference store holds a BookingClient, so the booking store closes last.
        // Every handle is awaited even after a failure; the first one is reported.
        let mut failure = None;
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                failure.get_or_insert(SystemError::ActorFailed(e.to_string()));
            }
        }

        match failure {
            Some(e) => Err(e),
            None => {
                info!("System shutdown complete.");
                Ok(())
            }
        }
    }
}
