//! Demo runner.
//!
//! Loads configuration (a `.env` file is honoured), starts the [`BookingSystem`],
//! checks availability for a sample request, books it and shuts down.
//!
//! ```bash
//! CAPACITY_SERVICE_URL=http://localhost:8080/capacity RUST_LOG=info cargo run
//! ```

use booking_reference::domain::BookingRequest;
use booking_reference::lifecycle::{setup_tracing, AppConfig, BookingSystem};
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // A missing .env file is fine; the process environment still applies.
    let _ = dotenvy::dotenv();
    setup_tracing();

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        e.to_string()
    })?;
    info!(endpoint = %config.capacity_url, sequence = %config.sequence, "Starting booking system");

    let system = BookingSystem::from_config(&config)
        .await
        .map_err(|e| e.to_string())?;

    let request = BookingRequest::new("Southampton", "Singapore", "DRY", 20, 5);

    let span = tracing::info_span!("availability_check");
    let availability = async {
        info!("Asking capacity service");
        system.availability.check_availability(request.clone()).await
    }
    .instrument(span)
    .await;

    match availability {
        Ok(dto) => info!(available = dto.available, "Availability checked"),
        Err(e) => warn!(error = %e, "Availability check failed"),
    }

    let span = tracing::info_span!("booking_creation");
    let booking = async {
        info!("Creating booking");
        system.pipeline.create_booking(request).await
    }
    .instrument(span)
    .await;

    match booking {
        Ok(dto) => info!(booking_id = %dto.booking_id, code = %dto.formatted_code, "Booking confirmed"),
        Err(e) => error!(error = %e, client_error = e.is_client_error(), "Booking failed"),
    }

    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Application completed successfully");
    Ok(())
}
