use booking_reference::clients::ActorClient;
use booking_reference::counter::{ReferenceCounterStore, SledCounterStore};
use booking_reference::domain::{BookingReferenceDto, BookingRequest};
use booking_reference::lifecycle::config::{
    BOOKING_COUNTER_DB, BOOKING_MAILBOX_SIZE, CAPACITY_SERVICE_URL,
};
use booking_reference::lifecycle::{AppConfig, BookingSystem};
use std::collections::HashMap;
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(capacity: &MockServer, db: &Path) -> AppConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        (CAPACITY_SERVICE_URL, format!("{}/capacity", capacity.uri())),
        (BOOKING_COUNTER_DB, db.display().to_string()),
        (BOOKING_MAILBOX_SIZE, "4".to_string()),
    ]);
    AppConfig::from_lookup(|key| vars.get(key).cloned()).expect("valid configuration")
}

/// Full end-to-end test: configuration, sled counter, real actors, HTTP capacity service.
#[tokio::test]
async fn test_full_booking_system_integration() {
    let capacity = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/capacity"))
        .respond_with(ResponseTemplate::new(200).set_body_string("3"))
        .expect(1)
        .mount(&capacity)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("counters");
    let config = config(&capacity, &db_path);

    let system = BookingSystem::from_config(&config)
        .await
        .expect("system should start");

    let request = BookingRequest::new("Hamburg", "New York", "REEFER", 40, 2);

    let availability = system
        .availability
        .check_availability(request.clone())
        .await
        .expect("capacity service should answer");
    assert!(availability.available);

    let first = system
        .pipeline
        .create_booking(request.clone())
        .await
        .expect("booking should succeed");
    let second = system
        .pipeline
        .create_booking(request)
        .await
        .expect("booking should succeed");
    assert_eq!(first.formatted_code, "0000000000000000001");
    assert_eq!(second.formatted_code, "0000000000000000002");

    // Every reference points at a stored booking
    let stored = system
        .references
        .get(first.booking_id)
        .await
        .unwrap()
        .expect("reference stored");
    assert_eq!(BookingReferenceDto::from(stored.clone()), first);
    let booking = system
        .bookings
        .get(stored.booking_id)
        .await
        .unwrap()
        .expect("booking stored");
    assert_eq!(booking.destination, "New York");

    system.shutdown().await.expect("clean shutdown");

    // The counter outlives the process
    let store = SledCounterStore::open(&db_path).unwrap();
    assert_eq!(
        store.read_latest(&config.sequence).await.unwrap(),
        Some(2)
    );
}

#[tokio::test]
async fn test_restarted_system_continues_the_sequence() {
    let capacity = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("counters");
    let config = config(&capacity, &db_path);
    let request = BookingRequest::new("Hamburg", "New York", "DRY", 20, 1);

    let system = BookingSystem::from_config(&config).await.unwrap();
    let before = system.pipeline.create_booking(request.clone()).await.unwrap();
    system.shutdown().await.unwrap();

    let system = BookingSystem::from_config(&config).await.unwrap();
    let after = system.pipeline.create_booking(request).await.unwrap();
    system.shutdown().await.unwrap();

    assert_eq!(before.formatted_code, "0000000000000000001");
    assert_eq!(after.formatted_code, "0000000000000000002");
}
