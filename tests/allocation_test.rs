use async_trait::async_trait;
use booking_reference::allocator::{self, AllocatorActor, ReferenceAllocator};
use booking_reference::counter::{
    CounterError, InMemoryCounterStore, ReferenceCounterStore, SledCounterStore,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const SEQUENCE: &str = "ContainerBookingReference";

/// Starts one allocator per "node", all sharing `store`.
fn nodes(store: Arc<dyn ReferenceCounterStore>, count: usize) -> Vec<ReferenceAllocator> {
    (0..count)
        .map(|_| {
            let (actor, allocator) = AllocatorActor::new(8, store.clone());
            tokio::spawn(actor.run());
            allocator
        })
        .collect()
}

/// Fires `calls` concurrent allocations spread round-robin over `allocators`.
async fn allocate_concurrently(allocators: &[ReferenceAllocator], calls: usize) -> Vec<u64> {
    let tasks: Vec<_> = (0..calls)
        .map(|i| {
            let allocator = allocators[i % allocators.len()].clone();
            tokio::spawn(async move { allocator.allocate_next(SEQUENCE).await })
        })
        .collect();

    let mut values = Vec::with_capacity(calls);
    for task in tasks {
        values.push(task.await.unwrap().unwrap().value());
    }
    values.sort_unstable();
    values
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_allocations_in_one_process_are_contiguous() {
    let store = Arc::new(InMemoryCounterStore::with_sequence(SEQUENCE, 100));
    let allocators = nodes(store.clone(), 1);

    let values = allocate_concurrently(&allocators, 50).await;

    assert_eq!(values, (101..=150).collect::<Vec<u64>>());
    assert_eq!(store.read_latest(SEQUENCE).await.unwrap(), Some(150));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_allocations_across_nodes_are_unique_and_gap_free() {
    let store = Arc::new(InMemoryCounterStore::with_sequence(SEQUENCE, 0));
    let allocators = nodes(store.clone(), 4);

    let values = allocate_concurrently(&allocators, 200).await;

    assert_eq!(values, (1..=200).collect::<Vec<u64>>());
    assert_eq!(store.read_latest(SEQUENCE).await.unwrap(), Some(200));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_nodes_sharing_a_sled_database_never_collide() {
    let dir = tempfile::tempdir().unwrap();
    let db = sled::open(dir.path()).unwrap();

    let first = SledCounterStore::from_db(&db).unwrap();
    first.provision(SEQUENCE).await.unwrap();

    let allocators: Vec<_> = (0..3)
        .flat_map(|_| {
            let store: Arc<dyn ReferenceCounterStore> =
                Arc::new(SledCounterStore::from_db(&db).unwrap());
            nodes(store, 1)
        })
        .collect();

    let values = allocate_concurrently(&allocators, 30).await;

    assert_eq!(values, (1..=30).collect::<Vec<u64>>());
    assert_eq!(first.read_latest(SEQUENCE).await.unwrap(), Some(30));
}

/// Store wrapper where another node sneaks in a write right before the next
/// `rivals` swaps, so each of them loses.
struct RivalWriter {
    inner: InMemoryCounterStore,
    rivals: AtomicUsize,
    lost_reads: Mutex<Vec<u64>>,
}

impl RivalWriter {
    fn new(latest: u64, rivals: usize) -> Self {
        Self {
            inner: InMemoryCounterStore::with_sequence(SEQUENCE, latest),
            rivals: AtomicUsize::new(rivals),
            lost_reads: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ReferenceCounterStore for RivalWriter {
    async fn read_latest(&self, sequence: &str) -> Result<Option<u64>, CounterError> {
        self.inner.read_latest(sequence).await
    }

    async fn compare_and_swap(
        &self,
        sequence: &str,
        expected: u64,
        new: u64,
    ) -> Result<(), CounterError> {
        let rival_pending = self
            .rivals
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if rival_pending {
            self.inner
                .compare_and_swap(sequence, expected, expected + 1)
                .await?;
            self.lost_reads.lock().unwrap().push(expected);
        }
        self.inner.compare_and_swap(sequence, expected, new).await
    }

    async fn provision(&self, sequence: &str) -> Result<bool, CounterError> {
        self.inner.provision(sequence).await
    }
}

#[tokio::test]
async fn test_conflict_is_retried_until_a_higher_value_wins() {
    let store = Arc::new(RivalWriter::new(10, 1));
    let (actor, allocator) = allocator::new(store.clone());
    tokio::spawn(actor.run());

    let reference = allocator.allocate_next(SEQUENCE).await.unwrap();

    let lost = store.lost_reads.lock().unwrap().clone();
    assert_eq!(lost, vec![10]);
    assert!(reference.value() > 10);
    // The rival took 11.
    assert_eq!(reference.value(), 12);
}

#[tokio::test]
async fn test_repeated_conflicts_are_absorbed() {
    let store = Arc::new(RivalWriter::new(0, 5));
    let (actor, allocator) = allocator::new(store.clone());
    tokio::spawn(actor.run());

    let reference = allocator.allocate_next(SEQUENCE).await.unwrap();

    assert_eq!(store.lost_reads.lock().unwrap().len(), 5);
    assert_eq!(reference.value(), 6);
    assert_eq!(reference.formatted(), "0000000000000000006");
    assert_eq!(allocator.current(SEQUENCE).await.unwrap(), 6);
}

#[tokio::test]
async fn test_reads_are_idempotent_between_allocations() {
    let store = Arc::new(InMemoryCounterStore::with_sequence(SEQUENCE, 7));
    let (actor, allocator) = allocator::new(store.clone());
    tokio::spawn(actor.run());

    assert_eq!(allocator.current(SEQUENCE).await.unwrap(), 7);
    assert_eq!(allocator.current(SEQUENCE).await.unwrap(), 7);

    allocator.allocate_next(SEQUENCE).await.unwrap();
    assert_eq!(allocator.current(SEQUENCE).await.unwrap(), 8);
    assert_eq!(allocator.current(SEQUENCE).await.unwrap(), 8);
}
