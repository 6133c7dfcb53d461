use crate::counter::{CounterError, ReferenceCounterStore};
use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, info};

/// Name of the sled tree holding one row per sequence.
pub const COUNTER_TREE: &str = "reference_counters";

/// Durable counter store on top of sled.
///
/// Each row is `sequence name -> u64` (8 bytes, big-endian). Swaps use sled's own
/// atomic compare-and-swap and are flushed to disk before they are reported as done.
/// sled calls block, so every operation runs on the blocking thread pool.
#[derive(Clone)]
pub struct SledCounterStore {
    tree: sled::Tree,
}

impl SledCounterStore {
    /// Opens (or creates) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CounterError> {
        let path = path.as_ref();
        let db = sled::open(path).map_err(unavailable)?;
        info!(path = %path.display(), "Counter store opened");
        Self::from_db(&db)
    }

    /// Uses the counter tree of an already open database.
    pub fn from_db(db: &sled::Db) -> Result<Self, CounterError> {
        let tree = db.open_tree(COUNTER_TREE).map_err(unavailable)?;
        Ok(Self { tree })
    }

    async fn blocking<T, F>(&self, op: F) -> Result<T, CounterError>
    where
        F: FnOnce(sled::Tree) -> Result<T, CounterError> + Send + 'static,
        T: Send + 'static,
    {
        let tree = self.tree.clone();
        tokio::task::spawn_blocking(move || op(tree))
            .await
            .map_err(|e| CounterError::Unavailable(format!("counter task failed: {e}")))?
    }
}

fn unavailable(e: sled::Error) -> CounterError {
    CounterError::Unavailable(e.to_string())
}

fn decode(sequence: &str, bytes: &[u8]) -> Result<u64, CounterError> {
    let raw: [u8; 8] = bytes.try_into().map_err(|_| CounterError::Corrupt {
        sequence: sequence.to_string(),
        reason: format!("expected 8 bytes, got {}", bytes.len()),
    })?;
    Ok(u64::from_be_bytes(raw))
}

#[async_trait]
impl ReferenceCounterStore for SledCounterStore {
    async fn read_latest(&self, sequence: &str) -> Result<Option<u64>, CounterError> {
        let sequence = sequence.to_string();
        self.blocking(move |tree| {
            tree.get(sequence.as_bytes())
                .map_err(unavailable)?
                .map(|value| decode(&sequence, &value))
                .transpose()
        })
        .await
    }

    async fn compare_and_swap(
        &self,
        sequence: &str,
        expected: u64,
        new: u64,
    ) -> Result<(), CounterError> {
        let sequence = sequence.to_string();
        self.blocking(move |tree| {
            let old = expected.to_be_bytes();
            let proposed = new.to_be_bytes();
            let outcome = tree
                .compare_and_swap(sequence.as_bytes(), Some(&old[..]), Some(&proposed[..]))
                .map_err(unavailable)?;

            match outcome {
                Ok(()) => {
                    tree.flush().map_err(unavailable)?;
                    debug!(sequence = %sequence, expected, new, "Swapped");
                    Ok(())
                }
                Err(rejected) => {
                    let actual = rejected
                        .current
                        .map(|value| decode(&sequence, &value))
                        .transpose()?;
                    Err(CounterError::Conflict {
                        sequence,
                        expected,
                        actual,
                    })
                }
            }
        })
        .await
    }

    async fn provision(&self, sequence: &str) -> Result<bool, CounterError> {
        let sequence = sequence.to_string();
        self.blocking(move |tree| {
            let zero = 0u64.to_be_bytes();
            let created = tree
                .compare_and_swap(sequence.as_bytes(), None::<&[u8]>, Some(&zero[..]))
                .map_err(unavailable)?
                .is_ok();
            if created {
                tree.flush().map_err(unavailable)?;
                info!(sequence = %sequence, "Sequence provisioned");
            }
            Ok(created)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEQ: &str = "ContainerBookingReference";

    #[tokio::test]
    async fn test_provision_then_swap() {
        let dir = tempfile::tempdir().unwrap();
        let store = SledCounterStore::open(dir.path().join("counters")).unwrap();

        assert_eq!(store.read_latest(SEQ).await.unwrap(), None);
        assert!(store.provision(SEQ).await.unwrap());
        assert!(!store.provision(SEQ).await.unwrap());
        assert_eq!(store.read_latest(SEQ).await.unwrap(), Some(0));

        store.compare_and_swap(SEQ, 0, 1).await.unwrap();
        assert_eq!(store.read_latest(SEQ).await.unwrap(), Some(1));
        assert_eq!(store.read_latest(SEQ).await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn test_stale_swap_reports_current_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = SledCounterStore::open(dir.path().join("counters")).unwrap();
        store.provision(SEQ).await.unwrap();
        store.compare_and_swap(SEQ, 0, 1).await.unwrap();

        let err = store.compare_and_swap(SEQ, 0, 1).await.unwrap_err();
        assert_eq!(
            err,
            CounterError::Conflict {
                sequence: SEQ.to_string(),
                expected: 0,
                actual: Some(1),
            }
        );
    }

    #[tokio::test]
    async fn test_swap_on_missing_row_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let store = SledCounterStore::open(dir.path().join("counters")).unwrap();
        let err = store.compare_and_swap(SEQ, 0, 1).await.unwrap_err();
        assert!(matches!(err, CounterError::Conflict { actual: None, .. }));
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counters");
        {
            let store = SledCounterStore::open(&path).unwrap();
            store.provision(SEQ).await.unwrap();
            store.compare_and_swap(SEQ, 0, 1).await.unwrap();
            store.compare_and_swap(SEQ, 1, 2).await.unwrap();
        }

        let store = SledCounterStore::open(&path).unwrap();
        assert_eq!(store.read_latest(SEQ).await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_undecodable_value_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let db = sled::open(dir.path().join("counters")).unwrap();
        db.open_tree(COUNTER_TREE)
            .unwrap()
            .insert(SEQ, &b"abc"[..])
            .unwrap();

        let store = SledCounterStore::from_db(&db).unwrap();
        let err = store.read_latest(SEQ).await.unwrap_err();
        assert!(matches!(err, CounterError::Corrupt { .. }));
    }
}
