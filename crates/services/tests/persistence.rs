use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use mathgen_core::model::Difficulty;
use mathgen_core::time::fixed_clock;
use services::ProgressService;
use storage::{
    DEFAULT_EXPIRY, ExpiringStore, InMemoryKv, KeyValueBackend, SCORES_KEY, StorageError,
};

/// Delays writes to the scores key so a caller can give up between the two writes.
struct SlowScores {
    inner: InMemoryKv,
    delay: StdDuration,
}

#[async_trait]
impl KeyValueBackend for SlowScores {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == SCORES_KEY {
            tokio::time::sleep(self.delay).await;
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key).await
    }
}

fn store_over(kv: Arc<dyn KeyValueBackend>) -> ExpiringStore {
    ExpiringStore::new(kv, fixed_clock(), DEFAULT_EXPIRY)
}

#[tokio::test]
async fn abandoned_submission_still_persists_both_snapshots() {
    let kv = InMemoryKv::new();
    let slow: Arc<dyn KeyValueBackend> = Arc::new(SlowScores {
        inner: kv.clone(),
        delay: StdDuration::from_millis(100),
    });
    let progress = ProgressService::new(fixed_clock(), store_over(slow));

    let abandoned = tokio::time::timeout(
        StdDuration::from_millis(20),
        progress.record_submission("What is 4 + 5?", 9.0, 9.0, Difficulty::Easy, true),
    )
    .await;
    assert!(abandoned.is_err());

    // Waits for the in-flight write to release the lock.
    let snapshot = progress.snapshot().await;
    assert_eq!(snapshot.history.len(), 1);

    let reloaded = ProgressService::new(fixed_clock(), store_over(Arc::new(kv)));
    let snapshot = reloaded.load().await;
    assert_eq!(snapshot.history.len(), 1);
    assert_eq!(snapshot.scores.total(), 1);
    assert_eq!(snapshot.scores.correct(), 1);
}

#[tokio::test]
async fn abandoned_clear_still_empties_the_store() {
    let kv = InMemoryKv::new();
    let progress = ProgressService::new(fixed_clock(), store_over(Arc::new(kv.clone())));
    progress
        .record_submission("What is 4 + 5?", 8.0, 9.0, Difficulty::Hard, false)
        .await;
    assert!(kv.get(SCORES_KEY).await.unwrap().is_some());

    // Dropped before its first poll completes the writes.
    drop(tokio::time::timeout(StdDuration::ZERO, progress.clear()).await);

    let snapshot = progress.snapshot().await;
    assert!(snapshot.history.is_empty());
    assert_eq!(kv.get(SCORES_KEY).await.unwrap(), None);
}
