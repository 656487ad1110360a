use mathgen_core::Clock;
use mathgen_core::model::{
    Difficulty, HistoryEntry, ProgressSnapshot, ScoreStats, SessionProgress,
};
use std::future::Future;
use std::sync::Arc;

use storage::{ExpiringStore, HISTORY_KEY, SCORES_KEY};
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Write-through wrapper around `SessionProgress`.
///
/// Every mutation is followed by writing both snapshots to the expiring store.
/// The writes run on a detached task that owns the lock guard: they finish even
/// if the caller's future is dropped, and persisted snapshots follow the order
/// of mutations.
pub struct ProgressService {
    clock: Clock,
    store: ExpiringStore,
    progress: Arc<Mutex<SessionProgress>>,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, store: ExpiringStore) -> Self {
        Self {
            clock,
            store,
            progress: Arc::new(Mutex::new(SessionProgress::new())),
        }
    }

    /// Replace in-memory state with whatever unexpired snapshots are persisted.
    pub async fn load(&self) -> ProgressSnapshot {
        let history = self.store.get::<Vec<HistoryEntry>>(HISTORY_KEY).await;
        let scores = self.store.get::<ScoreStats>(SCORES_KEY).await;
        let mut progress = self.progress.lock().await;
        progress.load(history, scores);
        progress.snapshot()
    }

    pub async fn snapshot(&self) -> ProgressSnapshot {
        self.progress.lock().await.snapshot()
    }

    /// Record one submission and persist the new state.
    pub async fn record_submission(
        &self,
        problem_text: &str,
        user_answer: f64,
        correct_answer: f64,
        difficulty: Difficulty,
        is_correct: bool,
    ) -> HistoryEntry {
        let mut progress = Arc::clone(&self.progress).lock_owned().await;
        let entry = progress.record_submission(
            problem_text,
            user_answer,
            correct_answer,
            difficulty,
            is_correct,
            self.clock.now(),
        );
        let store = self.store.clone();
        let snapshot = progress.snapshot();
        detached(progress, async move {
            store.put(HISTORY_KEY, &snapshot.history).await;
            store.put(SCORES_KEY, &snapshot.scores).await;
        })
        .await;
        entry
    }

    /// Clear history and scores, in memory and in the store.
    pub async fn clear(&self) {
        let mut progress = Arc::clone(&self.progress).lock_owned().await;
        progress.reset();
        let store = self.store.clone();
        detached(progress, async move {
            store.remove(HISTORY_KEY).await;
            store.remove(SCORES_KEY).await;
        })
        .await;
    }
}

/// Run `write` on its own task while it holds `guard`, then wait for it.
///
/// Dropping the returned future does not cancel the write; the next caller
/// blocks on the lock until it is done.
async fn detached<F>(guard: OwnedMutexGuard<SessionProgress>, write: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    let handle = tokio::spawn(async move {
        write.await;
        drop(guard);
    });
    if let Err(err) = handle.await {
        tracing::warn!(error = %err, "progress write task failed");
    }
}
