use std::sync::Arc;

use chrono::Duration;
use mathgen_core::Clock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::repository::KeyValueBackend;

/// Key holding the persisted history list.
pub const HISTORY_KEY: &str = "math_history";
/// Key holding the persisted score counters.
pub const SCORES_KEY: &str = "math_scores";
/// Entries older than this are treated as absent.
pub const DEFAULT_EXPIRY: Duration = Duration::hours(12);

/// Persistence envelope: the value plus the epoch-millis time it was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord<T> {
    pub value: T,
    pub timestamp: i64,
}

/// Key-value store that stamps every write and lazily expires on read.
///
/// Writes are fire-and-forget and reads never fail: backend errors, unparsable
/// envelopes and expired entries all surface as `None`. Corrupt and expired
/// entries are deleted when they are read.
#[derive(Clone)]
pub struct ExpiringStore {
    backend: Arc<dyn KeyValueBackend>,
    clock: Clock,
    expiry: Duration,
}

impl ExpiringStore {
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueBackend>, clock: Clock, expiry: Duration) -> Self {
        Self {
            backend,
            clock,
            expiry,
        }
    }

    /// Same backend and expiry, different clock.
    #[must_use]
    pub fn with_clock(&self, clock: Clock) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            clock,
            expiry: self.expiry,
        }
    }

    #[must_use]
    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// Wrap `value` with the current time and write it under `key`.
    pub async fn put<T: Serialize>(&self, key: &str, value: &T) {
        let record = StoredRecord {
            value,
            timestamp: self.clock.now_millis(),
        };
        let raw = match serde_json::to_string(&record) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(key, error = %err, "failed to serialize stored record");
                return;
            }
        };
        if let Err(err) = self.backend.set(key, &raw).await {
            tracing::warn!(key, error = %err, "failed to persist stored record");
        }
    }

    /// Read `key` using the store's configured expiry.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get_with_expiry(key, self.expiry).await
    }

    /// Read `key`, treating entries older than `expiry` as absent.
    pub async fn get_with_expiry<T: DeserializeOwned>(
        &self,
        key: &str,
        expiry: Duration,
    ) -> Option<T> {
        let raw = match self.backend.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(key, error = %err, "failed to read stored record");
                return None;
            }
        };

        let record: StoredRecord<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(key, error = %err, "discarding unparsable stored record");
                self.remove(key).await;
                return None;
            }
        };

        let age_millis = self.clock.now_millis().saturating_sub(record.timestamp);
        if age_millis > expiry.num_milliseconds() {
            tracing::debug!(key, age_millis, "stored record expired");
            self.remove(key).await;
            return None;
        }

        match serde_json::from_value(record.value) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, error = %err, "discarding malformed stored value");
                self.remove(key).await;
                None
            }
        }
    }

    /// Delete `key`; failures are logged and otherwise ignored.
    pub async fn remove(&self, key: &str) {
        if let Err(err) = self.backend.remove(key).await {
            tracing::warn!(key, error = %err, "failed to remove stored record");
        }
    }
}
