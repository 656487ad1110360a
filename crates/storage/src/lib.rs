#![forbid(unsafe_code)]

pub mod expiring;
pub mod repository;
pub mod sqlite;

pub use expiring::{DEFAULT_EXPIRY, ExpiringStore, HISTORY_KEY, SCORES_KEY, StoredRecord};
pub use repository::{InMemoryKv, KeyValueBackend, Storage, StorageError};
