use async_trait::async_trait;
use guess_core::model::ProgressKey;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Durable key/value storage for the progress scalars.
///
/// Values are opaque text; encoding them is the caller's job. The game issues
/// at most one call at a time, so implementations need no per-key ordering.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    async fn save(&self, key: ProgressKey, value: &str) -> Result<(), StorageError>;

    /// Fetch the value stored under `key`, or `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn load(&self, key: ProgressKey) -> Result<Option<String>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<HashMap<ProgressKey, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Seed a raw value, bypassing any encoding.
    #[must_use]
    pub fn with_entry(self, key: ProgressKey, raw: impl Into<String>) -> Self {
        if let Ok(mut guard) = self.entries.lock() {
            guard.insert(key, raw.into());
        }
        self
    }

    /// Raw value currently stored under `key`.
    #[must_use]
    pub fn raw(&self, key: ProgressKey) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|guard| guard.get(&key).cloned())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn save(&self, key: ProgressKey, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key, value.to_owned());
        Ok(())
    }

    async fn load(&self, key: ProgressKey) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&key).cloned())
    }
}

/// Storage handles behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let progress: Arc<dyn ProgressRepository> = Arc::new(InMemoryRepository::new());
        Self { progress }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_store_loads_nothing() {
        let repo = InMemoryRepository::new();
        for key in ProgressKey::ALL {
            assert_eq!(repo.load(key).await.unwrap(), None);
        }
    }

    #[tokio::test]
    async fn save_overwrites_in_place() {
        let repo = InMemoryRepository::new();
        repo.save(ProgressKey::Score, "10").await.unwrap();
        repo.save(ProgressKey::Score, "20").await.unwrap();

        assert_eq!(
            repo.load(ProgressKey::Score).await.unwrap().as_deref(),
            Some("20")
        );
        assert_eq!(repo.load(ProgressKey::Level).await.unwrap(), None);
    }

    #[tokio::test]
    async fn clones_share_entries() {
        let repo = InMemoryRepository::new();
        let handle = repo.clone();
        handle.save(ProgressKey::Level, "4").await.unwrap();
        assert_eq!(repo.raw(ProgressKey::Level).as_deref(), Some("4"));
    }

    #[tokio::test]
    async fn storage_in_memory_round_trips() {
        let storage = Storage::in_memory();
        storage
            .progress
            .save(ProgressKey::CompletedLevels, "2")
            .await
            .unwrap();
        assert_eq!(
            storage
                .progress
                .load(ProgressKey::CompletedLevels)
                .await
                .unwrap()
                .as_deref(),
            Some("2")
        );
    }
}
