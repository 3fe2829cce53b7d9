use std::sync::Arc;

use guess_core::model::{GameRules, Progress, ProgressKey};
use storage::repository::ProgressRepository;
use tracing::warn;

use crate::error::ProgressServiceError;

/// Typed access to the persisted progress scalars.
///
/// Each scalar is stored JSON-encoded under its own key.
#[derive(Clone)]
pub struct ProgressService {
    repo: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(repo: Arc<dyn ProgressRepository>) -> Self {
        Self { repo }
    }

    /// Load persisted progress, or defaults for anything missing.
    ///
    /// Read failures and values that do not decode as integers are logged and
    /// treated as absent, so this never fails.
    pub async fn load(&self, rules: &GameRules) -> Progress {
        let level = self.load_scalar(ProgressKey::Level).await;
        let score = self.load_scalar(ProgressKey::Score).await;
        let completed_levels = self.load_scalar(ProgressKey::CompletedLevels).await;
        Progress::restore(level, score, completed_levels, rules)
    }

    /// Write every scalar of `progress`.
    ///
    /// A failed key does not stop the remaining writes.
    ///
    /// # Errors
    ///
    /// Returns the first `ProgressServiceError` encountered.
    pub async fn save(&self, progress: &Progress) -> Result<(), ProgressServiceError> {
        let mut first_error = None;
        for key in ProgressKey::ALL {
            if let Err(err) = self.save_scalar(key, progress.value_of(key)).await {
                warn!(%key, error = %err, "failed to save progress value");
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    async fn save_scalar(&self, key: ProgressKey, value: i64) -> Result<(), ProgressServiceError> {
        let encoded = serde_json::to_string(&value)
            .map_err(|source| ProgressServiceError::Encode { key, source })?;
        self.repo
            .save(key, &encoded)
            .await
            .map_err(|source| ProgressServiceError::Storage { key, source })
    }

    async fn load_scalar(&self, key: ProgressKey) -> Option<i64> {
        let raw = match self.repo.load(key).await {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(%key, error = %err, "failed to load progress value; using default");
                return None;
            }
        };

        match serde_json::from_str::<i64>(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(%key, %raw, error = %err, "ignoring malformed progress value");
                None
            }
        }
    }
}
