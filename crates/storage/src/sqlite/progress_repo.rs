use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use crate::repository::{ProgressRepository, StorageError};
use guess_core::model::ProgressKey;

use super::SqliteRepository;

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn save(&self, key: ProgressKey, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO progress (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(key.as_str())
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn load(&self, key: ProgressKey) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM progress WHERE key = ?1")
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let value: String = row
            .try_get("value")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        Ok(Some(value))
    }
}
