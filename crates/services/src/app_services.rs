use std::path::Path;
use std::sync::Arc;

use storage::repository::{ProgressRepository, Storage};
use tracing::info;

use crate::config::GameConfig;
use crate::error::GameServicesError;
use crate::progress_controller::ProgressController;
use crate::round_generator::RoundGenerator;

/// Wires storage and configuration into ready-to-use controllers.
#[derive(Clone)]
pub struct GameServices {
    config: GameConfig,
    storage: Storage,
}

impl GameServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// Creates the database file and its parent directories when missing.
    ///
    /// # Errors
    ///
    /// Returns `GameServicesError` if the URL is unusable or storage cannot be opened.
    pub async fn new_sqlite(config: GameConfig) -> Result<Self, GameServicesError> {
        prepare_sqlite_file(&config.db_url)?;
        let storage = Storage::sqlite(&config.db_url).await?;
        info!(db_url = %config.db_url, "progress storage ready");
        Ok(Self { config, storage })
    }

    /// Build services that keep progress in memory only.
    #[must_use]
    pub fn in_memory(config: GameConfig) -> Self {
        Self {
            config,
            storage: Storage::in_memory(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn progress_repository(&self) -> Arc<dyn ProgressRepository> {
        Arc::clone(&self.storage.progress)
    }

    /// A fresh controller with an OS-seeded generator. Call `init` before use.
    #[must_use]
    pub fn controller(&self) -> ProgressController {
        ProgressController::new(
            self.progress_repository(),
            Box::new(RoundGenerator::from_os_rng()),
            self.config.rules,
        )
        .with_success_delay(self.config.success_delay)
    }

    /// A controller with progress already loaded.
    ///
    /// # Errors
    ///
    /// Returns `GameServicesError::Controller` if initialization is refused.
    pub async fn start(&self) -> Result<ProgressController, GameServicesError> {
        let mut controller = self.controller();
        controller.init().await?;
        Ok(controller)
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), GameServicesError> {
    if db_url == "sqlite::memory:" || db_url.contains("mode=memory") {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| GameServicesError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(GameServicesError::InvalidDbUrl {
            raw: db_url.to_string(),
        });
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}
