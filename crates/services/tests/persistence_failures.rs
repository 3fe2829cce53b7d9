use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use guess_core::model::{GameRules, HiddenPair, Level, ProgressKey, SessionMode};
use services::{
    GameConfig, GameServices, PairSource, ProgressController, SaveStatus, SubmitOutcome,
};
use storage::repository::{InMemoryRepository, ProgressRepository, StorageError};

/// Wraps an in-memory store and fails on demand.
#[derive(Clone, Default)]
struct FlakyRepository {
    inner: InMemoryRepository,
    fail_saves: Arc<AtomicBool>,
    fail_loads: Arc<AtomicBool>,
    save_calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ProgressRepository for FlakyRepository {
    async fn save(&self, key: ProgressKey, value: &str) -> Result<(), StorageError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::Connection("disk full".into()));
        }
        self.inner.save(key, value).await
    }

    async fn load(&self, key: ProgressKey) -> Result<Option<String>, StorageError> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(StorageError::Connection("unreadable".into()));
        }
        self.inner.load(key).await
    }
}

struct Fixed(HiddenPair);

impl PairSource for Fixed {
    fn draw(&mut self, _level: Level) -> HiddenPair {
        self.0
    }
}

fn controller(repo: &FlakyRepository, a: i64, b: i64) -> ProgressController {
    ProgressController::new(
        Arc::new(repo.clone()),
        Box::new(Fixed(HiddenPair::new(a, b))),
        GameRules::default(),
    )
}

#[tokio::test]
async fn failed_load_falls_back_to_defaults() {
    let repo = FlakyRepository {
        inner: InMemoryRepository::new()
            .with_entry(ProgressKey::Score, "90")
            .with_entry(ProgressKey::CompletedLevels, "9"),
        ..FlakyRepository::default()
    };
    repo.fail_loads.store(true, Ordering::SeqCst);

    let mut controller = controller(&repo, 1, 1);
    let progress = *controller.init().await.unwrap();

    assert_eq!(progress.level(), Level::new(1));
    assert_eq!(progress.score(), 0);
    assert_eq!(progress.completed_levels(), 0);
    assert_eq!(controller.mode(), SessionMode::Home);
}

#[tokio::test]
async fn failed_save_keeps_in_memory_progress() {
    let repo = FlakyRepository::default();
    repo.fail_saves.store(true, Ordering::SeqCst);

    let mut controller = controller(&repo, 6, 2);
    controller.init().await.unwrap();
    controller.play().unwrap();
    controller.select_level(1).unwrap();

    let outcome = controller.submit_guess("6", "2").await.unwrap();
    assert!(matches!(
        outcome,
        SubmitOutcome::Completed {
            save: SaveStatus::Failed,
            frontier_advanced: true,
            ..
        }
    ));

    // every key is attempted even though each write fails
    assert_eq!(repo.save_calls.load(Ordering::SeqCst), 3);
    assert!(controller.last_save_failed());
    assert_eq!(controller.score(), 10);
    assert_eq!(controller.completed_levels(), 1);
    assert_eq!(controller.mode(), SessionMode::LevelSelect);
    assert!(
        controller
            .message()
            .unwrap()
            .ends_with("Progress could not be saved.")
    );

    // the game stays playable and the next write goes through
    repo.fail_saves.store(false, Ordering::SeqCst);
    controller.select_level(2).unwrap();
    controller.submit_guess("6", "2").await.unwrap();
    assert!(!controller.last_save_failed());
    assert_eq!(repo.inner.raw(ProgressKey::Score).as_deref(), Some("20"));
    assert_eq!(
        repo.inner.raw(ProgressKey::CompletedLevels).as_deref(),
        Some("2")
    );
}

#[tokio::test]
async fn sqlite_services_persist_between_controllers() {
    let config = GameConfig {
        db_url: "sqlite:file:memdb_services?mode=memory&cache=shared".into(),
        ..GameConfig::default()
    };
    let services = GameServices::new_sqlite(config).await.expect("services");

    let mut first = ProgressController::new(
        services.progress_repository(),
        Box::new(Fixed(HiddenPair::new(8, 3))),
        services.config().rules,
    );
    first.init().await.unwrap();
    first.play().unwrap();
    first.select_level(1).unwrap();
    first.submit_guess("8", "3").await.unwrap();

    let second = services.start().await.unwrap();
    assert_eq!(second.score(), 10);
    assert_eq!(second.completed_levels(), 1);
    assert!(second.is_unlocked(2));
}
