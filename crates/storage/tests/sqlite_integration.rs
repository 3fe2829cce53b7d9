use guess_core::model::ProgressKey;
use storage::repository::{ProgressRepository, Storage};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_roundtrip_persists_progress_scalars() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.save(ProgressKey::Level, "3").await.unwrap();
    repo.save(ProgressKey::Score, "-5").await.unwrap();
    repo.save(ProgressKey::CompletedLevels, "2").await.unwrap();

    assert_eq!(
        repo.load(ProgressKey::Level).await.unwrap().as_deref(),
        Some("3")
    );
    assert_eq!(
        repo.load(ProgressKey::Score).await.unwrap().as_deref(),
        Some("-5")
    );
    assert_eq!(
        repo.load(ProgressKey::CompletedLevels)
            .await
            .unwrap()
            .as_deref(),
        Some("2")
    );
}

#[tokio::test]
async fn sqlite_save_overwrites_existing_key() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_overwrite?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.save(ProgressKey::Score, "10").await.unwrap();
    repo.save(ProgressKey::Score, "20").await.unwrap();

    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM progress WHERE key = 'score'")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(row.0, 1);
    assert_eq!(
        repo.load(ProgressKey::Score).await.unwrap().as_deref(),
        Some("20")
    );
}

#[tokio::test]
async fn sqlite_empty_store_loads_nothing() {
    let storage = Storage::sqlite("sqlite::memory:").await.expect("storage");
    for key in ProgressKey::ALL {
        assert_eq!(storage.progress.load(key).await.unwrap(), None);
    }
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(row.0, 1);
}
