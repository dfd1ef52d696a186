//! Shared test helpers: a migrated file-backed SQLite pool per test.

use prosthesis_core::database;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Build an isolated pool on a fresh temp database. The returned TempDir
/// must stay alive for the pool to keep working.
pub async fn test_pool() -> (SqlitePool, TempDir) {
    let dir = TempDir::new().expect("create temp dir");
    let db_path = dir.path().join("test.db");
    let url = format!("sqlite://{}?mode=rwc", db_path.display());

    let pool = database::connect(&url).await.expect("connect");
    database::run_migrations(&pool).await.expect("migrate");

    (pool, dir)
}
