//! # Database Infrastructure
//!
//! Pool construction and embedded schema migrations for the order store.
//! The store targets SQLite so a clinic deployment is a single file and
//! tests run against throwaway databases.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

/// Create a connection pool for the given SQLite URL, creating the
/// database file when missing.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Apply the embedded schema. Idempotent; run at every startup.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS prosthesis_orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            company_id INTEGER NOT NULL,
            patient_id INTEGER NOT NULL,
            professional_id INTEGER NOT NULL,
            prosthesis_type TEXT NOT NULL,
            description TEXT NOT NULL,
            laboratory TEXT,
            status TEXT NOT NULL DEFAULT 'pending',
            sent_date TEXT,
            expected_return_date TEXT,
            return_date TEXT,
            observations TEXT,
            labels TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_prosthesis_orders_company_status
            ON prosthesis_orders (company_id, status)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS laboratories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            company_id INTEGER NOT NULL,
            name TEXT NOT NULL COLLATE NOCASE,
            phone TEXT,
            email TEXT,
            created_at TEXT NOT NULL,
            UNIQUE (company_id, name)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS labels (
            id TEXT NOT NULL,
            company_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            color TEXT NOT NULL,
            PRIMARY KEY (company_id, id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database migrations applied");
    Ok(())
}
