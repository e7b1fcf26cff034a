// Migration Runner

use sequent_core::error::{Error, Result};
use sqlx::SqlitePool;
use tracing::info;

const MIGRATIONS: &[(i64, &str, &str)] = &[(
    1,
    "initial schema",
    include_str!("../migrations/001_initial_schema.sql"),
)];

/// Run database migrations. Idempotent; safe to call on every startup.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at INTEGER NOT NULL DEFAULT (unixepoch())
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| Error::Store(e.to_string()))?;

    let current: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(version), 0) FROM schema_version")
        .fetch_one(pool)
        .await
        .map_err(|e| Error::Store(e.to_string()))?;

    for &(version, name, sql) in MIGRATIONS {
        if version <= current {
            continue;
        }
        info!(version, name, "Applying migration");
        apply_migration(pool, version, sql).await?;
    }

    Ok(())
}

/// Apply one migration file inside a transaction, recording its version.
async fn apply_migration(pool: &SqlitePool, version: i64, sql: &str) -> Result<()> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| Error::Store(e.to_string()))?;

    // Statements are separated by semicolons; strip comment lines first.
    for statement in sql.split(';') {
        let clean: String = statement
            .lines()
            .filter(|line| !line.trim().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();

        if !clean.is_empty() {
            sqlx::query(&clean)
                .execute(&mut *tx)
                .await
                .map_err(|e| Error::Store(e.to_string()))?;
        }
    }

    sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
        .bind(version)
        .execute(&mut *tx)
        .await
        .map_err(|e| Error::Store(e.to_string()))?;

    tx.commit().await.map_err(|e| Error::Store(e.to_string()))?;
    Ok(())
}
