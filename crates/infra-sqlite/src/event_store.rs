// SQLite EventStore Implementation

use async_trait::async_trait;
use sequent_core::domain::{Event, EventId};
use sequent_core::error::{Error, Result};
use sequent_core::port::{EventStore, TimeProvider};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::debug;

// Convert sqlx::Error to the core error with structured information.
// SQLite error codes: https://www.sqlite.org/rescode.html
fn map_sqlx_error(err: sqlx::Error) -> Error {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    // UNIQUE constraint failed: the sequencer handed out a
                    // duplicate id, which its locking should make impossible.
                    "2067" | "1555" => Error::Internal(format!(
                        "unique constraint violation: {}",
                        db_err.message()
                    )),
                    // SQLITE_BUSY - lock not obtained within the busy timeout
                    "5" => Error::Store(format!(
                        "database locked (SQLITE_BUSY): {}",
                        db_err.message()
                    )),
                    _ => Error::Store(format!("database error [{}]: {}", code, db_err.message())),
                }
            } else {
                Error::Store(format!("database error: {}", db_err.message()))
            }
        }
        sqlx::Error::RowNotFound => Error::Store("row not found".to_string()),
        _ => Error::Store(err.to_string()),
    }
}

#[derive(sqlx::FromRow)]
struct EventRow {
    id: i64,
    value: Option<String>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: row.id,
            value: row.value,
        }
    }
}

/// EventStore backed by sqlx/SQLite.
///
/// SQLite has no per-row SKIP LOCKED, so a claim is a durable marker set by
/// one atomic UPDATE instead of an open transaction holding a row lock.
/// The port's contract survives the translation: claiming never blocks on
/// contention, claimed rows are skipped, and releasing the marker makes a
/// row claimable again.
pub struct SqliteEventStore {
    pool: SqlitePool,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqliteEventStore {
    pub fn new(pool: SqlitePool, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            pool,
            time_provider,
        }
    }
}

#[async_trait]
impl EventStore for SqliteEventStore {
    async fn insert_pending(&self) -> Result<Event> {
        // Allocation and insert share one transaction: the write lock the
        // counter update takes is the system's sole serialization point,
        // and a failed insert rolls the allocation back so ids stay
        // gap-free.
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let id: i64 = sqlx::query_scalar("UPDATE status SET id = id + 1 RETURNING id")
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        sqlx::query("INSERT INTO events (id, value) VALUES (?, NULL)")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;

        debug!(event_id = id, "Inserted pending event");
        Ok(Event::pending(id))
    }

    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>> {
        let row: Option<EventRow> =
            sqlx::query_as("SELECT id, value FROM events WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(row.map(Event::from))
    }

    async fn claim_one(&self) -> Result<Option<EventId>> {
        // Single atomic statement: stamp the lowest claimable row and
        // return its id. Rows stamped by other workers fail the inner
        // WHERE and are skipped rather than waited on.
        let now = self.time_provider.now_millis();
        let id: Option<i64> = sqlx::query_scalar(
            "UPDATE events SET claimed_at = ?
             WHERE id = (
                 SELECT id FROM events
                 WHERE value IS NULL AND claimed_at IS NULL
                 ORDER BY id
                 LIMIT 1
             )
             RETURNING id",
        )
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(id)
    }

    async fn commit_result(&self, id: EventId, value: &str) -> Result<()> {
        // The value guard makes a second commit a no-op at the SQL level;
        // a committed value is never overwritten.
        let result = sqlx::query(
            "UPDATE events SET value = ?, claimed_at = NULL
             WHERE id = ? AND value IS NULL",
        )
        .bind(value)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            let existing = self.find_by_id(id).await?;
            return match existing {
                None => Err(Error::NotFound(format!("event {id}"))),
                Some(_) => Err(Error::Internal(format!("event {id} already has a value"))),
            };
        }
        Ok(())
    }

    async fn release(&self, id: EventId) -> Result<()> {
        sqlx::query("UPDATE events SET claimed_at = NULL WHERE id = ? AND value IS NULL")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn release_claims_older_than(&self, cutoff_ms: i64) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE events SET claimed_at = NULL
             WHERE value IS NULL AND claimed_at IS NOT NULL AND claimed_at < ?",
        )
        .bind(cutoff_ms)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn allocated_count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT id FROM status")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }
}
