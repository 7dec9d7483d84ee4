//! Event repository.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::EventRecord;

/// Repository for classified event operations.
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a batch of events in one transaction.
    ///
    /// # Errors
    /// Returns an error if the database transaction fails.
    pub async fn insert_batch(&self, records: &[EventRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO events (timestamp, "type", subtype, tags, severity, source)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(record.timestamp)
            .bind(&record.kind)
            .bind(&record.subtype)
            .bind(&record.tags)
            .bind(record.severity)
            .bind(&record.source)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Queries events at or after the cutoff, oldest first.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn since(&self, cutoff: DateTime<Utc>) -> Result<Vec<EventRecord>> {
        let records = sqlx::query_as::<_, EventRecord>(
            r#"
            SELECT id, timestamp, "type", subtype, tags, severity, source
            FROM events
            WHERE timestamp >= $1
            ORDER BY timestamp ASC
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
