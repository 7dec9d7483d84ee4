//! OHLCV repository.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::OhlcvRecord;

/// Repository for OHLCV bar operations.
#[derive(Debug, Clone)]
pub struct OhlcvRepository {
    pool: PgPool,
}

impl OhlcvRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a single bar.
    ///
    /// # Errors
    /// Returns an error if the database operation fails.
    pub async fn insert(&self, record: &OhlcvRecord) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            r"
            INSERT INTO ohlcv (timestamp, open, high, low, close, volume, source)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            ",
        )
        .bind(record.timestamp)
        .bind(record.open)
        .bind(record.high)
        .bind(record.low)
        .bind(record.close)
        .bind(record.volume)
        .bind(&record.source)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    /// Queries bars at or after the cutoff, oldest first.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn since(&self, cutoff: DateTime<Utc>) -> Result<Vec<OhlcvRecord>> {
        let records = sqlx::query_as::<_, OhlcvRecord>(
            r"
            SELECT id, timestamp, open, high, low, close, volume, source
            FROM ohlcv
            WHERE timestamp >= $1
            ORDER BY timestamp ASC
            ",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Queries the most recent bars, newest first.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn recent(&self, limit: i64) -> Result<Vec<OhlcvRecord>> {
        let records = sqlx::query_as::<_, OhlcvRecord>(
            r"
            SELECT id, timestamp, open, high, low, close, volume, source
            FROM ohlcv
            ORDER BY timestamp DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
