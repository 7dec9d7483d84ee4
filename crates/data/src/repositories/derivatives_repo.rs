//! Derivatives metrics repository.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::DerivativesMetricRecord;

/// Repository for derivatives metric operations.
#[derive(Debug, Clone)]
pub struct DerivativesRepository {
    pool: PgPool,
}

impl DerivativesRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a single metric observation.
    ///
    /// # Errors
    /// Returns an error if the database operation fails.
    pub async fn insert(&self, record: &DerivativesMetricRecord) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            r"
            INSERT INTO derivatives_metrics (timestamp, exchange, oi, funding, ls_ratio, volume)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            ",
        )
        .bind(record.timestamp)
        .bind(&record.exchange)
        .bind(record.oi)
        .bind(record.funding)
        .bind(record.ls_ratio)
        .bind(record.volume)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    /// Queries metrics at or after the cutoff, oldest first.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn since(&self, cutoff: DateTime<Utc>) -> Result<Vec<DerivativesMetricRecord>> {
        let records = sqlx::query_as::<_, DerivativesMetricRecord>(
            r"
            SELECT id, timestamp, exchange, oi, funding, ls_ratio, volume
            FROM derivatives_metrics
            WHERE timestamp >= $1
            ORDER BY timestamp ASC
            ",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Queries the most recent metrics, newest first.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn recent(&self, limit: i64) -> Result<Vec<DerivativesMetricRecord>> {
        let records = sqlx::query_as::<_, DerivativesMetricRecord>(
            r"
            SELECT id, timestamp, exchange, oi, funding, ls_ratio, volume
            FROM derivatives_metrics
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
