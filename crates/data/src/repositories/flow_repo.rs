//! Exchange flow repository.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::ExchangeFlowRecord;

/// Repository for exchange flow operations.
#[derive(Debug, Clone)]
pub struct ExchangeFlowRepository {
    pool: PgPool,
}

impl ExchangeFlowRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a batch of flow records in one transaction.
    ///
    /// # Errors
    /// Returns an error if the database transaction fails.
    pub async fn insert_batch(&self, records: &[ExchangeFlowRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        for record in records {
            sqlx::query(
                r"
                INSERT INTO exchange_flows (timestamp, exchange, direction, amount, net_flow)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(record.timestamp)
            .bind(&record.exchange)
            .bind(&record.direction)
            .bind(record.amount)
            .bind(record.net_flow)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Queries flows at or after the cutoff, oldest first.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn since(&self, cutoff: DateTime<Utc>) -> Result<Vec<ExchangeFlowRecord>> {
        let records = sqlx::query_as::<_, ExchangeFlowRecord>(
            r"
            SELECT id, timestamp, exchange, direction, amount, net_flow
            FROM exchange_flows
            WHERE timestamp >= $1
            ORDER BY timestamp ASC
            ",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Queries the most recent flows, newest first.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn recent(&self, limit: i64) -> Result<Vec<ExchangeFlowRecord>> {
        let records = sqlx::query_as::<_, ExchangeFlowRecord>(
            r"
            SELECT id, timestamp, exchange, direction, amount, net_flow
            FROM exchange_flows
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
