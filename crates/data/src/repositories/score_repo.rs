//! Composite score repository.

use anyhow::Result;
use sqlx::PgPool;

use crate::models::CompositeScoreRecord;

/// Repository for composite score operations.
#[derive(Debug, Clone)]
pub struct ScoreRepository {
    pool: PgPool,
}

impl ScoreRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts one evaluation cycle's scores.
    ///
    /// # Errors
    /// Returns an error if the database operation fails.
    pub async fn insert(&self, record: &CompositeScoreRecord) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            r"
            INSERT INTO composite_scores
                (timestamp, flow_score, oi_score, volume_score,
                 manipulation_score, regulatory_score, overall_score)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            ",
        )
        .bind(record.timestamp)
        .bind(record.flow_score)
        .bind(record.oi_score)
        .bind(record.volume_score)
        .bind(record.manipulation_score)
        .bind(record.regulatory_score)
        .bind(record.overall_score)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    /// Queries the most recent scores, newest first.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn recent(&self, limit: i64) -> Result<Vec<CompositeScoreRecord>> {
        let records = sqlx::query_as::<_, CompositeScoreRecord>(
            r"
            SELECT id, timestamp, flow_score, oi_score, volume_score,
                   manipulation_score, regulatory_score, overall_score
            FROM composite_scores
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
