use anyhow::Result;
use sqlx::{postgres::PgPoolOptions, PgPool};
use xrp_intel_core::DatabaseConfig;

use crate::repositories::Repositories;

/// Database client wrapping the connection pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connects to the configured `PostgreSQL` database.
    ///
    /// # Errors
    /// Returns an error if the database connection cannot be established.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;
        Ok(Self { pool })
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Builds the repository bundle backed by this database.
    #[must_use]
    pub fn repositories(&self) -> Repositories {
        Repositories::new(self.pool.clone())
    }

    /// Creates the tables and indexes if they do not exist yet.
    ///
    /// # Errors
    /// Returns an error if any schema statement fails.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ohlcv (
                id BIGSERIAL PRIMARY KEY,
                timestamp TIMESTAMPTZ NOT NULL,
                open NUMERIC NOT NULL,
                high NUMERIC NOT NULL,
                low NUMERIC NOT NULL,
                close NUMERIC NOT NULL,
                volume NUMERIC NOT NULL,
                source TEXT NOT NULL DEFAULT 'binance'
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exchange_flows (
                id BIGSERIAL PRIMARY KEY,
                timestamp TIMESTAMPTZ NOT NULL,
                exchange TEXT NOT NULL,
                direction TEXT NOT NULL,
                amount DOUBLE PRECISION NOT NULL,
                net_flow DOUBLE PRECISION NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS derivatives_metrics (
                id BIGSERIAL PRIMARY KEY,
                timestamp TIMESTAMPTZ NOT NULL,
                exchange TEXT NOT NULL DEFAULT 'binance',
                oi DOUBLE PRECISION,
                funding DOUBLE PRECISION,
                ls_ratio DOUBLE PRECISION,
                volume DOUBLE PRECISION
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS events (
                id BIGSERIAL PRIMARY KEY,
                timestamp TIMESTAMPTZ NOT NULL,
                "type" TEXT NOT NULL,
                subtype TEXT,
                tags JSONB,
                severity DOUBLE PRECISION,
                source TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS composite_scores (
                id BIGSERIAL PRIMARY KEY,
                timestamp TIMESTAMPTZ NOT NULL,
                flow_score DOUBLE PRECISION,
                oi_score DOUBLE PRECISION,
                volume_score DOUBLE PRECISION,
                manipulation_score DOUBLE PRECISION,
                regulatory_score DOUBLE PRECISION,
                overall_score DOUBLE PRECISION
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        for statement in [
            "CREATE INDEX IF NOT EXISTS idx_ohlcv_timestamp ON ohlcv (timestamp)",
            "CREATE INDEX IF NOT EXISTS idx_exchange_flows_timestamp ON exchange_flows (timestamp)",
            "CREATE INDEX IF NOT EXISTS idx_derivatives_metrics_timestamp ON derivatives_metrics (timestamp)",
            "CREATE INDEX IF NOT EXISTS idx_events_timestamp ON events (timestamp)",
            "CREATE INDEX IF NOT EXISTS idx_composite_scores_timestamp ON composite_scores (timestamp)",
        ] {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        Ok(())
    }
}
