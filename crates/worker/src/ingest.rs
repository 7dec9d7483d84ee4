//! Market data ingestion worker.
//!
//! One cycle fetches recent trades, derivatives state, and exchange flow
//! intel, persists them, and refreshes the cached dashboard snapshot.

use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use xrp_intel_core::OiMetricsPoint;
use xrp_intel_data::{
    CompositeScoreRecord, DerivativesMetricRecord, ExchangeFlowRecord, OhlcvRecord, Repositories,
    SnapshotCache, DASHBOARD_SNAPSHOT_KEY,
};
use xrp_intel_providers::{BinanceClient, IntelClient, Trade};

/// Source label attached to bars aggregated from trade batches.
pub const TRADES_SOURCE: &str = "binance-trades";

const TRADES_FETCH_LIMIT: usize = 1000;

/// Recent-history snapshot served to dashboards when the database is down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub scores: Vec<CompositeScoreRecord>,
    pub flows: Vec<ExchangeFlowRecord>,
    pub oi: Vec<DerivativesMetricRecord>,
    pub price: Vec<OhlcvRecord>,
}

/// Aggregates a chronological trade batch into one OHLCV bar.
///
/// Returns `None` for an empty batch.
#[must_use]
pub fn ohlcv_bar_from_trades(trades: &[Trade], timestamp: DateTime<Utc>) -> Option<OhlcvRecord> {
    let first = trades.first()?;
    let last = trades.last()?;

    let mut high = first.price;
    let mut low = first.price;
    let mut volume = 0.0;
    for trade in trades {
        high = high.max(trade.price);
        low = low.min(trade.price);
        volume += trade.qty;
    }

    let dec = |value: f64| Decimal::from_f64(value).unwrap_or(Decimal::ZERO);
    Some(OhlcvRecord::new(
        timestamp,
        dec(first.price),
        dec(high),
        dec(low),
        dec(last.price),
        dec(volume),
        TRADES_SOURCE,
    ))
}

/// Worker that ingests market data into storage.
pub struct IngestWorker {
    binance: BinanceClient,
    intel: IntelClient,
    repos: Repositories,
    cache: SnapshotCache,
}

impl IngestWorker {
    #[must_use]
    pub fn new(
        binance: BinanceClient,
        intel: IntelClient,
        repos: Repositories,
        cache: SnapshotCache,
    ) -> Self {
        Self {
            binance,
            intel,
            repos,
            cache,
        }
    }

    /// Runs one ingestion cycle.
    ///
    /// Intel flow failures are logged and skipped; market data and storage
    /// failures abort the cycle.
    ///
    /// # Errors
    /// Returns an error if a market data fetch or database write fails.
    pub async fn run_once(&self) -> Result<()> {
        let now = Utc::now();

        let trades = self.binance.recent_trades(TRADES_FETCH_LIMIT).await?;
        if let Some(bar) = ohlcv_bar_from_trades(&trades, now) {
            self.repos.ohlcv.insert(&bar).await?;
        }

        let metric = self.fetch_derivatives_metric(now).await?;
        self.repos
            .derivatives
            .insert(&DerivativesMetricRecord::from_point(&metric))
            .await?;

        match self.intel.exchange_flows(now).await {
            Ok(flows) => {
                let records: Vec<ExchangeFlowRecord> =
                    flows.iter().map(ExchangeFlowRecord::from_snapshot).collect();
                self.repos.flows.insert_batch(&records).await?;
            }
            Err(error) => {
                tracing::info!(%error, "market intel unavailable; skipping flows");
            }
        }

        self.refresh_dashboard_snapshot().await;
        tracing::info!("ingestion cycle complete");
        Ok(())
    }

    /// Runs ingestion on an interval, logging and continuing on failure.
    pub async fn run_loop(&self, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            if let Err(error) = self.run_once().await {
                tracing::error!(%error, "ingest cycle failed");
            }
        }
    }

    async fn fetch_derivatives_metric(&self, now: DateTime<Utc>) -> Result<OiMetricsPoint> {
        let funding = self.binance.funding_rate().await?;
        let open_interest = self.binance.open_interest().await?;
        let ls_ratio = self.binance.long_short_ratio().await?;

        Ok(OiMetricsPoint::new(
            now,
            "binance",
            open_interest.map_or(0.0, |s| s.effective_oi()),
        )
        .with_funding(funding)
        .with_ls_ratio(ls_ratio)
        .with_volume(open_interest.map_or(0.0, |s| s.notional_value())))
    }

    /// Refreshes the cached dashboard snapshot; cache trouble is a warning,
    /// never a cycle failure.
    async fn refresh_dashboard_snapshot(&self) {
        let snapshot = match self.build_dashboard_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                tracing::warn!(%error, "failed to build dashboard snapshot");
                return;
            }
        };
        if let Err(error) = self
            .cache
            .put_json(DASHBOARD_SNAPSHOT_KEY, &snapshot, None)
            .await
        {
            tracing::warn!(%error, "failed to cache dashboard snapshot");
        }
    }

    async fn build_dashboard_snapshot(&self) -> Result<DashboardSnapshot> {
        Ok(DashboardSnapshot {
            scores: self.repos.scores.recent(50).await?,
            flows: self.repos.flows.recent(50).await?,
            oi: self.repos.derivatives.recent(50).await?,
            price: self.repos.ohlcv.recent(200).await?,
        })
    }
}
