//! Analytics worker: the evaluation cycle.
//!
//! One cycle loads the recent data window, runs the signal engine, and
//! persists and caches the resulting composite score.

use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use xrp_intel_core::{ManipulationHint, OiMetricsPoint, RegulatoryTags, ScoreSnapshot};
use xrp_intel_data::{
    CompositeScoreRecord, DerivativesMetricRecord, OhlcvRecord, Repositories, SnapshotCache,
    LATEST_SCORE_KEY,
};
use xrp_intel_providers::BinanceClient;
use xrp_intel_signals::{
    aggregate_scores, compute_flow_signal, compute_manipulation_hint, compute_oi_leverage_score,
    compute_regulatory_score, compute_volume_signal, FlowSignal, ScoreWeights, SubScores,
    VolumeSignal, WindowPolicy,
};

/// Volume z-score above which a cycle counts as a volume spike.
pub const VOLUME_SPIKE_ZSCORE: f64 = 1.5;

const ORDER_BOOK_DEPTH: usize = 50;

/// Maps a signal z-score onto the 50-centred 0-100 score convention.
#[must_use]
pub fn zscore_to_score(zscore: f64) -> f64 {
    50.0 + 10.0 * zscore
}

/// Latest cycle output cached for dashboards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestScorePayload {
    pub flow: FlowSignal,
    pub volume: VolumeSignal,
    pub oi_score: f64,
    pub manipulation: ManipulationHint,
    pub regulatory_score: f64,
    pub overall: f64,
}

/// Worker that computes composite scores over the recent data window.
pub struct AnalyticsWorker {
    binance: BinanceClient,
    repos: Repositories,
    cache: SnapshotCache,
    weights: ScoreWeights,
    policy: WindowPolicy,
    lookback_hours: i64,
}

impl AnalyticsWorker {
    #[must_use]
    pub fn new(
        binance: BinanceClient,
        repos: Repositories,
        cache: SnapshotCache,
        lookback_hours: i64,
    ) -> Self {
        Self {
            binance,
            repos,
            cache,
            weights: ScoreWeights::default(),
            policy: WindowPolicy::default(),
            lookback_hours,
        }
    }

    /// Overrides the composite weights. Supplied weights are trusted as-is.
    #[must_use]
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Overrides the normalization windows.
    #[must_use]
    pub fn with_window_policy(mut self, policy: WindowPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Runs one evaluation cycle.
    ///
    /// # Errors
    /// Returns an error if data loading, the order book fetch, the engine,
    /// or score persistence fails.
    pub async fn run_once(&self) -> Result<()> {
        let now = Utc::now();
        let cutoff = now - chrono::Duration::hours(self.lookback_hours);

        let flows = self.repos.flows.since(cutoff).await?;
        let bars = self.repos.ohlcv.since(cutoff).await?;
        let oi_rows = self.repos.derivatives.since(cutoff).await?;
        let events = self.repos.events.since(cutoff).await?;

        let flow_values: Vec<f64> = flows.iter().map(|f| f.net_flow).collect();
        let volumes: Vec<f64> = bars.iter().filter_map(OhlcvRecord::volume_f64).collect();
        let oi_points: Vec<OiMetricsPoint> =
            oi_rows.iter().map(DerivativesMetricRecord::to_point).collect();

        let flow_signal = compute_flow_signal(&flow_values, &self.policy)?;
        let volume_signal = compute_volume_signal(&volumes, &self.policy)?;
        let oi_score = compute_oi_leverage_score(&oi_points)?;

        let book = self.binance.order_book(ORDER_BOOK_DEPTH).await?;
        let volume_spike = volume_signal.zscore > VOLUME_SPIKE_ZSCORE;
        let hint = compute_manipulation_hint(&book.summarize(), volume_spike)?.with_timestamp(now);

        let regulatory: Vec<RegulatoryTags> = events
            .iter()
            .map(xrp_intel_data::EventRecord::to_tag)
            .filter(|tag| tag.is_regulatory())
            .map(|tag| tag.regulatory_tags())
            .collect();
        let regulatory_score = compute_regulatory_score(&regulatory)?;

        let sub_scores = SubScores {
            flow: zscore_to_score(flow_signal.zscore),
            oi: oi_score,
            volume: zscore_to_score(volume_signal.zscore),
            manipulation: hint.risk_score * 100.0,
            regulatory: regulatory_score,
        };
        let overall = aggregate_scores(&sub_scores, &self.weights)?;

        let snapshot = ScoreSnapshot {
            timestamp: now,
            flow_score: sub_scores.flow,
            oi_score,
            volume_score: sub_scores.volume,
            manipulation_score: sub_scores.manipulation,
            regulatory_score,
            overall_score: overall,
        };
        self.repos
            .scores
            .insert(&CompositeScoreRecord::from_snapshot(&snapshot))
            .await?;

        let payload = LatestScorePayload {
            flow: flow_signal,
            volume: volume_signal,
            oi_score,
            manipulation: hint,
            regulatory_score,
            overall,
        };
        if let Err(error) = self.cache.put_json(LATEST_SCORE_KEY, &payload, None).await {
            tracing::warn!(%error, "failed to cache latest score");
        }

        tracing::info!(overall, "analytics cycle complete");
        Ok(())
    }

    /// Runs analytics on an interval, logging and continuing on failure.
    pub async fn run_loop(&self, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            if let Err(error) = self.run_once().await {
                tracing::error!(%error, "analytics cycle failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zscore_mapping_is_50_centred() {
        assert!((zscore_to_score(0.0) - 50.0).abs() < f64::EPSILON);
        assert!((zscore_to_score(1.5) - 65.0).abs() < f64::EPSILON);
        assert!((zscore_to_score(-2.0) - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn spike_threshold_matches_convention() {
        assert!(1.6 > VOLUME_SPIKE_ZSCORE);
        assert!(!(1.5 > VOLUME_SPIKE_ZSCORE));
    }

    #[test]
    fn latest_score_payload_serializes_engine_outputs() {
        let payload = LatestScorePayload {
            flow: FlowSignal::neutral(),
            volume: VolumeSignal::neutral(),
            oi_score: 50.0,
            manipulation: ManipulationHint {
                timestamp: None,
                depth_imbalance: 0.0,
                rapid_wall_change: false,
                risk_score: 0.0,
                note: "Calm".to_string(),
            },
            regulatory_score: 25.0,
            overall: 48.75,
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"regime\":\"normal\""));
        assert!(json.contains("\"note\":\"Calm\""));
        assert!(json.contains("\"overall\":48.75"));
    }
}
