//! Evaluation-cycle workers and the sequential scheduler.
//!
//! Each worker wraps one cycle (`run_once`) plus an interval loop that
//! logs failures and keeps going: a scoring pipeline on a cadence skips a
//! bad cycle rather than halting.

pub mod analytics;
pub mod ingest;
pub mod news;
pub mod scheduler;

pub use analytics::{AnalyticsWorker, LatestScorePayload};
pub use ingest::{DashboardSnapshot, IngestWorker};
pub use news::NewsWorker;
pub use scheduler::Scheduler;

use anyhow::Result;
use xrp_intel_core::AppConfig;
use xrp_intel_data::{Database, SnapshotCache};
use xrp_intel_providers::{BinanceClient, IntelClient, NewsClient, SentimentClassifier};

/// The three workers wired against shared storage and providers.
pub struct Workers {
    pub ingest: IngestWorker,
    pub news: NewsWorker,
    pub analytics: AnalyticsWorker,
}

impl Workers {
    /// Connects storage and providers from the configuration and builds
    /// the workers. Creates the database schema when missing.
    ///
    /// # Errors
    /// Returns an error if the database is unreachable or a client cannot
    /// be constructed.
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        let database = Database::connect(&config.database).await?;
        database.ensure_schema().await?;
        let repos = database.repositories();
        let cache = SnapshotCache::connect(&config.cache)?;

        let binance = BinanceClient::new(config.binance.clone(), config.symbol.as_str())?;
        let intel = IntelClient::new(config.intel.clone(), config.asset.as_str())?;
        let news_client = NewsClient::new(config.news.clone())?;
        let classifier = SentimentClassifier::new(config.sentiment.clone())?;

        Ok(Self {
            ingest: IngestWorker::new(binance.clone(), intel, repos.clone(), cache.clone()),
            news: NewsWorker::new(news_client, classifier, repos.clone(), config.news.page_size),
            analytics: AnalyticsWorker::new(binance, repos, cache, config.worker.lookback_hours),
        })
    }
}
