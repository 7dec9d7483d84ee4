//! Sequential scheduler for lightweight deployments.
//!
//! Runs ingest, news, and analytics back to back on one interval. A failed
//! cycle is logged and the loop continues.

use std::time::Duration;

use anyhow::Result;

use crate::Workers;

/// Scheduler driving all three workers sequentially.
pub struct Scheduler {
    workers: Workers,
    interval: Duration,
}

impl Scheduler {
    #[must_use]
    pub fn new(workers: Workers, interval: Duration) -> Self {
        Self { workers, interval }
    }

    /// Runs one combined cycle: ingest, then news, then analytics.
    ///
    /// # Errors
    /// Returns the first worker error; later workers are skipped for the
    /// cycle.
    pub async fn cycle(&self) -> Result<()> {
        self.workers.ingest.run_once().await?;
        self.workers.news.run_once().await?;
        self.workers.analytics.run_once().await?;
        Ok(())
    }

    /// Runs combined cycles forever on the configured interval.
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.interval);
        loop {
            ticker.tick().await;
            tracing::info!("scheduler tick");
            if let Err(error) = self.cycle().await {
                tracing::error!(%error, "scheduler cycle failed");
            }
        }
    }
}
