//! News classification worker.
//!
//! One cycle fetches recent headlines, classifies each for regulatory
//! impact, and stores the tagged events.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use xrp_intel_core::models::{EVENT_KIND_REGULATORY, REGULATORY_THREAT_TAG};
use xrp_intel_core::EventTag;
use xrp_intel_data::{EventRecord, Repositories};
use xrp_intel_providers::{NewsClient, SentimentClassifier};

/// Threat score above which an event is subtyped as regulatory.
pub const REGULATORY_THREAT_CUTOFF: f64 = 0.3;

/// Event type for a headline: "regulatory" when the headline itself talks
/// about regulation, "news" otherwise.
#[must_use]
pub fn event_kind(title: &str) -> &'static str {
    if title.to_lowercase().contains("regulat") {
        EVENT_KIND_REGULATORY
    } else {
        "news"
    }
}

/// Event subtype from the classification: "regulatory" on a strong threat
/// score, "macro" otherwise.
#[must_use]
pub fn event_subtype(tags: &HashMap<String, f64>) -> &'static str {
    if tags.get(REGULATORY_THREAT_TAG).copied().unwrap_or(0.0) > REGULATORY_THREAT_CUTOFF {
        "regulatory"
    } else {
        "macro"
    }
}

/// Severity of an event: the strongest classification score, zero when no
/// tags exist.
#[must_use]
pub fn max_severity(tags: &HashMap<String, f64>) -> f64 {
    tags.values().copied().fold(f64::NEG_INFINITY, f64::max).max(0.0)
}

/// Worker that turns headlines into classified events.
pub struct NewsWorker {
    news: NewsClient,
    classifier: SentimentClassifier,
    repos: Repositories,
    page_size: u32,
}

impl NewsWorker {
    #[must_use]
    pub fn new(
        news: NewsClient,
        classifier: SentimentClassifier,
        repos: Repositories,
        page_size: u32,
    ) -> Self {
        Self {
            news,
            classifier,
            repos,
            page_size,
        }
    }

    /// Runs one news cycle.
    ///
    /// # Errors
    /// Returns an error if the news fetch, classification, or storage
    /// fails.
    pub async fn run_once(&self) -> Result<()> {
        let articles = self.news.latest_headlines(self.page_size).await?;

        let mut records = Vec::with_capacity(articles.len());
        for article in &articles {
            let tags = self.classifier.classify_headline(&article.title).await?;
            let timestamp = article.published_at.unwrap_or_else(Utc::now);

            let event = EventTag::new(timestamp, event_kind(&article.title), article.source.as_str())
                .with_subtype(event_subtype(&tags))
                .with_severity(max_severity(&tags))
                .with_tags(tags);
            records.push(EventRecord::from_tag(&event));
        }

        self.repos.events.insert_batch(&records).await?;
        tracing::info!(count = records.len(), "stored news events");
        Ok(())
    }

    /// Runs news classification on an interval, logging and continuing on
    /// failure.
    pub async fn run_loop(&self, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            if let Err(error) = self.run_once().await {
                tracing::error!(%error, "news cycle failed");
            }
        }
    }
}
