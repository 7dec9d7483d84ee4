//! NewsAPI headline client.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use xrp_intel_core::NewsConfig;

use crate::error::{ProviderError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One fetched headline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub source: String,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    title: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    source: Option<RawSource>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    name: Option<String>,
}

impl RawArticle {
    fn into_article(self) -> Article {
        let published_at = self
            .published_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));
        Article {
            title: self.title.unwrap_or_default(),
            source: self
                .source
                .and_then(|s| s.name)
                .unwrap_or_else(|| "news".to_string()),
            published_at,
        }
    }
}

/// NewsAPI client scoped to the configured query.
#[derive(Debug, Clone)]
pub struct NewsClient {
    http: reqwest::Client,
    config: NewsConfig,
}

impl NewsClient {
    /// Creates a client from the news configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: NewsConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, config })
    }

    /// Fetches the latest headlines matching the configured query, newest
    /// first.
    ///
    /// # Errors
    /// Returns [`ProviderError::MissingCredentials`] without an API key,
    /// or a network/API/parse error.
    pub async fn latest_headlines(&self, limit: u32) -> Result<Vec<Article>> {
        let Some(api_key) = &self.config.api_key else {
            return Err(ProviderError::missing_credentials("news API key"));
        };

        let url = format!("{}/v2/everything", self.config.api_url);
        let response = self
            .http
            .get(url)
            .query(&[
                ("q", self.config.query.as_str()),
                ("pageSize", &limit.to_string()),
                ("sortBy", "publishedAt"),
                ("language", "en"),
                ("apiKey", api_key),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::api(status.as_u16(), message));
        }

        let payload: EverythingResponse = response.json().await?;
        Ok(payload
            .articles
            .into_iter()
            .map(RawArticle::into_article)
            .collect())
    }
}
