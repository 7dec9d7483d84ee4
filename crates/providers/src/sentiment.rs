//! Sentiment inference client for regulatory tagging.
//!
//! Maps the inference API's POS/NEG/NEU labels onto the regulatory tag
//! keys the aggregator consumes. Without a token the classifier degrades
//! to a neutral classification instead of failing: a scoring pipeline on a
//! cadence must keep producing events.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;
use xrp_intel_core::models::{NEUTRAL_UNCLEAR_TAG, REGULATORY_SUPPORT_TAG, REGULATORY_THREAT_TAG};
use xrp_intel_core::SentimentConfig;

use crate::error::{ProviderError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Deserialize)]
struct LabelScore {
    #[serde(default)]
    label: String,
    #[serde(default)]
    score: f64,
}

/// Neutral classification used when inference is unavailable.
#[must_use]
pub fn neutral_classification() -> HashMap<String, f64> {
    let mut tags = HashMap::new();
    tags.insert(REGULATORY_THREAT_TAG.to_string(), 0.0);
    tags.insert(REGULATORY_SUPPORT_TAG.to_string(), 0.0);
    tags.insert(NEUTRAL_UNCLEAR_TAG.to_string(), 1.0);
    tags
}

fn tags_from_labels(labels: &[LabelScore]) -> HashMap<String, f64> {
    let score_for = |wanted: &str| {
        labels
            .iter()
            .find(|l| l.label == wanted)
            .map_or(0.0, |l| l.score)
    };
    let mut tags = HashMap::new();
    tags.insert(REGULATORY_THREAT_TAG.to_string(), score_for("NEG"));
    tags.insert(REGULATORY_SUPPORT_TAG.to_string(), score_for("POS"));
    tags.insert(NEUTRAL_UNCLEAR_TAG.to_string(), score_for("NEU"));
    tags
}

/// Headline classifier backed by a hosted inference API.
#[derive(Debug, Clone)]
pub struct SentimentClassifier {
    http: reqwest::Client,
    config: SentimentConfig,
}

impl SentimentClassifier {
    /// Creates a classifier from the sentiment configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: SentimentConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, config })
    }

    /// Classifies a headline into regulatory tag scores.
    ///
    /// Without a configured token this logs a warning and returns the
    /// neutral classification.
    ///
    /// # Errors
    /// Returns a network/API/parse error when inference is configured but
    /// fails.
    pub async fn classify_headline(&self, headline: &str) -> Result<HashMap<String, f64>> {
        let Some(token) = &self.config.token else {
            tracing::warn!("sentiment token missing; returning neutral classification");
            return Ok(neutral_classification());
        };

        let url = format!("{}/{}", self.config.api_url, self.config.model);
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&serde_json::json!({ "inputs": headline }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::api(status.as_u16(), message));
        }

        let labels: Vec<LabelScore> = response.json().await?;
        Ok(tags_from_labels(&labels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_classification_has_unit_unclear_mass() {
        let tags = neutral_classification();
        assert_eq!(tags.get(REGULATORY_THREAT_TAG), Some(&0.0));
        assert_eq!(tags.get(REGULATORY_SUPPORT_TAG), Some(&0.0));
        assert_eq!(tags.get(NEUTRAL_UNCLEAR_TAG), Some(&1.0));
    }

    #[test]
    fn labels_map_onto_regulatory_tags() {
        let labels: Vec<LabelScore> = serde_json::from_str(
            r#"[
                {"label": "NEG", "score": 0.72},
                {"label": "NEU", "score": 0.2},
                {"label": "POS", "score": 0.08}
            ]"#,
        )
        .unwrap();
        let tags = tags_from_labels(&labels);

        assert_eq!(tags.get(REGULATORY_THREAT_TAG), Some(&0.72));
        assert_eq!(tags.get(REGULATORY_SUPPORT_TAG), Some(&0.08));
        assert_eq!(tags.get(NEUTRAL_UNCLEAR_TAG), Some(&0.2));
    }

    #[test]
    fn unknown_labels_score_zero() {
        let labels: Vec<LabelScore> =
            serde_json::from_str(r#"[{"label": "OTHER", "score": 0.9}]"#).unwrap();
        let tags = tags_from_labels(&labels);

        assert_eq!(tags.get(REGULATORY_THREAT_TAG), Some(&0.0));
        assert_eq!(tags.get(REGULATORY_SUPPORT_TAG), Some(&0.0));
        assert_eq!(tags.get(NEUTRAL_UNCLEAR_TAG), Some(&0.0));
    }

    #[tokio::test]
    async fn missing_token_degrades_to_neutral() {
        let classifier = SentimentClassifier::new(SentimentConfig::default()).unwrap();
        let tags = classifier.classify_headline("SEC sues exchange").await.unwrap();
        assert_eq!(tags, neutral_classification());
    }
}
