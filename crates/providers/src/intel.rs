//! Market-intel client supplying exchange flow observations.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use xrp_intel_core::{FlowDirection, FlowSnapshot, IntelConfig};

use crate::error::{ProviderError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct IntelResponse {
    #[serde(default)]
    exchange_flows: Vec<RawFlow>,
}

#[derive(Debug, Deserialize)]
struct RawFlow {
    exchange: Option<String>,
    direction: Option<String>,
    amount_xrp: Option<f64>,
    net_flow_xrp: Option<f64>,
}

impl RawFlow {
    /// Applies the feed's documented defaults: unknown exchange, inflow
    /// direction, zero amount, and net flow falling back to the gross
    /// amount.
    fn into_snapshot(self, timestamp: DateTime<Utc>) -> FlowSnapshot {
        let amount = self.amount_xrp.unwrap_or(0.0);
        FlowSnapshot {
            timestamp,
            exchange: self.exchange.unwrap_or_else(|| "unknown".to_string()),
            direction: self
                .direction
                .as_deref()
                .map_or(FlowDirection::In, FlowDirection::parse_lossy),
            amount,
            net_flow: self.net_flow_xrp.unwrap_or(amount),
        }
    }
}

/// Client for the enriched market-intel feed.
#[derive(Debug, Clone)]
pub struct IntelClient {
    http: reqwest::Client,
    config: IntelConfig,
    asset: String,
}

impl IntelClient {
    /// Creates a client for the given asset ticker.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: IntelConfig, asset: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            config,
            asset: asset.into(),
        })
    }

    /// Fetches the current exchange flow observations, stamped with `now`.
    ///
    /// # Errors
    /// Returns [`ProviderError::MissingCredentials`] without an API key,
    /// or a network/API/parse error.
    pub async fn exchange_flows(&self, now: DateTime<Utc>) -> Result<Vec<FlowSnapshot>> {
        let Some(api_key) = &self.config.api_key else {
            return Err(ProviderError::missing_credentials("intel API key"));
        };

        let url = format!("{}/v1/crypto/intel", self.config.api_url);
        let response = self
            .http
            .get(url)
            .bearer_auth(api_key)
            .query(&[("symbol", self.asset.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::api(status.as_u16(), message));
        }

        let payload: IntelResponse = response.json().await?;
        Ok(payload
            .exchange_flows
            .into_iter()
            .map(|raw| raw.into_snapshot(now))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn raw_flow_converts_with_all_fields() {
        let json = r#"{
            "exchange": "binance",
            "direction": "out",
            "amount_xrp": 2000000.0,
            "net_flow_xrp": -2000000.0
        }"#;
        let raw: RawFlow = serde_json::from_str(json).unwrap();
        let snapshot = raw.into_snapshot(sample_timestamp());

        assert_eq!(snapshot.exchange, "binance");
        assert_eq!(snapshot.direction, FlowDirection::Out);
        assert!((snapshot.net_flow + 2_000_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn raw_flow_applies_feed_defaults() {
        let raw: RawFlow = serde_json::from_str("{}").unwrap();
        let snapshot = raw.into_snapshot(sample_timestamp());

        assert_eq!(snapshot.exchange, "unknown");
        assert_eq!(snapshot.direction, FlowDirection::In);
        assert!(snapshot.amount.abs() < f64::EPSILON);
        assert!(snapshot.net_flow.abs() < f64::EPSILON);
    }

    #[test]
    fn missing_net_flow_falls_back_to_amount() {
        let json = r#"{"exchange": "kraken", "amount_xrp": 500.0}"#;
        let raw: RawFlow = serde_json::from_str(json).unwrap();
        let snapshot = raw.into_snapshot(sample_timestamp());
        assert!((snapshot.net_flow - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn intel_response_tolerates_missing_flows() {
        let payload: IntelResponse = serde_json::from_str(r#"{"symbol": "XRP"}"#).unwrap();
        assert!(payload.exchange_flows.is_empty());
    }

    #[tokio::test]
    async fn missing_api_key_is_an_explicit_error() {
        let client = IntelClient::new(IntelConfig::default(), "XRP").unwrap();
        let err = client.exchange_flows(sample_timestamp()).await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredentials(_)));
    }
}
