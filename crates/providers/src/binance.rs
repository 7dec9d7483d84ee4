//! Binance spot/futures market data client.
//!
//! All consumed endpoints are public; an API key is attached when
//! configured. Binance serves numbers as JSON strings, so every numeric
//! field goes through an explicit string parser. Redirects are disabled:
//! a 3xx answer from a market-data endpoint means a misconfigured proxy
//! and is surfaced as an error instead of being followed.

use std::time::Duration;

use serde::{Deserialize, Deserializer};
use xrp_intel_core::{BinanceConfig, OrderBookSnapshot, PriceLevel};

use crate::error::{ProviderError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_TRADES_LIMIT: usize = 1000;

fn f64_from_str<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse::<f64>().map_err(serde::de::Error::custom)
}

fn opt_f64_from_str<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(s) => s
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// One executed trade.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Trade {
    #[serde(deserialize_with = "f64_from_str")]
    pub price: f64,
    #[serde(deserialize_with = "f64_from_str")]
    pub qty: f64,
    /// Trade time in epoch milliseconds.
    pub time: i64,
}

#[derive(Debug, Deserialize)]
struct DepthResponse {
    bids: Vec<[String; 2]>,
    asks: Vec<[String; 2]>,
}

#[derive(Debug, Deserialize)]
struct PremiumIndex {
    #[serde(rename = "lastFundingRate", deserialize_with = "f64_from_str")]
    last_funding_rate: f64,
}

/// One open-interest history observation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct OpenInterestStat {
    #[serde(
        rename = "sumOpenInterest",
        default,
        deserialize_with = "opt_f64_from_str"
    )]
    pub sum_open_interest: Option<f64>,
    #[serde(
        rename = "sumOpenInterestValue",
        default,
        deserialize_with = "opt_f64_from_str"
    )]
    pub sum_open_interest_value: Option<f64>,
}

impl OpenInterestStat {
    /// Open interest with the notional value as fallback, zero when both
    /// are absent or zero.
    #[must_use]
    pub fn effective_oi(&self) -> f64 {
        match self.sum_open_interest {
            Some(oi) if oi != 0.0 => oi,
            _ => self.sum_open_interest_value.unwrap_or(0.0),
        }
    }

    /// Open interest notional value, zero when absent.
    #[must_use]
    pub fn notional_value(&self) -> f64 {
        self.sum_open_interest_value.unwrap_or(0.0)
    }
}

#[derive(Debug, Deserialize)]
struct LongShortStat {
    #[serde(rename = "longShortRatio", deserialize_with = "f64_from_str")]
    long_short_ratio: f64,
}

/// Binance market data client for one symbol.
#[derive(Debug, Clone)]
pub struct BinanceClient {
    http: reqwest::Client,
    config: BinanceConfig,
    symbol: String,
}

impl BinanceClient {
    /// Creates a client for the given symbol.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: BinanceConfig, symbol: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            config,
            symbol: symbol.into(),
        })
    }

    /// The symbol this client queries.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, String)],
    ) -> Result<T> {
        let mut request = self.http.get(url).query(query);
        if let Some(key) = &self.config.api_key {
            request = request.header("X-MBX-APIKEY", key);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_redirection() {
            let location = response
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("<unknown>")
                .to_string();
            return Err(ProviderError::unexpected_redirect(status.as_u16(), location));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::api(status.as_u16(), message));
        }

        Ok(response.json::<T>().await?)
    }

    /// Fetches the most recent trades, chronological, capped at 1000.
    ///
    /// # Errors
    /// Returns an error on network, API, or parse failure.
    pub async fn recent_trades(&self, limit: usize) -> Result<Vec<Trade>> {
        let url = format!("{}/api/v3/trades", self.config.api_url);
        let query = [
            ("symbol", self.symbol.clone()),
            ("limit", limit.min(MAX_TRADES_LIMIT).to_string()),
        ];
        self.get_json(url, &query).await
    }

    /// Fetches an order book snapshot.
    ///
    /// # Errors
    /// Returns an error on network, API, or parse failure.
    pub async fn order_book(&self, limit: usize) -> Result<OrderBookSnapshot> {
        let url = format!("{}/api/v3/depth", self.config.api_url);
        let query = [
            ("symbol", self.symbol.clone()),
            ("limit", limit.to_string()),
        ];
        let depth: DepthResponse = self.get_json(url, &query).await?;
        Ok(OrderBookSnapshot {
            bids: parse_levels(&depth.bids)?,
            asks: parse_levels(&depth.asks)?,
        })
    }

    /// Fetches the latest funding rate from the premium index.
    ///
    /// # Errors
    /// Returns an error on network, API, or parse failure.
    pub async fn funding_rate(&self) -> Result<f64> {
        let url = format!("{}/fapi/v1/premiumIndex", self.config.futures_api_url);
        let query = [("symbol", self.symbol.clone())];
        let index: PremiumIndex = self.get_json(url, &query).await?;
        Ok(index.last_funding_rate)
    }

    /// Fetches the latest open-interest observation, `None` when the
    /// history endpoint has nothing yet.
    ///
    /// # Errors
    /// Returns an error on network, API, or parse failure.
    pub async fn open_interest(&self) -> Result<Option<OpenInterestStat>> {
        let url = format!(
            "{}/futures/data/openInterestHist",
            self.config.futures_api_url
        );
        let query = [
            ("symbol", self.symbol.clone()),
            ("period", "5m".to_string()),
            ("limit", "1".to_string()),
        ];
        let stats: Vec<OpenInterestStat> = self.get_json(url, &query).await?;
        Ok(stats.into_iter().next())
    }

    /// Fetches the latest top-trader long/short account ratio, defaulting
    /// to 1.0 (balanced) when no observation exists.
    ///
    /// # Errors
    /// Returns an error on network, API, or parse failure.
    pub async fn long_short_ratio(&self) -> Result<f64> {
        let url = format!(
            "{}/futures/data/topLongShortAccountRatio",
            self.config.futures_api_url
        );
        let query = [
            ("symbol", self.symbol.clone()),
            ("period", "5m".to_string()),
            ("limit", "1".to_string()),
        ];
        let stats: Vec<LongShortStat> = self.get_json(url, &query).await?;
        Ok(stats
            .into_iter()
            .next()
            .map_or(1.0, |s| s.long_short_ratio))
    }
}

fn parse_levels(levels: &[[String; 2]]) -> Result<Vec<PriceLevel>> {
    levels
        .iter()
        .map(|[price, quantity]| {
            let price = price
                .parse::<f64>()
                .map_err(|e| ProviderError::Serialization(format!("bad price {price:?}: {e}")))?;
            let quantity = quantity.parse::<f64>().map_err(|e| {
                ProviderError::Serialization(format!("bad quantity {quantity:?}: {e}"))
            })?;
            Ok(PriceLevel { price, quantity })
        })
        .collect()
}
