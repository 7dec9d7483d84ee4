use serde::{Deserialize, Serialize};

/// Top-level application configuration.
///
/// Every section has a usable default so the system can start from an empty
/// config file; deployments override individual fields via
/// `config/Config.toml` or `INTEL_`-prefixed environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Spot/futures trading pair queried for market data.
    pub symbol: String,
    /// Asset ticker used by news and intel queries.
    pub asset: String,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub binance: BinanceConfig,
    pub news: NewsConfig,
    pub sentiment: SentimentConfig,
    pub intel: IntelConfig,
    pub worker: WorkerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub url: String,
    /// TTL applied to cached dashboard snapshots, in seconds.
    pub snapshot_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BinanceConfig {
    pub api_url: String,
    pub futures_api_url: String,
    /// Optional API key sent as `X-MBX-APIKEY`; public endpoints work without it.
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    /// Search query for relevant headlines.
    pub query: String,
    pub page_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    pub api_url: String,
    /// Inference model id appended to the API URL.
    pub model: String,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntelConfig {
    pub api_url: String,
    pub api_key: Option<String>,
}

/// Worker cadences and the analytics lookback window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    pub ingest_interval_secs: u64,
    pub news_interval_secs: u64,
    pub analytics_interval_secs: u64,
    pub scheduler_interval_secs: u64,
    /// Hours of history loaded for each analytics cycle.
    pub lookback_hours: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            symbol: "XRPUSDT".to_string(),
            asset: "XRP".to_string(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            binance: BinanceConfig::default(),
            news: NewsConfig::default(),
            sentiment: SentimentConfig::default(),
            intel: IntelConfig::default(),
            worker: WorkerConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/xrp_intel".to_string(),
            max_connections: 10,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379/0".to_string(),
            snapshot_ttl_secs: 600,
        }
    }
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.binance.com".to_string(),
            futures_api_url: "https://fapi.binance.com".to_string(),
            api_key: None,
        }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            api_url: "https://newsapi.org".to_string(),
            api_key: None,
            query: "XRP OR Ripple".to_string(),
            page_size: 20,
        }
    }
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api-inference.huggingface.co/models".to_string(),
            model: "finiteautomata/beto-sentiment-analysis".to_string(),
            token: None,
        }
    }
}

impl Default for IntelConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.deepseek.com".to_string(),
            api_key: None,
        }
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            ingest_interval_secs: 300,
            news_interval_secs: 1800,
            analytics_interval_secs: 600,
            scheduler_interval_secs: 900,
            lookback_hours: 48,
        }
    }
}
