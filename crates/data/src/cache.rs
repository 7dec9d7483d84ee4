//! Redis-backed snapshot cache.
//!
//! Holds TTL'd JSON snapshots of the latest cycle output so a dashboard can
//! fall back to cached data when the database is unreachable. Cache
//! failures are the caller's to log and swallow; a cold cache is never a
//! cycle failure.

use anyhow::Result;
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;
use xrp_intel_core::CacheConfig;

/// Key holding the most recent evaluation cycle's signals and scores.
pub const LATEST_SCORE_KEY: &str = "latest:score";

/// Key holding the recent-history snapshot served to dashboards.
pub const DASHBOARD_SNAPSHOT_KEY: &str = "dashboard:snapshot";

/// JSON snapshot cache over Redis.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    client: redis::Client,
    default_ttl_secs: u64,
}

impl SnapshotCache {
    /// Creates a cache client from the configured URL.
    ///
    /// # Errors
    /// Returns an error if the URL cannot be parsed.
    pub fn connect(config: &CacheConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        Ok(Self {
            client,
            default_ttl_secs: config.snapshot_ttl_secs,
        })
    }

    /// TTL applied when the caller does not specify one.
    #[must_use]
    pub fn default_ttl_secs(&self) -> u64 {
        self.default_ttl_secs
    }

    /// Serializes and stores a value under the key with a TTL.
    ///
    /// # Errors
    /// Returns an error if serialization or the Redis command fails.
    pub async fn put_json<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_secs: Option<u64>,
    ) -> Result<()> {
        let payload = serde_json::to_string(value)?;
        let ttl = ttl_secs.unwrap_or(self.default_ttl_secs);
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set_ex::<_, _, ()>(key, payload, ttl).await?;
        Ok(())
    }

    /// Fetches and deserializes a cached value, `None` on a cache miss.
    ///
    /// # Errors
    /// Returns an error if the Redis command or deserialization fails.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(key).await?;
        match raw {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }
}
