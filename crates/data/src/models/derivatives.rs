//! Derivatives metrics data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use xrp_intel_core::OiMetricsPoint;

/// One persisted derivatives observation. Metric columns are nullable:
/// an exchange outage can leave gaps without dropping the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DerivativesMetricRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[sqlx(default)]
    pub id: Option<i64>,
    pub timestamp: DateTime<Utc>,
    pub exchange: String,
    pub oi: Option<f64>,
    pub funding: Option<f64>,
    pub ls_ratio: Option<f64>,
    pub volume: Option<f64>,
}

impl DerivativesMetricRecord {
    #[must_use]
    pub fn from_point(point: &OiMetricsPoint) -> Self {
        Self {
            id: None,
            timestamp: point.timestamp,
            exchange: point.exchange.clone(),
            oi: Some(point.oi),
            funding: point.funding,
            ls_ratio: point.ls_ratio,
            volume: point.volume,
        }
    }

    /// Converts to the engine's input point; a missing open interest
    /// becomes zero (no position data observed).
    #[must_use]
    pub fn to_point(&self) -> OiMetricsPoint {
        OiMetricsPoint {
            timestamp: self.timestamp,
            exchange: self.exchange.clone(),
            oi: self.oi.unwrap_or(0.0),
            funding: self.funding,
            ls_ratio: self.ls_ratio,
            volume: self.volume,
        }
    }
}
