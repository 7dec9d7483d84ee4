//! Exchange flow data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use xrp_intel_core::{FlowDirection, FlowSnapshot};

/// One persisted exchange flow observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExchangeFlowRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[sqlx(default)]
    pub id: Option<i64>,
    pub timestamp: DateTime<Utc>,
    pub exchange: String,
    /// "in" or "out".
    pub direction: String,
    /// Gross amount moved, in asset units.
    pub amount: f64,
    /// Signed net flow for the observation, in asset units.
    pub net_flow: f64,
}

impl ExchangeFlowRecord {
    #[must_use]
    pub fn from_snapshot(snapshot: &FlowSnapshot) -> Self {
        Self {
            id: None,
            timestamp: snapshot.timestamp,
            exchange: snapshot.exchange.clone(),
            direction: snapshot.direction.as_str().to_string(),
            amount: snapshot.amount,
            net_flow: snapshot.net_flow,
        }
    }

    /// Converts back to the domain snapshot; unknown direction strings
    /// default to inflow.
    #[must_use]
    pub fn to_snapshot(&self) -> FlowSnapshot {
        FlowSnapshot {
            timestamp: self.timestamp,
            exchange: self.exchange.clone(),
            direction: FlowDirection::parse_lossy(&self.direction),
            amount: self.amount,
            net_flow: self.net_flow,
        }
    }
}
