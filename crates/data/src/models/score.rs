//! Composite score data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use xrp_intel_core::ScoreSnapshot;

/// One persisted evaluation cycle's scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CompositeScoreRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[sqlx(default)]
    pub id: Option<i64>,
    pub timestamp: DateTime<Utc>,
    pub flow_score: f64,
    pub oi_score: f64,
    pub volume_score: f64,
    pub manipulation_score: f64,
    pub regulatory_score: f64,
    pub overall_score: f64,
}

impl CompositeScoreRecord {
    #[must_use]
    pub fn from_snapshot(snapshot: &ScoreSnapshot) -> Self {
        Self {
            id: None,
            timestamp: snapshot.timestamp,
            flow_score: snapshot.flow_score,
            oi_score: snapshot.oi_score,
            volume_score: snapshot.volume_score,
            manipulation_score: snapshot.manipulation_score,
            regulatory_score: snapshot.regulatory_score,
            overall_score: snapshot.overall_score,
        }
    }

    #[must_use]
    pub fn to_snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            timestamp: self.timestamp,
            flow_score: self.flow_score,
            oi_score: self.oi_score,
            volume_score: self.volume_score,
            manipulation_score: self.manipulation_score,
            regulatory_score: self.regulatory_score,
            overall_score: self.overall_score,
        }
    }
}
