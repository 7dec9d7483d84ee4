//! Immutable domain records shared across the workspace.
//!
//! All records are constructed fresh per evaluation cycle and never mutated
//! afterwards; persistence is the data crate's concern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tag key carrying the regulatory threat classification score.
pub const REGULATORY_THREAT_TAG: &str = "regulatory_threat";
/// Tag key carrying the regulatory support classification score.
pub const REGULATORY_SUPPORT_TAG: &str = "regulatory_support";
/// Tag key carrying the unclear/neutral classification score.
pub const NEUTRAL_UNCLEAR_TAG: &str = "neutral_unclear";

/// Event type assigned to regulatory headlines.
pub const EVENT_KIND_REGULATORY: &str = "regulatory";

/// Direction of an exchange flow observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    In,
    Out,
}

impl FlowDirection {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            FlowDirection::In => "in",
            FlowDirection::Out => "out",
        }
    }

    /// Parses a direction string, defaulting to inflow for unknown values.
    #[must_use]
    pub fn parse_lossy(s: &str) -> Self {
        if s.eq_ignore_ascii_case("out") {
            FlowDirection::Out
        } else {
            FlowDirection::In
        }
    }
}

/// One observed exchange flow for the tracked asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowSnapshot {
    pub timestamp: DateTime<Utc>,
    pub exchange: String,
    pub direction: FlowDirection,
    /// Gross amount moved, in asset units.
    pub amount: f64,
    /// Signed net flow for the observation window, in asset units.
    pub net_flow: f64,
}

/// One observation of derivatives state on an exchange.
///
/// Absent metrics stay `None`; the leverage scorer defines per-field
/// absence defaults rather than conflating absence with zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OiMetricsPoint {
    pub timestamp: DateTime<Utc>,
    pub exchange: String,
    /// Open interest in contracts or asset units.
    pub oi: f64,
    /// Most recent funding rate.
    pub funding: Option<f64>,
    /// Top-trader long/short account ratio.
    pub ls_ratio: Option<f64>,
    /// Open interest notional value.
    pub volume: Option<f64>,
}

impl OiMetricsPoint {
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, exchange: impl Into<String>, oi: f64) -> Self {
        Self {
            timestamp,
            exchange: exchange.into(),
            oi,
            funding: None,
            ls_ratio: None,
            volume: None,
        }
    }

    #[must_use]
    pub fn with_funding(mut self, funding: f64) -> Self {
        self.funding = Some(funding);
        self
    }

    #[must_use]
    pub fn with_ls_ratio(mut self, ls_ratio: f64) -> Self {
        self.ls_ratio = Some(ls_ratio);
        self
    }

    #[must_use]
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }
}

/// One classified news/regulatory signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTag {
    pub timestamp: DateTime<Utc>,
    /// Event type, e.g. "regulatory" or "news".
    #[serde(rename = "type")]
    pub kind: String,
    pub subtype: Option<String>,
    /// Classification scores keyed by tag name, expected in [0, 1].
    pub tags: HashMap<String, f64>,
    pub severity: Option<f64>,
    pub source: String,
}

impl EventTag {
    pub fn new(
        timestamp: DateTime<Utc>,
        kind: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            kind: kind.into(),
            subtype: None,
            tags: HashMap::new(),
            severity: None,
            source: source.into(),
        }
    }

    #[must_use]
    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: HashMap<String, f64>) -> Self {
        self.tags = tags;
        self
    }

    #[must_use]
    pub fn with_severity(mut self, severity: f64) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Returns true for events the regulatory aggregator consumes.
    #[must_use]
    pub fn is_regulatory(&self) -> bool {
        self.kind == EVENT_KIND_REGULATORY
    }

    /// Projects the open tag map onto the typed regulatory view.
    #[must_use]
    pub fn regulatory_tags(&self) -> RegulatoryTags {
        RegulatoryTags {
            threat: self.tags.get(REGULATORY_THREAT_TAG).copied(),
            support: self.tags.get(REGULATORY_SUPPORT_TAG).copied(),
        }
    }
}

/// Typed projection of an event's regulatory classification scores.
///
/// Missing keys stay `None` and contribute zero during aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RegulatoryTags {
    pub threat: Option<f64>,
    pub support: Option<f64>,
}

impl RegulatoryTags {
    #[must_use]
    pub fn new(threat: f64, support: f64) -> Self {
        Self {
            threat: Some(threat),
            support: Some(support),
        }
    }
}

/// Heuristic manipulation indicator derived from order-book shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManipulationHint {
    /// Attached by the caller after detection; the detector itself is
    /// timestamp-agnostic.
    pub timestamp: Option<DateTime<Utc>>,
    /// Signed depth imbalance in [-1, 1].
    pub depth_imbalance: f64,
    pub rapid_wall_change: bool,
    /// Risk indicator in [0, 1].
    pub risk_score: f64,
    pub note: String,
}

impl ManipulationHint {
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// One evaluation cycle's scores, the system's primary output.
///
/// Sub-scores are conventionally in [0, 100]; the manipulation score is the
/// 0-100 scaled counterpart of the hint's risk score. `overall_score` is
/// always in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub timestamp: DateTime<Utc>,
    pub flow_score: f64,
    pub oi_score: f64,
    pub volume_score: f64,
    pub manipulation_score: f64,
    pub regulatory_score: f64,
    pub overall_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn oi_metrics_point_builder_sets_optional_fields() {
        let point = OiMetricsPoint::new(sample_timestamp(), "binance", 1000.0)
            .with_funding(0.01)
            .with_ls_ratio(1.1)
            .with_volume(2000.0);

        assert_eq!(point.exchange, "binance");
        assert_eq!(point.funding, Some(0.01));
        assert_eq!(point.ls_ratio, Some(1.1));
        assert_eq!(point.volume, Some(2000.0));
    }

    #[test]
    fn oi_metrics_point_defaults_to_absent_metrics() {
        let point = OiMetricsPoint::new(sample_timestamp(), "binance", 1000.0);
        assert!(point.funding.is_none());
        assert!(point.ls_ratio.is_none());
        assert!(point.volume.is_none());
    }

    #[test]
    fn event_tag_regulatory_projection_reads_known_keys() {
        let mut tags = HashMap::new();
        tags.insert(REGULATORY_THREAT_TAG.to_string(), 0.7);
        tags.insert(REGULATORY_SUPPORT_TAG.to_string(), 0.2);
        let event = EventTag::new(sample_timestamp(), "regulatory", "newsapi").with_tags(tags);

        let reg = event.regulatory_tags();
        assert_eq!(reg.threat, Some(0.7));
        assert_eq!(reg.support, Some(0.2));
        assert!(event.is_regulatory());
    }

    #[test]
    fn event_tag_regulatory_projection_tolerates_missing_keys() {
        let event = EventTag::new(sample_timestamp(), "news", "newsapi");
        let reg = event.regulatory_tags();
        assert!(reg.threat.is_none());
        assert!(reg.support.is_none());
        assert!(!event.is_regulatory());
    }

    #[test]
    fn event_tag_serializes_kind_as_type() {
        let event = EventTag::new(sample_timestamp(), "regulatory", "newsapi");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"regulatory\""));
        assert!(!json.contains("\"kind\""));
    }

    #[test]
    fn flow_direction_parse_lossy_defaults_to_inflow() {
        assert_eq!(FlowDirection::parse_lossy("out"), FlowDirection::Out);
        assert_eq!(FlowDirection::parse_lossy("OUT"), FlowDirection::Out);
        assert_eq!(FlowDirection::parse_lossy("in"), FlowDirection::In);
        assert_eq!(FlowDirection::parse_lossy("sideways"), FlowDirection::In);
    }

    #[test]
    fn manipulation_hint_timestamp_is_attached_post_hoc() {
        let hint = ManipulationHint {
            timestamp: None,
            depth_imbalance: 0.2,
            rapid_wall_change: false,
            risk_score: 0.1,
            note: "Calm".to_string(),
        };
        assert!(hint.timestamp.is_none());

        let stamped = hint.with_timestamp(sample_timestamp());
        assert_eq!(stamped.timestamp, Some(sample_timestamp()));
    }

    #[test]
    fn score_snapshot_round_trips_through_json() {
        let snapshot = ScoreSnapshot {
            timestamp: sample_timestamp(),
            flow_score: 60.0,
            oi_score: 55.0,
            volume_score: 50.0,
            manipulation_score: 20.0,
            regulatory_score: 40.0,
            overall_score: 57.75,
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: ScoreSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
