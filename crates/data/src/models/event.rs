//! Classified event data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use xrp_intel_core::EventTag;

/// One persisted news/regulatory event with its classification tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[sqlx(default)]
    pub id: Option<i64>,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub subtype: Option<String>,
    /// Classification scores as a JSON object keyed by tag name.
    pub tags: JsonValue,
    pub severity: Option<f64>,
    pub source: String,
}

impl EventRecord {
    #[must_use]
    pub fn from_tag(tag: &EventTag) -> Self {
        let tags = tag
            .tags
            .iter()
            .map(|(k, v)| (k.clone(), JsonValue::from(*v)))
            .collect::<serde_json::Map<_, _>>();
        Self {
            id: None,
            timestamp: tag.timestamp,
            kind: tag.kind.clone(),
            subtype: tag.subtype.clone(),
            tags: JsonValue::Object(tags),
            severity: tag.severity,
            source: tag.source.clone(),
        }
    }

    /// Converts back to the domain tag. Non-numeric tag values are
    /// dropped during the projection.
    #[must_use]
    pub fn to_tag(&self) -> EventTag {
        let tags: HashMap<String, f64> = self
            .tags
            .as_object()
            .map(|map| {
                map.iter()
                    .filter_map(|(k, v)| v.as_f64().map(|score| (k.clone(), score)))
                    .collect()
            })
            .unwrap_or_default();

        EventTag {
            timestamp: self.timestamp,
            kind: self.kind.clone(),
            subtype: self.subtype.clone(),
            tags,
            severity: self.severity,
            source: self.source.clone(),
        }
    }
}
