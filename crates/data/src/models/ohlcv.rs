//! OHLCV bar data model.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One OHLCV bar, typically aggregated from a recent-trades batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct OhlcvRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[sqlx(default)]
    pub id: Option<i64>,
    pub timestamp: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    /// Where the bar came from, e.g. "binance-trades".
    pub source: String,
}

impl OhlcvRecord {
    pub fn new(
        timestamp: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            source: source.into(),
        }
    }

    /// Volume as `f64` for the statistical pipeline; `None` when the
    /// stored value does not fit.
    #[must_use]
    pub fn volume_f64(&self) -> Option<f64> {
        self.volume.to_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn sample_timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn new_record_has_no_id() {
        let bar = OhlcvRecord::new(
            sample_timestamp(),
            dec!(0.50),
            dec!(0.55),
            dec!(0.49),
            dec!(0.52),
            dec!(125000),
            "binance-trades",
        );
        assert!(bar.id.is_none());
        assert_eq!(bar.source, "binance-trades");
    }

    #[test]
    fn volume_converts_to_f64() {
        let bar = OhlcvRecord::new(
            sample_timestamp(),
            dec!(0.50),
            dec!(0.55),
            dec!(0.49),
            dec!(0.52),
            dec!(125000.5),
            "binance-trades",
        );
        assert!((bar.volume_f64().unwrap() - 125_000.5).abs() < 1e-9);
    }

    #[test]
    fn record_serializes_without_null_id() {
        let bar = OhlcvRecord::new(
            sample_timestamp(),
            dec!(0.50),
            dec!(0.55),
            dec!(0.49),
            dec!(0.52),
            dec!(125000),
            "binance-trades",
        );
        let json = serde_json::to_string(&bar).unwrap();
        assert!(!json.contains("\"id\":null"));
        assert!(json.contains("\"source\":\"binance-trades\""));
    }
}
