//! Statistical normalization and regime classification.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, Result};

/// Default number of trailing observations considered by the z-score.
pub const DEFAULT_ZSCORE_WINDOW: usize = 30;

/// Default number of trailing observations averaged into a baseline.
pub const DEFAULT_BASELINE_WINDOW: usize = 24;

/// Windowing policy applied when normalizing a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowPolicy {
    /// Trailing observations considered by the z-score.
    pub zscore_window: usize,
    /// Trailing observations averaged into the baseline.
    pub baseline_window: usize,
}

impl Default for WindowPolicy {
    fn default() -> Self {
        Self {
            zscore_window: DEFAULT_ZSCORE_WINDOW,
            baseline_window: DEFAULT_BASELINE_WINDOW,
        }
    }
}

/// Coarse activity bucket derived from a z-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Low,
    Normal,
    High,
}

impl Regime {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Regime::Low => "low",
            Regime::Normal => "normal",
            Regime::High => "high",
        }
    }
}

/// Z-score thresholds splitting the three regimes.
///
/// Boundary values are inclusive: a z-score exactly at a threshold lands in
/// the extreme regime, never in `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeThresholds {
    pub low: f64,
    pub high: f64,
}

impl Default for RegimeThresholds {
    fn default() -> Self {
        Self {
            low: -0.8,
            high: 0.8,
        }
    }
}

/// Computes the z-score of the last element of `series` against the
/// trailing `window` observations (Bessel-corrected sample deviation).
///
/// An empty window yields 0.0. A singleton window has its deviation defined
/// as 1.0, and a deviation of exactly zero (constant series) is substituted
/// with 1.0; both cases avoid division by zero and produce a zero-scaled
/// deviation instead of an error.
///
/// # Errors
/// Returns [`SignalError::InvalidInput`](crate::SignalError) if the series
/// contains a non-finite value.
pub fn compute_zscore(series: &[f64], window: usize) -> Result<f64> {
    ensure_finite(series.iter().copied(), "series")?;

    let tail = &series[series.len().saturating_sub(window)..];
    let Some(last) = tail.last() else {
        return Ok(0.0);
    };

    let n = tail.len() as f64;
    let mean = tail.iter().sum::<f64>() / n;
    let std = if tail.len() > 1 {
        let variance = tail.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        variance.sqrt()
    } else {
        1.0
    };
    let effective_std = if std == 0.0 { 1.0 } else { std };

    Ok((last - mean) / effective_std)
}

/// Buckets a z-score into a [`Regime`]. Total over all inputs.
#[must_use]
pub fn classify_regime(zscore: f64, thresholds: &RegimeThresholds) -> Regime {
    if zscore >= thresholds.high {
        Regime::High
    } else if zscore <= thresholds.low {
        Regime::Low
    } else {
        Regime::Normal
    }
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zscore_empty_series_is_zero() {
        let z = compute_zscore(&[], DEFAULT_ZSCORE_WINDOW).unwrap();
        assert!(z.abs() < f64::EPSILON);
    }

    #[test]
    fn zscore_singleton_is_zero() {
        // Deviation is defined as 1.0 and the numerator is zero.
        let z = compute_zscore(&[42.0], DEFAULT_ZSCORE_WINDOW).unwrap();
        assert!(z.abs() < f64::EPSILON);
    }

    #[test]
    fn zscore_constant_series_is_zero() {
        // Zero deviation is substituted with 1.0 rather than dividing by zero.
        let z = compute_zscore(&[5.0; 10], DEFAULT_ZSCORE_WINDOW).unwrap();
        assert!(z.is_finite());
        assert!(z.abs() < f64::EPSILON);
    }

    #[test]
    fn zscore_sign_matches_last_minus_mean() {
        let above = compute_zscore(&[1.0, 2.0, 3.0, 10.0], DEFAULT_ZSCORE_WINDOW).unwrap();
        assert!(above > 0.0);

        let below = compute_zscore(&[10.0, 9.0, 8.0, 1.0], DEFAULT_ZSCORE_WINDOW).unwrap();
        assert!(below < 0.0);
    }

    #[test]
    fn zscore_known_value() {
        // Window [1..5]: mean 3, sample std sqrt(2.5).
        let z = compute_zscore(&[1.0, 2.0, 3.0, 4.0, 5.0], DEFAULT_ZSCORE_WINDOW).unwrap();
        let expected = 2.0 / 2.5_f64.sqrt();
        assert!((z - expected).abs() < 1e-12);
    }

    #[test]
    fn zscore_considers_only_trailing_window() {
        // A huge prefix outside the window must not influence the result.
        let mut series = vec![1_000_000.0; 20];
        series.extend(std::iter::repeat(10.0).take(29));
        series.push(20.0);

        let windowed = compute_zscore(&series, 30).unwrap();
        let reference = compute_zscore(&series[series.len() - 30..], 30).unwrap();
        assert!((windowed - reference).abs() < 1e-12);
        assert!(windowed > 0.0);
    }

    #[test]
    fn zscore_window_larger_than_series_uses_everything() {
        let z_small = compute_zscore(&[1.0, 2.0, 3.0], 30).unwrap();
        let z_exact = compute_zscore(&[1.0, 2.0, 3.0], 3).unwrap();
        assert!((z_small - z_exact).abs() < 1e-12);
    }

    #[test]
    fn zscore_rejects_non_finite_values() {
        assert!(compute_zscore(&[1.0, f64::NAN], 30).is_err());
        assert!(compute_zscore(&[f64::INFINITY, 1.0], 30).is_err());
    }

    #[test]
    fn regime_thresholds_are_inclusive_at_boundaries() {
        let thresholds = RegimeThresholds::default();
        assert_eq!(classify_regime(0.8, &thresholds), Regime::High);
        assert_eq!(classify_regime(-0.8, &thresholds), Regime::Low);
    }

    #[test]
    fn regime_classification_is_total() {
        let thresholds = RegimeThresholds::default();
        assert_eq!(classify_regime(3.2, &thresholds), Regime::High);
        assert_eq!(classify_regime(0.0, &thresholds), Regime::Normal);
        assert_eq!(classify_regime(-2.5, &thresholds), Regime::Low);
        assert_eq!(classify_regime(0.79, &thresholds), Regime::Normal);
        assert_eq!(classify_regime(-0.79, &thresholds), Regime::Normal);
    }

    #[test]
    fn regime_respects_custom_thresholds() {
        let thresholds = RegimeThresholds {
            low: -2.0,
            high: 2.0,
        };
        assert_eq!(classify_regime(1.5, &thresholds), Regime::Normal);
        assert_eq!(classify_regime(2.0, &thresholds), Regime::High);
        assert_eq!(classify_regime(-2.0, &thresholds), Regime::Low);
    }

    #[test]
    fn regime_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Regime::High).unwrap(), "\"high\"");
        assert_eq!(serde_json::to_string(&Regime::Low).unwrap(), "\"low\"");
        assert_eq!(
            serde_json::to_string(&Regime::Normal).unwrap(),
            "\"normal\""
        );
    }

    #[test]
    fn window_policy_default_matches_documented_sizes() {
        let policy = WindowPolicy::default();
        assert_eq!(policy.zscore_window, 30);
        assert_eq!(policy.baseline_window, 24);
    }
}
