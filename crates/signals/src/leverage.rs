//! Leverage scoring from derivatives metrics.

use xrp_intel_core::OiMetricsPoint;

use crate::error::{ensure_finite, Result};

/// Score returned when no derivatives data is available.
pub const NEUTRAL_LEVERAGE_SCORE: f64 = 50.0;

const OI_CHANGE_WEIGHT: f64 = 0.2;
const FUNDING_WEIGHT: f64 = 0.3;
const LS_SKEW_WEIGHT: f64 = 0.1;

/// Scores leverage conditions in [0, 100] from chronological derivatives
/// observations.
///
/// The score is centred at 50 and shifted by the open-interest change
/// against the previous observation (weight 0.2), the latest funding rate
/// (weight 0.3, the strongest near-term leverage input), and the long/short
/// account skew (weight 0.1). An absent funding rate contributes nothing;
/// an absent or zero long/short ratio contributes nothing; a zero previous
/// open interest pins the change term to zero.
///
/// # Errors
/// Returns [`SignalError::InvalidInput`](crate::SignalError) if any metric
/// contains a non-finite value.
pub fn compute_oi_leverage_score(metrics: &[OiMetricsPoint]) -> Result<f64> {
    let Some(latest) = metrics.last() else {
        return Ok(NEUTRAL_LEVERAGE_SCORE);
    };
    ensure_finite(
        metrics
            .iter()
            .flat_map(|m| [Some(m.oi), m.funding, m.ls_ratio].into_iter().flatten()),
        "metrics",
    )?;

    let oi_change_pct = match metrics.len().checked_sub(2).map(|i| &metrics[i]) {
        Some(prev) if prev.oi != 0.0 => (latest.oi - prev.oi) / prev.oi * 100.0,
        _ => 0.0,
    };
    let funding_bias = latest.funding.map_or(0.0, |f| f * 100.0);
    let ls_skew = match latest.ls_ratio {
        Some(ratio) if ratio != 0.0 => (ratio - 1.0) * 100.0,
        _ => 0.0,
    };

    let score = 50.0
        + OI_CHANGE_WEIGHT * oi_change_pct
        + FUNDING_WEIGHT * funding_bias
        + LS_SKEW_WEIGHT * ls_skew;
    Ok(score.clamp(0.0, 100.0))
}
