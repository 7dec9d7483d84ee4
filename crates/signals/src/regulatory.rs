//! Regulatory sentiment aggregation.

use xrp_intel_core::RegulatoryTags;

use crate::error::{ensure_finite, Result};

/// Score returned when no regulatory events are available.
///
/// Deliberately below the 50 midpoint: an absence of regulatory news is
/// treated as mildly risk-aware, not as confirmed calm.
pub const NO_SIGNAL_REGULATORY_SCORE: f64 = 25.0;

/// Aggregates a batch of regulatory classification results into a [0, 100]
/// score. Missing threat/support tags contribute zero.
///
/// # Errors
/// Returns [`SignalError::InvalidInput`](crate::SignalError) if any tag
/// score is non-finite.
pub fn compute_regulatory_score(events: &[RegulatoryTags]) -> Result<f64> {
    if events.is_empty() {
        return Ok(NO_SIGNAL_REGULATORY_SCORE);
    }
    ensure_finite(
        events
            .iter()
            .flat_map(|e| [e.threat, e.support].into_iter().flatten()),
        "events",
    )?;

    let n = events.len() as f64;
    let threat = events.iter().map(|e| e.threat.unwrap_or(0.0)).sum::<f64>() / n;
    let support = events.iter().map(|e| e.support.unwrap_or(0.0)).sum::<f64>() / n;

    Ok((50.0 + (support - threat) * 50.0).clamp(0.0, 100.0))
}
