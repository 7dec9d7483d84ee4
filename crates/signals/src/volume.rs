//! Volume signal derivation.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::stats::{classify_regime, compute_zscore, mean, Regime, RegimeThresholds, WindowPolicy};

/// Normalized view of recent traded volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeSignal {
    pub zscore: f64,
    pub regime: Regime,
    /// Mean of the trailing baseline window.
    pub baseline: f64,
    /// Most recent observation.
    pub latest: f64,
}

impl VolumeSignal {
    /// Neutral signal returned when no volume data is available.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            zscore: 0.0,
            regime: Regime::Normal,
            baseline: 0.0,
            latest: 0.0,
        }
    }
}

/// Derives the volume regime and baseline from a chronological volume series.
///
/// Empty input yields the neutral signal, never an error.
///
/// # Errors
/// Returns [`SignalError::InvalidInput`](crate::SignalError) if the series
/// contains a non-finite value.
pub fn compute_volume_signal(volumes: &[f64], policy: &WindowPolicy) -> Result<VolumeSignal> {
    let Some(latest) = volumes.last() else {
        return Ok(VolumeSignal::neutral());
    };

    let zscore = compute_zscore(volumes, policy.zscore_window)?;
    let regime = classify_regime(zscore, &RegimeThresholds::default());
    let baseline = if volumes.len() >= policy.baseline_window {
        mean(&volumes[volumes.len() - policy.baseline_window..])
    } else {
        mean(volumes)
    };

    Ok(VolumeSignal {
        zscore,
        regime,
        baseline,
        latest: *latest,
    })
}
