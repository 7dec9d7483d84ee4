//! Exchange flow signal derivation.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::stats::{classify_regime, compute_zscore, Regime, RegimeThresholds, WindowPolicy};

/// Normalized view of recent net exchange flows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowSignal {
    /// Most recent net flow value.
    pub net_flow: f64,
    pub zscore: f64,
    pub regime: Regime,
}

impl FlowSignal {
    /// Neutral signal returned when no flow data is available.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            net_flow: 0.0,
            zscore: 0.0,
            regime: Regime::Normal,
        }
    }
}

/// Derives the net-flow regime from a chronological series of net flows.
///
/// Empty input yields the neutral signal, never an error.
///
/// # Errors
/// Returns [`SignalError::InvalidInput`](crate::SignalError) if the series
/// contains a non-finite value.
pub fn compute_flow_signal(net_flows: &[f64], policy: &WindowPolicy) -> Result<FlowSignal> {
    let Some(latest) = net_flows.last() else {
        return Ok(FlowSignal::neutral());
    };

    let zscore = compute_zscore(net_flows, policy.zscore_window)?;
    let regime = classify_regime(zscore, &RegimeThresholds::default());

    Ok(FlowSignal {
        net_flow: *latest,
        zscore,
        regime,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_neutral() {
        let signal = compute_flow_signal(&[], &WindowPolicy::default()).unwrap();
        assert_eq!(signal, FlowSignal::neutral());
    }

    #[test]
    fn net_flow_is_last_element() {
        let signal =
            compute_flow_signal(&[-50.0, -20.0, 10.0, 80.0], &WindowPolicy::default()).unwrap();
        assert!((signal.net_flow - 80.0).abs() < f64::EPSILON);
        assert!(signal.zscore > 0.0);
    }

    #[test]
    fn regime_round_trips_through_classifier() {
        let signal =
            compute_flow_signal(&[-50.0, -20.0, 10.0, 80.0], &WindowPolicy::default()).unwrap();
        let reclassified = classify_regime(signal.zscore, &RegimeThresholds::default());
        assert_eq!(signal.regime, reclassified);
    }

    #[test]
    fn heavy_outflow_classifies_low() {
        let mut flows = vec![0.0; 20];
        flows.push(-500.0);
        let signal = compute_flow_signal(&flows, &WindowPolicy::default()).unwrap();
        assert!(signal.zscore < -0.8);
        assert_eq!(signal.regime, Regime::Low);
    }

    #[test]
    fn non_finite_flow_is_rejected() {
        assert!(compute_flow_signal(&[f64::NEG_INFINITY], &WindowPolicy::default()).is_err());
    }
}
