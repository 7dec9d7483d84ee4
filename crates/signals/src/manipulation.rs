//! Order-book manipulation heuristics.

use xrp_intel_core::{ManipulationHint, OrderBookStats};

use crate::error::{Result, SignalError};

/// Absolute depth imbalance beyond which the book counts as a rapid wall
/// change.
pub const WALL_CHANGE_THRESHOLD: f64 = 0.5;

const NOTE_SKEW_AND_SPIKE: &str = "Depth skew + spike";
const NOTE_SKEW: &str = "Skewed depth";
const NOTE_CALM: &str = "Calm";

/// Derives a manipulation hint from summarized order-book depth and a
/// volume-spike flag.
///
/// The textual note is driven by the wall-change flag alone: a volume spike
/// without a wall change raises the risk score but leaves the note at
/// "Calm". The returned hint carries no timestamp; callers attach one via
/// [`ManipulationHint::with_timestamp`].
///
/// # Errors
/// Returns [`SignalError::InvalidInput`] if the depth imbalance is
/// non-finite.
pub fn compute_manipulation_hint(
    stats: &OrderBookStats,
    volume_spike: bool,
) -> Result<ManipulationHint> {
    if !stats.depth_imbalance.is_finite() {
        return Err(SignalError::invalid("depth_imbalance"));
    }

    let depth_imbalance = stats.depth_imbalance;
    let rapid_wall_change = depth_imbalance.abs() > WALL_CHANGE_THRESHOLD;
    let spike_term = if volume_spike { 0.5 } else { 0.0 };
    let risk_score = (0.5 * depth_imbalance.abs() + spike_term).clamp(0.0, 1.0);

    let note = if rapid_wall_change && volume_spike {
        NOTE_SKEW_AND_SPIKE
    } else if rapid_wall_change {
        NOTE_SKEW
    } else {
        NOTE_CALM
    };

    Ok(ManipulationHint {
        timestamp: None,
        depth_imbalance,
        rapid_wall_change,
        risk_score,
        note: note.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(depth_imbalance: f64) -> OrderBookStats {
        OrderBookStats {
            bid_volume: 0.0,
            ask_volume: 0.0,
            depth_imbalance,
        }
    }

    #[test]
    fn balanced_book_without_spike_is_calm() {
        let hint = compute_manipulation_hint(&stats(0.0), false).unwrap();
        assert!(!hint.rapid_wall_change);
        assert!(hint.risk_score.abs() < f64::EPSILON);
        assert_eq!(hint.note, "Calm");
        assert!(hint.timestamp.is_none());
    }

    #[test]
    fn skewed_book_flags_wall_change() {
        let hint = compute_manipulation_hint(&stats(0.6), false).unwrap();
        assert!(hint.rapid_wall_change);
        assert!((hint.risk_score - 0.3).abs() < 1e-12);
        assert_eq!(hint.note, "Skewed depth");
    }

    #[test]
    fn skew_and_spike_combine() {
        let hint = compute_manipulation_hint(&stats(-0.8), true).unwrap();
        assert!(hint.rapid_wall_change);
        assert!((hint.risk_score - 0.9).abs() < 1e-12);
        assert_eq!(hint.note, "Depth skew + spike");
    }

    #[test]
    fn spike_without_wall_change_keeps_calm_note() {
        // Regression: a spike on its own amplifies the risk score but must
        // not change the note.
        let hint = compute_manipulation_hint(&stats(0.2), true).unwrap();
        assert!(!hint.rapid_wall_change);
        assert!((hint.risk_score - 0.6).abs() < 1e-12);
        assert_eq!(hint.note, "Calm");
    }

    #[test]
    fn negative_imbalance_uses_absolute_value() {
        let hint = compute_manipulation_hint(&stats(-0.6), false).unwrap();
        assert!(hint.rapid_wall_change);
        assert!((hint.risk_score - 0.3).abs() < 1e-12);
    }

    #[test]
    fn wall_threshold_is_exclusive() {
        let hint = compute_manipulation_hint(&stats(0.5), false).unwrap();
        assert!(!hint.rapid_wall_change);
        assert_eq!(hint.note, "Calm");
    }

    #[test]
    fn risk_score_is_clamped_to_one() {
        let hint = compute_manipulation_hint(&stats(1.0), true).unwrap();
        assert!((hint.risk_score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn non_finite_imbalance_is_rejected() {
        assert!(compute_manipulation_hint(&stats(f64::NAN), false).is_err());
    }
}
