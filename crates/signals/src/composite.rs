//! Composite score aggregation.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, Result};

/// Per-domain sub-scores feeding the composite, each conventionally in
/// [0, 100]. The manipulation field is the 0-100 scaled indicator and is
/// inverted during aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub flow: f64,
    pub oi: f64,
    pub volume: f64,
    pub manipulation: f64,
    pub regulatory: f64,
}

/// Weights applied to each sub-score.
///
/// The default set sums to 1.0. Caller-supplied weights are trusted as-is:
/// `aggregate_scores` neither validates nor normalizes them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub flow: f64,
    pub oi: f64,
    pub volume: f64,
    pub manipulation: f64,
    pub regulatory: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            flow: 0.30,
            oi: 0.25,
            volume: 0.20,
            manipulation: 0.15,
            regulatory: 0.10,
        }
    }
}

/// Blends the five sub-scores into the overall [0, 100] composite.
///
/// A higher manipulation indicator lowers the composite: its term is
/// inverted (`100 - manipulation`) before weighting, so low manipulation is
/// the healthy direction. The result is the single externally visible
/// number consumers display or threshold on.
///
/// # Errors
/// Returns [`SignalError::InvalidInput`](crate::SignalError) if any score
/// or weight is non-finite.
pub fn aggregate_scores(scores: &SubScores, weights: &ScoreWeights) -> Result<f64> {
    ensure_finite(
        [
            scores.flow,
            scores.oi,
            scores.volume,
            scores.manipulation,
            scores.regulatory,
        ],
        "scores",
    )?;
    ensure_finite(
        [
            weights.flow,
            weights.oi,
            weights.volume,
            weights.manipulation,
            weights.regulatory,
        ],
        "weights",
    )?;

    let total = scores.flow * weights.flow
        + scores.oi * weights.oi
        + scores.volume * weights.volume
        + (100.0 - scores.manipulation) * weights.manipulation
        + scores.regulatory * weights.regulatory;

    Ok(total.clamp(0.0, 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(flow: f64, oi: f64, volume: f64, manipulation: f64, regulatory: f64) -> SubScores {
        SubScores {
            flow,
            oi,
            volume,
            manipulation,
            regulatory,
        }
    }

    #[test]
    fn default_weights_sum_to_one() {
        let w = ScoreWeights::default();
        let sum = w.flow + w.oi + w.volume + w.manipulation + w.regulatory;
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn worked_example_scores_57_75() {
        let total = aggregate_scores(
            &scores(60.0, 55.0, 50.0, 20.0, 40.0),
            &ScoreWeights::default(),
        )
        .unwrap();
        // 60*0.3 + 55*0.25 + 50*0.2 + 80*0.15 + 40*0.1 = 57.75
        assert!((total - 57.75).abs() < 1e-9);
    }

    #[test]
    fn manipulation_is_inverted() {
        let calm = aggregate_scores(
            &scores(50.0, 50.0, 50.0, 0.0, 50.0),
            &ScoreWeights::default(),
        )
        .unwrap();
        let manipulated = aggregate_scores(
            &scores(50.0, 50.0, 50.0, 100.0, 50.0),
            &ScoreWeights::default(),
        )
        .unwrap();
        assert!(calm > manipulated);
        assert!((calm - manipulated - 15.0).abs() < 1e-9);
    }

    #[test]
    fn output_stays_in_bounds_across_score_extremes() {
        let weights = ScoreWeights::default();
        for flow in [0.0, 100.0] {
            for manipulation in [0.0, 100.0] {
                for regulatory in [0.0, 100.0] {
                    let total = aggregate_scores(
                        &scores(flow, 100.0 - flow, flow, manipulation, regulatory),
                        &weights,
                    )
                    .unwrap();
                    assert!((0.0..=100.0).contains(&total));
                }
            }
        }
    }

    #[test]
    fn custom_weights_are_trusted_verbatim() {
        // Weights summing to 2.0 are not normalized; the raw weighted sum
        // is clamped only at the [0, 100] boundary.
        let weights = ScoreWeights {
            flow: 1.0,
            oi: 1.0,
            volume: 0.0,
            manipulation: 0.0,
            regulatory: 0.0,
        };
        let total = aggregate_scores(&scores(30.0, 20.0, 0.0, 0.0, 0.0), &weights).unwrap();
        assert!((total - 50.0).abs() < 1e-9);

        let clamped = aggregate_scores(&scores(90.0, 90.0, 0.0, 0.0, 0.0), &weights).unwrap();
        assert!((clamped - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_weights_yield_zero() {
        let weights = ScoreWeights {
            flow: 0.0,
            oi: 0.0,
            volume: 0.0,
            manipulation: 0.0,
            regulatory: 0.0,
        };
        let total = aggregate_scores(&scores(60.0, 55.0, 50.0, 20.0, 40.0), &weights).unwrap();
        assert!(total.abs() < f64::EPSILON);
    }

    #[test]
    fn non_finite_score_is_rejected() {
        let result = aggregate_scores(
            &scores(f64::NAN, 55.0, 50.0, 20.0, 40.0),
            &ScoreWeights::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn non_finite_weight_is_rejected() {
        let weights = ScoreWeights {
            flow: f64::INFINITY,
            ..ScoreWeights::default()
        };
        let result = aggregate_scores(&scores(60.0, 55.0, 50.0, 20.0, 40.0), &weights);
        assert!(result.is_err());
    }
}
