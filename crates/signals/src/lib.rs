//! Pure signal computation and composite scoring engine.
//!
//! Every function in this crate is a deterministic, synchronous transform
//! over in-memory sequences: no I/O, no shared state, no logging. Missing
//! data degrades to documented neutral defaults; non-finite inputs surface
//! as [`SignalError::InvalidInput`] so callers can tell "no data" apart
//! from "bad data".

pub mod composite;
pub mod error;
pub mod flow;
pub mod leverage;
pub mod manipulation;
pub mod regulatory;
pub mod stats;
pub mod volume;

pub use composite::{aggregate_scores, ScoreWeights, SubScores};
pub use error::{Result, SignalError};
pub use flow::{compute_flow_signal, FlowSignal};
pub use leverage::{compute_oi_leverage_score, NEUTRAL_LEVERAGE_SCORE};
pub use manipulation::{compute_manipulation_hint, WALL_CHANGE_THRESHOLD};
pub use regulatory::{compute_regulatory_score, NO_SIGNAL_REGULATORY_SCORE};
pub use stats::{
    classify_regime, compute_zscore, Regime, RegimeThresholds, WindowPolicy,
    DEFAULT_BASELINE_WINDOW, DEFAULT_ZSCORE_WINDOW,
};
pub use volume::{compute_volume_signal, VolumeSignal};
