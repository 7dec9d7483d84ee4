//! Data models for the persisted entities.
//!
//! Price-denominated fields use `rust_decimal::Decimal`; statistical
//! metrics stay `f64`. All models derive `sqlx::FromRow`.

pub mod derivatives;
pub mod event;
pub mod flow;
pub mod ohlcv;
pub mod score;

pub use derivatives::DerivativesMetricRecord;
pub use event::EventRecord;
pub use flow::ExchangeFlowRecord;
pub use ohlcv::OhlcvRecord;
pub use score::CompositeScoreRecord;
