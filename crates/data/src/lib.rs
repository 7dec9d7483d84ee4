//! Persistence and snapshot caching for the XRP market intelligence system.
//!
//! This crate provides:
//! - Database client for `PostgreSQL` with schema bootstrap
//! - Typed records for all persisted entities
//! - Repositories for typed database access
//! - Redis-backed snapshot cache used as the dashboard fallback

pub mod cache;
pub mod database;
pub mod models;
pub mod repositories;

pub use cache::{SnapshotCache, DASHBOARD_SNAPSHOT_KEY, LATEST_SCORE_KEY};
pub use database::Database;

pub use models::{
    CompositeScoreRecord, DerivativesMetricRecord, EventRecord, ExchangeFlowRecord, OhlcvRecord,
};

pub use repositories::{
    DerivativesRepository, EventRepository, ExchangeFlowRepository, OhlcvRepository, Repositories,
    ScoreRepository,
};
