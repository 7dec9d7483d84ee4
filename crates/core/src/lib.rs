//! Core types and configuration for the XRP market intelligence system.
//!
//! This crate provides:
//! - Application configuration (serde structs merged by a figment loader)
//! - Immutable domain records shared by the signal engine and its collaborators
//! - Order book snapshots and the depth-imbalance summarization

pub mod config;
pub mod config_loader;
pub mod models;
pub mod orderbook;

pub use config::{
    AppConfig, BinanceConfig, CacheConfig, DatabaseConfig, IntelConfig, NewsConfig,
    SentimentConfig, WorkerConfig,
};
pub use config_loader::ConfigLoader;
pub use models::{
    EventTag, FlowDirection, FlowSnapshot, ManipulationHint, OiMetricsPoint, RegulatoryTags,
    ScoreSnapshot,
};
pub use orderbook::{OrderBookSnapshot, OrderBookStats, PriceLevel};
