//! HTTP collaborators feeding the signal engine.
//!
//! Each client presents already-parsed records to the rest of the system;
//! the engine itself never performs network or deserialization work.

pub mod binance;
pub mod error;
pub mod intel;
pub mod news;
pub mod sentiment;

pub use binance::{BinanceClient, OpenInterestStat, Trade};
pub use error::{ProviderError, Result};
pub use intel::IntelClient;
pub use news::{Article, NewsClient};
pub use sentiment::SentimentClassifier;
