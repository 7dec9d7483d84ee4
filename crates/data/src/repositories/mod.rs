//! Database repositories.
//!
//! Each repository provides typed access to one table with insert and
//! time-window query operations.

pub mod derivatives_repo;
pub mod event_repo;
pub mod flow_repo;
pub mod ohlcv_repo;
pub mod score_repo;

pub use derivatives_repo::DerivativesRepository;
pub use event_repo::EventRepository;
pub use flow_repo::ExchangeFlowRepository;
pub use ohlcv_repo::OhlcvRepository;
pub use score_repo::ScoreRepository;

use sqlx::PgPool;

/// All repositories bundled over a single database pool.
#[derive(Debug, Clone)]
pub struct Repositories {
    pub ohlcv: OhlcvRepository,
    pub flows: ExchangeFlowRepository,
    pub derivatives: DerivativesRepository,
    pub events: EventRepository,
    pub scores: ScoreRepository,
}

impl Repositories {
    /// Creates all repositories from a single database pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            ohlcv: OhlcvRepository::new(pool.clone()),
            flows: ExchangeFlowRepository::new(pool.clone()),
            derivatives: DerivativesRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            scores: ScoreRepository::new(pool),
        }
    }
}
