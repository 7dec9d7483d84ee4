//! Order book snapshot and depth summarization.

use serde::{Deserialize, Serialize};

/// Additive epsilon guarding the imbalance denominator on an empty book.
const DEPTH_EPSILON: f64 = 1e-9;

/// One price level of an order book side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: f64,
    pub quantity: f64,
}

/// Snapshot of an order book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// Bid levels, highest price first.
    pub bids: Vec<PriceLevel>,
    /// Ask levels, lowest price first.
    pub asks: Vec<PriceLevel>,
}

/// Aggregated depth figures consumed by the manipulation detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderBookStats {
    pub bid_volume: f64,
    pub ask_volume: f64,
    /// `(bid_volume - ask_volume) / (bid_volume + ask_volume + 1e-9)`,
    /// in [-1, 1]. Positive means more resting bid volume.
    pub depth_imbalance: f64,
}

impl OrderBookSnapshot {
    /// Reduces the book to total side volumes and the depth imbalance.
    #[must_use]
    pub fn summarize(&self) -> OrderBookStats {
        let bid_volume: f64 = self.bids.iter().map(|l| l.quantity).sum();
        let ask_volume: f64 = self.asks.iter().map(|l| l.quantity).sum();
        let depth_imbalance = (bid_volume - ask_volume) / (bid_volume + ask_volume + DEPTH_EPSILON);
        OrderBookStats {
            bid_volume,
            ask_volume,
            depth_imbalance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(price: f64, quantity: f64) -> PriceLevel {
        PriceLevel { price, quantity }
    }

    #[test]
    fn balanced_book_has_zero_imbalance() {
        let book = OrderBookSnapshot {
            bids: vec![level(0.50, 10.0)],
            asks: vec![level(0.51, 10.0)],
        };
        let stats = book.summarize();
        assert!(stats.depth_imbalance.abs() < 1e-9);
        assert!((stats.bid_volume - 10.0).abs() < f64::EPSILON);
        assert!((stats.ask_volume - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn bid_heavy_book_is_positive() {
        let book = OrderBookSnapshot {
            bids: vec![level(0.50, 20.0), level(0.49, 10.0)],
            asks: vec![level(0.51, 10.0)],
        };
        let stats = book.summarize();
        // (30 - 10) / (30 + 10) = 0.5
        assert!((stats.depth_imbalance - 0.5).abs() < 1e-6);
    }

    #[test]
    fn ask_heavy_book_is_negative() {
        let book = OrderBookSnapshot {
            bids: vec![level(0.50, 10.0)],
            asks: vec![level(0.51, 30.0)],
        };
        let stats = book.summarize();
        // (10 - 30) / (10 + 30) = -0.5
        assert!((stats.depth_imbalance + 0.5).abs() < 1e-6);
    }

    #[test]
    fn empty_book_yields_zero_not_nan() {
        let book = OrderBookSnapshot {
            bids: vec![],
            asks: vec![],
        };
        let stats = book.summarize();
        assert!(stats.depth_imbalance.is_finite());
        assert!(stats.depth_imbalance.abs() < f64::EPSILON);
    }

    #[test]
    fn imbalance_stays_within_unit_interval() {
        let book = OrderBookSnapshot {
            bids: vec![level(0.50, 1000.0)],
            asks: vec![],
        };
        let stats = book.summarize();
        assert!(stats.depth_imbalance > 0.99);
        assert!(stats.depth_imbalance <= 1.0);
    }
}
