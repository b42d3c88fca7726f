//! Transaction — the fundamental ledger entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Buy or sell side of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// Returns the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            TradeSide::Buy => TradeSide::Sell,
            TradeSide::Sell => TradeSide::Buy,
        }
    }

    /// Wire discriminator, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "BUY",
            TradeSide::Sell => "SELL",
        }
    }
}

/// A single executed trade as recorded in the transaction log.
///
/// Immutable input to the replay engine. Field sanity (shares > 0,
/// price >= 0, total ≈ shares × price) is enforced at the ingestion
/// boundary, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub side: TradeSide,
    pub symbol: String,
    pub shares: f64,
    pub price: f64,
    /// Trade value as recorded upstream (shares × price at execution).
    pub total: f64,
}

impl Transaction {
    pub fn is_buy(&self) -> bool {
        self.side == TradeSide::Buy
    }

    pub fn is_sell(&self) -> bool {
        self.side == TradeSide::Sell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_transaction() -> Transaction {
        Transaction {
            id: "tx-1".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 14, 30, 0).unwrap(),
            side: TradeSide::Buy,
            symbol: "AAPL".into(),
            shares: 10.0,
            price: 185.50,
            total: 1855.0,
        }
    }

    #[test]
    fn side_helpers() {
        let tx = sample_transaction();
        assert!(tx.is_buy());
        assert!(!tx.is_sell());
    }

    #[test]
    fn side_opposite() {
        assert_eq!(TradeSide::Buy.opposite(), TradeSide::Sell);
        assert_eq!(TradeSide::Sell.opposite(), TradeSide::Buy);
    }

    #[test]
    fn side_serializes_screaming_snake() {
        let json = serde_json::to_string(&TradeSide::Sell).unwrap();
        assert_eq!(json, "\"SELL\"");
        assert_eq!(TradeSide::Sell.as_str(), "SELL");
        assert_eq!(TradeSide::Buy.as_str(), "BUY");
    }

    #[test]
    fn transaction_serialization_roundtrip() {
        let tx = sample_transaction();
        let json = serde_json::to_string(&tx).unwrap();
        let deser: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(tx, deser);
    }
}
