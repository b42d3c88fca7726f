//! EnrichedTransaction — a ledger entry annotated with realized P/L.

use serde::{Deserialize, Serialize};

use super::transaction::Transaction;

/// A transaction plus the values derived for it during chronological
/// replay.
///
/// `avg_cost_basis` distinguishes a genuine break-even sale (basis
/// present, P/L exactly zero) from a sale with no attributable history
/// (basis absent, P/L forced to zero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,

    /// Signed gain/loss; 0.0 for buys and basis-less sells.
    pub realized_pl: f64,

    /// Cost per share applied at the sale; `None` for buys and sells
    /// with no open position.
    pub avg_cost_basis: Option<f64>,

    /// Whole days between lot inception and the sale; `None` for buys,
    /// basis-less sells, and negative (clock-skewed) samples.
    pub hold_duration_days: Option<i64>,

    /// Position of the record in the caller's original collection,
    /// for consumers that expect input order.
    pub input_index: usize,
}

impl EnrichedTransaction {
    /// A sell with attributable cost basis (includes break-even sales).
    pub fn has_basis(&self) -> bool {
        self.avg_cost_basis.is_some()
    }

    pub fn is_winner(&self) -> bool {
        self.realized_pl > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transaction::TradeSide;
    use chrono::{TimeZone, Utc};

    fn sample_enriched() -> EnrichedTransaction {
        EnrichedTransaction {
            transaction: Transaction {
                id: "tx-9".into(),
                timestamp: Utc.with_ymd_and_hms(2024, 2, 1, 15, 0, 0).unwrap(),
                side: TradeSide::Sell,
                symbol: "MSFT".into(),
                shares: 5.0,
                price: 410.0,
                total: 2050.0,
            },
            realized_pl: 150.0,
            avg_cost_basis: Some(380.0),
            hold_duration_days: Some(12),
            input_index: 3,
        }
    }

    #[test]
    fn basis_and_winner_helpers() {
        let e = sample_enriched();
        assert!(e.has_basis());
        assert!(e.is_winner());
    }

    #[test]
    fn break_even_is_not_a_winner() {
        let mut e = sample_enriched();
        e.realized_pl = 0.0;
        assert!(e.has_basis());
        assert!(!e.is_winner());
    }

    #[test]
    fn enriched_serialization_roundtrip() {
        let e = sample_enriched();
        let json = serde_json::to_string(&e).unwrap();
        let deser: EnrichedTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(e, deser);
    }

    #[test]
    fn serde_flattens_the_transaction() {
        let e = sample_enriched();
        let value: serde_json::Value = serde_json::to_value(&e).unwrap();
        // Transaction fields appear at the top level next to the derived ones.
        assert_eq!(value["symbol"], "MSFT");
        assert_eq!(value["realized_pl"], 150.0);
    }
}
