//! Log fingerprinting — deterministic identity of a transaction set.

use crate::domain::Transaction;
use crate::engine::normalize::chronological_order;

/// blake3 hex digest of the chronologically normalized log.
///
/// Hashing the normalized order (not the caller's collection order)
/// makes the fingerprint invariant under permutation of records with
/// distinct timestamps, matching the replay's own order invariance.
pub fn log_fingerprint(transactions: &[Transaction]) -> String {
    let order = chronological_order(transactions);
    let normalized: Vec<&Transaction> = order.iter().map(|&i| &transactions[i]).collect();
    let json = serde_json::to_string(&normalized).expect("Transaction must serialize");
    blake3::hash(json.as_bytes()).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TradeSide;
    use chrono::{Duration, TimeZone, Utc};

    fn tx(id: &str, day_offset: i64) -> Transaction {
        Transaction {
            id: id.into(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
                + Duration::days(day_offset),
            side: TradeSide::Buy,
            symbol: "SPY".into(),
            shares: 2.0,
            price: 500.0,
            total: 1000.0,
        }
    }

    #[test]
    fn fingerprint_is_stable() {
        let txs = vec![tx("a", 0), tx("b", 1)];
        assert_eq!(log_fingerprint(&txs), log_fingerprint(&txs));
    }

    #[test]
    fn fingerprint_is_permutation_invariant() {
        let forward = vec![tx("a", 0), tx("b", 1), tx("c", 2)];
        let shuffled = vec![tx("c", 2), tx("a", 0), tx("b", 1)];
        assert_eq!(log_fingerprint(&forward), log_fingerprint(&shuffled));
    }

    #[test]
    fn fingerprint_distinguishes_different_logs() {
        let a = vec![tx("a", 0)];
        let b = vec![tx("b", 0)];
        assert_ne!(log_fingerprint(&a), log_fingerprint(&b));
    }
}
