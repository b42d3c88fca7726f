//! Chronological Normalizer — deterministic replay order for the log.

use crate::domain::Transaction;

/// Returns the indices of `transactions` in ascending timestamp order.
///
/// The sort is stable: records with equal timestamps keep their original
/// input order, so replay is reproducible regardless of how the caller's
/// collection happened to be ordered. The tracker's semantics depend on
/// buys being applied before later sells of the same symbol.
pub fn chronological_order(transactions: &[Transaction]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..transactions.len()).collect();
    order.sort_by_key(|&i| transactions[i].timestamp);
    order
}

/// Whether the slice is already in non-decreasing timestamp order.
pub fn is_chronological(transactions: &[Transaction]) -> bool {
    transactions
        .windows(2)
        .all(|w| w[0].timestamp <= w[1].timestamp)
}
