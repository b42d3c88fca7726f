//! Chronological replay — the Realized P/L Calculator.
//!
//! A single pass over the normalized log, applying the cost-basis rule
//! per record and emitting enriched trades. The pass owns all of its
//! working state: two replays of the same log produce identical output.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::domain::{
    CostBasisBook, CostBasisState, EnrichedTransaction, Symbol, TradeSide, Transaction,
};
use crate::engine::normalize::chronological_order;

/// Output of one replay pass: enriched trades plus the tracker's
/// surviving open positions.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayOutcome {
    /// Enriched trades in chronological replay order.
    pub trades: Vec<EnrichedTransaction>,
    /// Open positions remaining after the full log has been applied.
    pub open_positions: HashMap<Symbol, CostBasisState>,
}

impl ReplayOutcome {
    /// Re-attach the enriched trades to the caller's original input
    /// order, for consumers that expect it (export rows, display).
    pub fn in_input_order(&self) -> Vec<EnrichedTransaction> {
        let mut trades = self.trades.clone();
        trades.sort_by_key(|t| t.input_index);
        trades
    }
}

/// Replay a transaction log in chronological order.
///
/// The input may be arbitrarily ordered; normalization happens here.
pub fn replay(transactions: &[Transaction]) -> ReplayOutcome {
    let order = chronological_order(transactions);
    let mut book = CostBasisBook::new();
    let mut trades = Vec::with_capacity(transactions.len());

    for &idx in &order {
        trades.push(enrich_one(&mut book, &transactions[idx], idx));
    }

    ReplayOutcome {
        trades,
        open_positions: book.into_positions(),
    }
}

/// Replay with the normalized stream partitioned by symbol, one rayon
/// task per partition.
///
/// Correct because inter-symbol ordering never affects any computed
/// value; each partition keeps its own chronological order and its own
/// book. The merged output is byte-identical to [`replay`]: partitions
/// are re-sorted by `(timestamp, input_index)`, which reproduces the
/// stable chronological order exactly.
pub fn replay_sharded(transactions: &[Transaction]) -> ReplayOutcome {
    let order = chronological_order(transactions);

    let mut partitions: HashMap<&str, Vec<usize>> = HashMap::new();
    for &idx in &order {
        partitions
            .entry(transactions[idx].symbol.as_str())
            .or_default()
            .push(idx);
    }
    let partitions: Vec<Vec<usize>> = partitions.into_values().collect();

    let results: Vec<(Vec<EnrichedTransaction>, CostBasisBook)> = partitions
        .into_par_iter()
        .map(|indices| {
            let mut book = CostBasisBook::new();
            let trades = indices
                .iter()
                .map(|&idx| enrich_one(&mut book, &transactions[idx], idx))
                .collect();
            (trades, book)
        })
        .collect();

    let mut merged_book = CostBasisBook::new();
    let mut trades = Vec::with_capacity(transactions.len());
    for (partition_trades, book) in results {
        trades.extend(partition_trades);
        merged_book.absorb(book);
    }
    trades.sort_by_key(|t| (t.transaction.timestamp, t.input_index));

    ReplayOutcome {
        trades,
        open_positions: merged_book.into_positions(),
    }
}

fn enrich_one(book: &mut CostBasisBook, tx: &Transaction, input_index: usize) -> EnrichedTransaction {
    match tx.side {
        TradeSide::Buy => {
            book.apply_buy(tx);
            EnrichedTransaction {
                transaction: tx.clone(),
                realized_pl: 0.0,
                avg_cost_basis: None,
                hold_duration_days: None,
                input_index,
            }
        }
        TradeSide::Sell => {
            let outcome = book.apply_sell(tx);
            EnrichedTransaction {
                transaction: tx.clone(),
                realized_pl: outcome.realized_pl,
                avg_cost_basis: outcome.avg_cost_basis,
                hold_duration_days: outcome.hold_duration_days,
                input_index,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap()
    }

    fn tx(
        id: &str,
        side: TradeSide,
        symbol: &str,
        shares: f64,
        price: f64,
        day_offset: i64,
    ) -> Transaction {
        Transaction {
            id: id.into(),
            timestamp: t0() + Duration::days(day_offset),
            side,
            symbol: symbol.into(),
            shares,
            price,
            total: shares * price,
        }
    }

    #[test]
    fn unordered_input_is_normalized_before_applying() {
        // Sell arrives first in the collection but later in time.
        let txs = vec![
            tx("sell", TradeSide::Sell, "AAPL", 10.0, 150.0, 31),
            tx("buy", TradeSide::Buy, "AAPL", 10.0, 100.0, 0),
        ];
        let outcome = replay(&txs);

        assert_eq!(outcome.trades.len(), 2);
        // Chronological order: buy first.
        assert_eq!(outcome.trades[0].transaction.id, "buy");
        let sale = &outcome.trades[1];
        assert!((sale.realized_pl - 500.0).abs() < 1e-10);
        assert_eq!(sale.hold_duration_days, Some(31));
        assert!(outcome.open_positions.is_empty());
    }

    #[test]
    fn in_input_order_restores_caller_ordering() {
        let txs = vec![
            tx("sell", TradeSide::Sell, "AAPL", 10.0, 150.0, 31),
            tx("buy", TradeSide::Buy, "AAPL", 10.0, 100.0, 0),
        ];
        let outcome = replay(&txs);
        let by_input = outcome.in_input_order();
        assert_eq!(by_input[0].transaction.id, "sell");
        assert_eq!(by_input[1].transaction.id, "buy");
        // Derived values survive the re-attachment.
        assert!((by_input[0].realized_pl - 500.0).abs() < 1e-10);
    }

    #[test]
    fn symbols_are_tracked_independently() {
        let txs = vec![
            tx("b1", TradeSide::Buy, "AAPL", 10.0, 100.0, 0),
            tx("b2", TradeSide::Buy, "MSFT", 10.0, 300.0, 1),
            tx("s1", TradeSide::Sell, "AAPL", 5.0, 120.0, 2),
        ];
        let outcome = replay(&txs);

        let sale = &outcome.trades[2];
        assert!((sale.realized_pl - 100.0).abs() < 1e-10);
        assert_eq!(outcome.open_positions.len(), 2);
        assert_eq!(outcome.open_positions["MSFT"].total_shares, 10.0);
        assert!((outcome.open_positions["AAPL"].total_shares - 5.0).abs() < 1e-10);
    }

    #[test]
    fn basis_less_sell_leaves_book_untouched() {
        let txs = vec![
            tx("s", TradeSide::Sell, "TSLA", 5.0, 120.0, 0),
            tx("b", TradeSide::Buy, "TSLA", 5.0, 100.0, 1),
        ];
        let outcome = replay(&txs);

        assert_eq!(outcome.trades[0].realized_pl, 0.0);
        assert!(!outcome.trades[0].has_basis());
        // The later buy opens a fresh lot, unaffected by the anomaly.
        assert_eq!(outcome.open_positions["TSLA"].total_shares, 5.0);
    }

    #[test]
    fn sharded_matches_sequential() {
        let mut txs = Vec::new();
        for (i, sym) in ["AAPL", "MSFT", "TSLA", "NVDA"].iter().cycle().take(40).enumerate() {
            let side = if i % 3 == 2 { TradeSide::Sell } else { TradeSide::Buy };
            txs.push(tx(
                &format!("tx{i}"),
                side,
                sym,
                (i % 5 + 1) as f64,
                100.0 + i as f64,
                (i / 2) as i64,
            ));
        }

        let sequential = replay(&txs);
        let sharded = replay_sharded(&txs);
        assert_eq!(sequential, sharded);
    }

    #[test]
    fn empty_log_replays_to_empty_outcome() {
        let outcome = replay(&[]);
        assert!(outcome.trades.is_empty());
        assert!(outcome.open_positions.is_empty());
    }
}
