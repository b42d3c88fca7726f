//! Aggregate metrics — pure functions over the enriched trade list.
//!
//! Every metric is a pure function: enriched trades in, value out. No
//! dependency on the replay pass or any display-layer filter. The
//! builder always consumes the *full* trade list; a presentation-side
//! filter (buys only, sells only) must never change these numbers.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use ledgerlab_core::domain::EnrichedTransaction;
use ledgerlab_core::engine::ReplayOutcome;

/// One trade singled out by a ranking (best or worst realized P/L).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeHighlight {
    pub id: String,
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub realized_pl: f64,
}

/// The most-traded symbol and its occurrence count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolActivity {
    pub symbol: String,
    pub trade_count: usize,
}

/// Summary statistics for one transaction log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub total_trades: usize,
    /// Sum of recorded trade values across buys and sells.
    pub total_volume: f64,
    pub buy_count: usize,
    pub sell_count: usize,
    /// Sum of realized P/L over all sales.
    pub realized_total: f64,
    /// Winning sales over sales with attributable basis. `None` when no
    /// sale had a basis to judge against.
    pub win_rate: Option<f64>,
    pub unique_symbols: usize,
    /// Longest run of consecutive calendar days with at least one trade.
    pub day_streak: usize,
    /// Trades falling in the calendar month of the reference instant.
    pub period_trades: usize,
    pub period_volume: f64,
    pub best_trade: Option<TradeHighlight>,
    pub worst_trade: Option<TradeHighlight>,
    /// Mean of recorded non-negative hold durations, in days.
    pub avg_hold_days: Option<f64>,
    pub most_traded: Option<SymbolActivity>,
}

impl AggregateMetrics {
    /// Compute all metrics from a replay outcome.
    ///
    /// `reference` fixes the current-period rollup; it is always an
    /// explicit parameter, never a wall-clock read, so the computation
    /// is deterministic.
    pub fn compute(outcome: &ReplayOutcome, reference: DateTime<Utc>) -> Self {
        let trades = &outcome.trades;
        let by_input = outcome.in_input_order();
        let (period_trades, period_volume) = period_tallies(trades, reference);

        Self {
            total_trades: trades.len(),
            total_volume: trades.iter().map(|t| t.transaction.total).sum(),
            buy_count: trades.iter().filter(|t| t.transaction.is_buy()).count(),
            sell_count: trades.iter().filter(|t| t.transaction.is_sell()).count(),
            realized_total: trades.iter().map(|t| t.realized_pl).sum(),
            win_rate: win_rate(trades),
            unique_symbols: unique_symbols(trades),
            day_streak: day_streak(trades),
            period_trades,
            period_volume,
            best_trade: best_trade(trades),
            worst_trade: worst_trade(trades),
            avg_hold_days: avg_hold_days(trades),
            most_traded: most_traded(&by_input),
        }
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// The sale with the highest realized P/L.
///
/// Only sells with a **non-zero** realized P/L are ranked, so a
/// genuinely break-even sale is excluded along with basis-less ones.
/// Ties resolve to the first record in chronological order; `trades`
/// must be in chronological order.
pub fn best_trade(trades: &[EnrichedTransaction]) -> Option<TradeHighlight> {
    let mut best: Option<&EnrichedTransaction> = None;
    for t in ranked_sells(trades) {
        match best {
            // Strict comparison keeps the earlier record on ties.
            Some(b) if t.realized_pl <= b.realized_pl => {}
            _ => best = Some(t),
        }
    }
    best.map(highlight)
}

/// The sale with the lowest realized P/L. Same ranking pool and
/// tie-break as [`best_trade`].
pub fn worst_trade(trades: &[EnrichedTransaction]) -> Option<TradeHighlight> {
    let mut worst: Option<&EnrichedTransaction> = None;
    for t in ranked_sells(trades) {
        match worst {
            Some(w) if t.realized_pl >= w.realized_pl => {}
            _ => worst = Some(t),
        }
    }
    worst.map(highlight)
}

/// Mean hold duration over sales that recorded one.
///
/// Basis-less sales and negative (clock-skewed) samples never record a
/// duration, so they are excluded here by construction. `None` when the
/// sample set is empty — no data, not zero.
pub fn avg_hold_days(trades: &[EnrichedTransaction]) -> Option<f64> {
    let samples: Vec<i64> = trades.iter().filter_map(|t| t.hold_duration_days).collect();
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<i64>() as f64 / samples.len() as f64)
}

/// The symbol with the most transactions, buys and sells both counting.
///
/// Ties resolve to the symbol first encountered while counting, so
/// `trades` must be in the caller's original input order.
pub fn most_traded(trades: &[EnrichedTransaction]) -> Option<SymbolActivity> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for t in trades {
        match counts.iter_mut().find(|(s, _)| *s == t.transaction.symbol) {
            Some((_, n)) => *n += 1,
            None => counts.push((&t.transaction.symbol, 1)),
        }
    }

    let mut top: Option<(&str, usize)> = None;
    for &(symbol, n) in &counts {
        match top {
            Some((_, best)) if n <= best => {}
            _ => top = Some((symbol, n)),
        }
    }
    top.map(|(symbol, trade_count)| SymbolActivity {
        symbol: symbol.to_string(),
        trade_count,
    })
}

/// Fraction of basis-attributed sales that realized a gain.
pub fn win_rate(trades: &[EnrichedTransaction]) -> Option<f64> {
    let judged: Vec<&EnrichedTransaction> = trades
        .iter()
        .filter(|t| t.transaction.is_sell() && t.has_basis())
        .collect();
    if judged.is_empty() {
        return None;
    }
    let winners = judged.iter().filter(|t| t.is_winner()).count();
    Some(winners as f64 / judged.len() as f64)
}

/// Number of distinct symbols in the log.
pub fn unique_symbols(trades: &[EnrichedTransaction]) -> usize {
    let mut symbols: Vec<&str> = trades.iter().map(|t| t.transaction.symbol.as_str()).collect();
    symbols.sort_unstable();
    symbols.dedup();
    symbols.len()
}

/// Longest run of consecutive calendar days with at least one trade.
pub fn day_streak(trades: &[EnrichedTransaction]) -> usize {
    let mut days: Vec<NaiveDate> = trades
        .iter()
        .map(|t| t.transaction.timestamp.date_naive())
        .collect();
    days.sort_unstable();
    days.dedup();

    let mut longest = 0;
    let mut current = 0;
    let mut prev: Option<NaiveDate> = None;
    for day in days {
        current = match prev {
            Some(p) if (day - p).num_days() == 1 => current + 1,
            _ => 1,
        };
        if current > longest {
            longest = current;
        }
        prev = Some(day);
    }
    longest
}

/// Trade count and volume for the calendar month of `reference`.
pub fn period_tallies(
    trades: &[EnrichedTransaction],
    reference: DateTime<Utc>,
) -> (usize, f64) {
    let in_period = trades.iter().filter(|t| {
        let ts = t.transaction.timestamp;
        ts.year() == reference.year() && ts.month() == reference.month()
    });

    let mut count = 0;
    let mut volume = 0.0;
    for t in in_period {
        count += 1;
        volume += t.transaction.total;
    }
    (count, volume)
}

// ─── Helpers ────────────────────────────────────────────────────────

fn ranked_sells(trades: &[EnrichedTransaction]) -> impl Iterator<Item = &EnrichedTransaction> {
    trades
        .iter()
        .filter(|t| t.transaction.is_sell() && t.realized_pl != 0.0)
}

fn highlight(t: &EnrichedTransaction) -> TradeHighlight {
    TradeHighlight {
        id: t.transaction.id.clone(),
        symbol: t.transaction.symbol.clone(),
        timestamp: t.transaction.timestamp,
        realized_pl: t.realized_pl,
    }
}
