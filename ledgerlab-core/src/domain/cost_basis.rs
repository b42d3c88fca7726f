//! CostBasisBook — per-symbol average-cost state across one replay pass.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::transaction::Transaction;

/// Open shares below this threshold are treated as a closed position.
///
/// Proportional reduction on a full sell can leave ~1e-13 of float dust;
/// the entry must still be deleted so a later buy starts a fresh lot.
pub const SHARE_EPSILON: f64 = 1e-9;

/// Running cost-basis state for one symbol's open position.
///
/// Average-cost method: every open share carries one blended cost
/// regardless of purchase order. No FIFO/LIFO lot tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBasisState {
    /// Accumulated cost of the open position, never negative.
    pub total_cost: f64,
    /// Open share quantity, never negative.
    pub total_shares: f64,
    /// Inception of the currently open lot. Fixed at creation; a fresh
    /// lot (after the position fully closes) gets a fresh date.
    pub first_buy_date: DateTime<Utc>,
}

impl CostBasisState {
    /// Blended cost per open share.
    pub fn avg_cost(&self) -> f64 {
        if self.total_shares <= 0.0 {
            return 0.0;
        }
        self.total_cost / self.total_shares
    }
}

/// Outcome of applying a single sell to the book.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaleOutcome {
    /// Signed gain/loss recognized by the sale. Zero when the sale has
    /// no attributable basis.
    pub realized_pl: f64,
    /// Average cost per share applied at the sale. `None` when no open
    /// position was tracked (sale exceeds recorded history).
    pub avg_cost_basis: Option<f64>,
    /// Whole days between lot inception and the sale. `None` when there
    /// is no basis, or when the computed duration is negative (clock
    /// skew / malformed data — the P/L still counts).
    pub hold_duration_days: Option<i64>,
}

impl SaleOutcome {
    fn without_basis() -> Self {
        Self {
            realized_pl: 0.0,
            avg_cost_basis: None,
            hold_duration_days: None,
        }
    }
}

/// Symbol → cost-basis state mapping for a single chronological pass.
///
/// Locally owned by each replay call; never shared across calls, so
/// repeated replays of the same log are idempotent.
#[derive(Debug, Clone, Default)]
pub struct CostBasisBook {
    positions: HashMap<String, CostBasisState>,
}

impl CostBasisBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a buy: create the state on first acquisition, otherwise
    /// accumulate cost and shares. `first_buy_date` is never touched
    /// while the position stays open.
    pub fn apply_buy(&mut self, tx: &Transaction) {
        let state = self
            .positions
            .entry(tx.symbol.clone())
            .or_insert(CostBasisState {
                total_cost: 0.0,
                total_shares: 0.0,
                first_buy_date: tx.timestamp,
            });
        state.total_cost += tx.total;
        state.total_shares += tx.shares;
    }

    /// Apply a sell against the tracked position.
    ///
    /// - No state, or no open shares: tolerated data anomaly. Realized
    ///   P/L is zero and the book is not touched.
    /// - Open position: P/L is `(price − avg_cost) × shares` for the
    ///   full sale quantity, even on oversell. State reduces
    ///   proportionally, clamps at zero, and the entry is deleted once
    ///   shares reach zero or below.
    pub fn apply_sell(&mut self, tx: &Transaction) -> SaleOutcome {
        let Some(state) = self.positions.get_mut(&tx.symbol) else {
            return SaleOutcome::without_basis();
        };
        if state.total_shares <= SHARE_EPSILON {
            // Dust-only entry counts as closed.
            self.positions.remove(&tx.symbol);
            return SaleOutcome::without_basis();
        }

        let avg_cost = state.total_cost / state.total_shares;
        let realized_pl = (tx.price - avg_cost) * tx.shares;

        let days = (tx.timestamp - state.first_buy_date).num_days();
        let hold_duration_days = if days < 0 { None } else { Some(days) };

        state.total_shares -= tx.shares;
        state.total_cost -= avg_cost * tx.shares;
        if state.total_shares < 0.0 {
            state.total_shares = 0.0;
        }
        if state.total_cost < 0.0 {
            state.total_cost = 0.0;
        }
        if state.total_shares <= SHARE_EPSILON {
            self.positions.remove(&tx.symbol);
        }

        SaleOutcome {
            realized_pl,
            avg_cost_basis: Some(avg_cost),
            hold_duration_days,
        }
    }

    /// Whether a symbol has an open position.
    pub fn has_position(&self, symbol: &str) -> bool {
        self.positions
            .get(symbol)
            .is_some_and(|s| s.total_shares > SHARE_EPSILON)
    }

    pub fn get(&self, symbol: &str) -> Option<&CostBasisState> {
        self.positions.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Consume the book, yielding the surviving open positions.
    pub fn into_positions(self) -> HashMap<String, CostBasisState> {
        self.positions
    }

    /// Merge another book's positions in. Used by the sharded replay,
    /// where each partition owns a disjoint set of symbols.
    pub fn absorb(&mut self, other: CostBasisBook) {
        self.positions.extend(other.positions);
    }
}
