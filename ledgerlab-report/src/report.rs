//! Report assembly — the stable contract boundary around the engine.
//!
//! `assemble_report` is packaging only: replay the log, compute the
//! aggregate metrics, fingerprint the input, and return one versioned
//! value. Everything in the report is recomputed from the input on
//! every call; nothing is persisted.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ledgerlab_core::domain::{CostBasisState, EnrichedTransaction, Symbol, TradeSide, Transaction};
use ledgerlab_core::engine::replay;
use ledgerlab_core::fingerprint::log_fingerprint;

use crate::metrics::AggregateMetrics;

/// Current report artifact schema version. Bump on breaking changes to
/// the serialized structure.
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// The complete analytics output for one transaction log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// Schema version of this artifact. Defaults to the current version
    /// when absent (pre-versioning artifacts).
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// The reference instant the current-period rollup was computed
    /// against.
    pub reference: DateTime<Utc>,

    /// Fingerprint of the normalized input log.
    pub input_hash: String,

    pub metrics: AggregateMetrics,

    /// Enriched trades in the caller's original input order.
    pub trades: Vec<EnrichedTransaction>,

    /// Open positions surviving the replay.
    pub open_positions: HashMap<Symbol, CostBasisState>,
}

/// Replay a transaction log and package the complete report.
///
/// `reference` fixes the current-period rollup; pass the caller's
/// notion of "now" explicitly.
pub fn assemble_report(
    transactions: &[Transaction],
    reference: DateTime<Utc>,
) -> AnalyticsReport {
    let outcome = replay(transactions);
    let metrics = AggregateMetrics::compute(&outcome, reference);
    let trades = outcome.in_input_order();

    AnalyticsReport {
        schema_version: SCHEMA_VERSION,
        reference,
        input_hash: log_fingerprint(transactions),
        metrics,
        trades,
        open_positions: outcome.open_positions,
    }
}

/// Display-side trade selection.
///
/// Cosmetic only: applied after all aggregates are computed, never
/// before. Filtering must not change a single metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayFilter {
    #[default]
    All,
    Buys,
    Sells,
}

impl DisplayFilter {
    pub fn matches(&self, side: TradeSide) -> bool {
        match self {
            DisplayFilter::All => true,
            DisplayFilter::Buys => side == TradeSide::Buy,
            DisplayFilter::Sells => side == TradeSide::Sell,
        }
    }
}

/// Select the trades a presentation layer should show.
pub fn filter_trades<'a>(
    trades: &'a [EnrichedTransaction],
    filter: DisplayFilter,
) -> Vec<&'a EnrichedTransaction> {
    trades
        .iter()
        .filter(|t| filter.matches(t.transaction.side))
        .collect()
}
