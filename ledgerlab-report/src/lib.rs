//! LedgerLab Report — aggregate metrics and report assembly.
//!
//! This crate builds on `ledgerlab-core` to provide:
//! - Aggregate metrics over the enriched trade list (tallies, rankings,
//!   hold-time and period statistics)
//! - Report assembly into a single versioned `AnalyticsReport`
//! - Serializable report request configuration
//! - JSON and CSV export surfaces

pub mod export;
pub mod metrics;
pub mod report;
pub mod request;

pub use export::{export_json, export_trades_csv, import_json};
pub use metrics::{AggregateMetrics, SymbolActivity, TradeHighlight};
pub use report::{
    assemble_report, filter_trades, AnalyticsReport, DisplayFilter, SCHEMA_VERSION,
};
pub use request::{ReportRequest, RequestError};
