//! Export — JSON artifacts and the CSV trade tape.
//!
//! Two formats:
//! - **JSON**: full round-trip serialization of the report, schema
//!   versioned. Unknown versions are rejected on load.
//! - **CSV**: one row per trade with the six ledger columns, for
//!   spreadsheet and external-tool consumers. Row encoding only; where
//!   the bytes end up is the caller's business.

use anyhow::{bail, Context, Result};

use ledgerlab_core::domain::EnrichedTransaction;

use crate::report::{AnalyticsReport, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize an `AnalyticsReport` to pretty JSON.
pub fn export_json(report: &AnalyticsReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize AnalyticsReport to JSON")
}

/// Deserialize an `AnalyticsReport` from JSON, rejecting unknown schema
/// versions.
pub fn import_json(json: &str) -> Result<AnalyticsReport> {
    let report: AnalyticsReport =
        serde_json::from_str(json).context("failed to deserialize AnalyticsReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export the trade list as CSV.
///
/// Columns: date, type, symbol, shares, price, total. Rows come out in
/// the order of the given slice; pass the report's input-ordered list
/// for the conventional tape.
pub fn export_trades_csv(trades: &[EnrichedTransaction]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["date", "type", "symbol", "shares", "price", "total"])?;

    for t in trades {
        let tx = &t.transaction;
        wtr.write_record([
            &tx.timestamp.to_rfc3339(),
            tx.side.as_str(),
            &tx.symbol,
            &format!("{:.6}", tx.shares),
            &format!("{:.6}", tx.price),
            &format!("{:.2}", tx.total),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}
