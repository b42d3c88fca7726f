//! Ingestion boundary — raw records in, validated `Transaction`s out.
//!
//! The replay engine assumes well-formed input; this module is the
//! upstream rejection point for everything else.

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

use crate::domain::{TradeSide, Transaction};

/// A transaction as it arrives from the outside world: stringly-typed
/// timestamp and side discriminator, unvalidated numerics.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawTransaction {
    pub id: String,
    /// ISO-8601 timestamp, with or without an offset.
    pub timestamp: String,
    #[serde(rename = "type")]
    pub side: String,
    pub symbol: String,
    pub shares: f64,
    pub price: f64,
    pub total: f64,
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("record '{id}': unparseable timestamp '{value}'")]
    InvalidTimestamp { id: String, value: String },

    #[error("record '{id}': unknown transaction type '{value}' (expected BUY or SELL)")]
    UnknownSide { id: String, value: String },

    #[error("record '{id}': shares must be positive and finite, got {value}")]
    InvalidShares { id: String, value: f64 },

    #[error("record '{id}': price must be non-negative and finite, got {value}")]
    InvalidPrice { id: String, value: f64 },

    #[error("record '{id}': total must be non-negative and finite, got {value}")]
    InvalidTotal { id: String, value: f64 },
}

/// Validate and convert one raw record.
pub fn parse_transaction(raw: &RawTransaction) -> Result<Transaction, IngestError> {
    let timestamp = parse_timestamp(&raw.timestamp).ok_or_else(|| {
        IngestError::InvalidTimestamp {
            id: raw.id.clone(),
            value: raw.timestamp.clone(),
        }
    })?;

    let side = match raw.side.as_str() {
        "BUY" => TradeSide::Buy,
        "SELL" => TradeSide::Sell,
        other => {
            return Err(IngestError::UnknownSide {
                id: raw.id.clone(),
                value: other.to_string(),
            })
        }
    };

    if !raw.shares.is_finite() || raw.shares <= 0.0 {
        return Err(IngestError::InvalidShares {
            id: raw.id.clone(),
            value: raw.shares,
        });
    }
    if !raw.price.is_finite() || raw.price < 0.0 {
        return Err(IngestError::InvalidPrice {
            id: raw.id.clone(),
            value: raw.price,
        });
    }
    if !raw.total.is_finite() || raw.total < 0.0 {
        return Err(IngestError::InvalidTotal {
            id: raw.id.clone(),
            value: raw.total,
        });
    }

    Ok(Transaction {
        id: raw.id.clone(),
        timestamp,
        side,
        symbol: raw.symbol.clone(),
        shares: raw.shares,
        price: raw.price,
        total: raw.total,
    })
}

/// Validate and convert a whole collection, failing on the first bad
/// record.
pub fn parse_log(raw: &[RawTransaction]) -> Result<Vec<Transaction>, IngestError> {
    raw.iter().map(parse_transaction).collect()
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    // Offset-less timestamps are taken as UTC.
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    None
}
