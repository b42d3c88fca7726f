//! LedgerLab Core — transaction domain types and the cost-basis replay engine.
//!
//! This crate contains the heart of the analytics pipeline:
//! - Domain types (transactions, enriched trades, cost-basis state)
//! - Chronological normalizer with a stable tie-break
//! - Average-cost tracker with oversell clamping and lot deletion
//! - Sequential and by-symbol sharded replay
//! - Ingestion boundary for raw, stringly-typed records
//! - Log fingerprinting for reproducible report identity
//!
//! The engine is a pure transformation: an unordered transaction
//! collection in, enriched trades and open positions out. It holds no
//! state across calls and reads no clock.

pub mod domain;
pub mod engine;
pub mod fingerprint;
pub mod ingest;
