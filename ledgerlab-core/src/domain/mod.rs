//! Domain types for the LedgerLab replay engine.

pub mod cost_basis;
pub mod enriched;
pub mod transaction;

pub use cost_basis::{CostBasisBook, CostBasisState, SaleOutcome, SHARE_EPSILON};
pub use enriched::EnrichedTransaction;
pub use transaction::{TradeSide, Transaction};

/// Symbol type alias
pub type Symbol = String;
