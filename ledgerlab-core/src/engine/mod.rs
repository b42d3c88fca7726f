//! Replay engine: chronological normalization + cost-basis replay.

pub mod normalize;
pub mod replay;

pub use normalize::{chronological_order, is_chronological};
pub use replay::{replay, replay_sharded, ReplayOutcome};
