//! Per-user, per-tier strict shop ordering via binary-insertion comparisons.

mod engine;
mod session;
mod types;

pub use engine::{InsertionOutcome, RankingEngine};
pub use session::{ComparisonWinner, InsertionSession, SessionStep};
pub use types::{
    BatchItem, Candidate, InsertionReceipt, RankingEntry, ReorderItem, SatisfactionTier,
    display_percentile,
};
