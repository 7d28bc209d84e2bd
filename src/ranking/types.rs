use serde::{Deserialize, Serialize};
use strum::Display;

/// Satisfaction tier for a rated shop.
///
/// Canonical 3-level scale; declaration order makes `Good` the greatest, so
/// tier comparisons read naturally ("better tier" = greater). Listings show
/// tiers in descending order (Good first).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SatisfactionTier {
    Bad,
    Ok,
    Good,
}

impl SatisfactionTier {
    pub fn as_i64(self) -> i64 {
        match self {
            SatisfactionTier::Bad => 0,
            SatisfactionTier::Ok => 1,
            SatisfactionTier::Good => 2,
        }
    }

    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(SatisfactionTier::Bad),
            1 => Some(SatisfactionTier::Ok),
            2 => Some(SatisfactionTier::Good),
            _ => None,
        }
    }

    /// Map the legacy 4-level scale (bad=0, ok=1, good=2, best=3) onto the
    /// canonical scale; `best` folds into `Good`.
    pub fn from_level4(value: i64) -> Option<Self> {
        match value {
            3 => Some(SatisfactionTier::Good),
            other => Self::from_i64(other),
        }
    }
}

/// One row of a user's ranking. Ranks are dense 1..N within each
/// (user, tier) partition; rank 1 is the best in its tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub id: i64,
    pub user_id: String,
    pub shop_id: i64,
    pub satisfaction_tier: SatisfactionTier,
    pub rank: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Comparison opponent inside an insertion session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub shop_id: i64,
    pub rank: i64,
}

/// Item of a bulk reorder: the full target position for one shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderItem {
    pub shop_id: i64,
    pub rank: i64,
    pub satisfaction_tier: SatisfactionTier,
}

/// Item of a batch create: shop plus satisfaction, no explicit rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
    pub shop_id: i64,
    pub satisfaction: SatisfactionTier,
}

/// Outcome of a committed insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionReceipt {
    /// Rank within the tier (1-based).
    pub rank: i64,
    /// Tier size after the insertion.
    pub tier_size: i64,
    /// Display rank across all tiers: entries in better tiers + in-tier rank.
    pub overall_rank: i64,
    /// Total ranked shops for the user after the insertion.
    pub total: i64,
    /// `ceil(overall_rank / total * 100)`.
    pub percentile: i64,
}

/// Display percentile for a rank within a total, rounded up.
pub fn display_percentile(overall_rank: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (overall_rank * 100 + total - 1) / total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_round_trips_through_i64() {
        for tier in [
            SatisfactionTier::Bad,
            SatisfactionTier::Ok,
            SatisfactionTier::Good,
        ] {
            assert_eq!(SatisfactionTier::from_i64(tier.as_i64()), Some(tier));
        }
        assert_eq!(SatisfactionTier::from_i64(3), None);
        assert_eq!(SatisfactionTier::from_i64(-1), None);
    }

    #[test]
    fn level4_best_folds_into_good() {
        assert_eq!(
            SatisfactionTier::from_level4(3),
            Some(SatisfactionTier::Good)
        );
        assert_eq!(SatisfactionTier::from_level4(0), Some(SatisfactionTier::Bad));
        assert_eq!(SatisfactionTier::from_level4(4), None);
    }

    #[test]
    fn good_is_the_greatest_tier() {
        assert!(SatisfactionTier::Good > SatisfactionTier::Ok);
        assert!(SatisfactionTier::Ok > SatisfactionTier::Bad);
    }

    #[test]
    fn tier_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&SatisfactionTier::Good).unwrap(),
            "\"good\""
        );
        assert_eq!(SatisfactionTier::Bad.to_string(), "bad");
    }

    #[test]
    fn percentile_rounds_up() {
        assert_eq!(display_percentile(1, 3), 34);
        assert_eq!(display_percentile(3, 3), 100);
        assert_eq!(display_percentile(1, 1), 100);
        assert_eq!(display_percentile(1, 100), 1);
        assert_eq!(display_percentile(0, 0), 0);
    }
}
