//! Store-backed ranking operations.
//!
//! All mutation paths keep the per-(user, tier) rank sequence dense 1..N:
//! insertion shifts the displaced suffix up, deletion shifts it back down,
//! and bulk reorder validates density before the transactional replace.

use super::session::{ComparisonWinner, InsertionSession};
use super::types::{
    BatchItem, Candidate, InsertionReceipt, RankingEntry, ReorderItem, SatisfactionTier,
    display_percentile,
};
use crate::error::{RankingError, Result};
use crate::store::SqliteStore;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::{BTreeMap, BTreeSet};

/// Result of starting or advancing an insertion.
#[derive(Debug, Clone)]
pub enum InsertionOutcome {
    /// Rank persisted; no (further) comparisons needed.
    Assigned(InsertionReceipt),
    /// Present the session's current comparison and call
    /// [`RankingEngine::submit_comparison`] with the winner.
    Comparing(InsertionSession),
}

pub struct RankingEngine {
    pool: SqlitePool,
}

impl RankingEngine {
    pub fn new(store: &SqliteStore) -> Self {
        Self {
            pool: store.pool().clone(),
        }
    }

    pub fn with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Begin inserting a newly rated shop into its tier.
    ///
    /// An empty tier assigns rank 1 immediately with zero comparisons.
    /// Re-rating a shop removes its previous entry (re-densifying the old
    /// tier) before the comparison tournament starts.
    pub async fn start_insertion(
        &self,
        user_id: &str,
        shop_id: i64,
        tier: SatisfactionTier,
    ) -> Result<InsertionOutcome> {
        let mut tx = self.pool.begin().await?;

        let previous: Option<(i64, i64)> = sqlx::query_as(
            "SELECT satisfaction_tier, rank FROM users_ranking
             WHERE user_id = $1 AND shop_id = $2",
        )
        .bind(user_id)
        .bind(shop_id)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some((old_tier, old_rank)) = previous {
            tracing::debug!(user_id, shop_id, old_tier, old_rank, "re-rating shop");
            remove_entry(&mut tx, user_id, shop_id, old_tier, old_rank).await?;
        }

        let candidates: Vec<(i64, i64)> = sqlx::query_as(
            "SELECT shop_id, rank FROM users_ranking
             WHERE user_id = $1 AND satisfaction_tier = $2
             ORDER BY rank ASC",
        )
        .bind(user_id)
        .bind(tier.as_i64())
        .fetch_all(&mut *tx)
        .await?;

        if candidates.is_empty() {
            let receipt = insert_at(&mut tx, user_id, shop_id, tier, 1).await?;
            tx.commit().await?;
            tracing::debug!(user_id, shop_id, %tier, "empty tier, assigned rank 1");
            return Ok(InsertionOutcome::Assigned(receipt));
        }

        tx.commit().await?;

        let candidates = candidates
            .into_iter()
            .map(|(shop_id, rank)| Candidate { shop_id, rank })
            .collect();
        Ok(InsertionOutcome::Comparing(InsertionSession::new(
            user_id, shop_id, tier, candidates,
        )))
    }

    /// Feed one comparison result into a session.
    ///
    /// Returns the next comparison, or persists the converged rank. Nothing
    /// is written until convergence; the caller round-trips the session
    /// between requests.
    pub async fn submit_comparison(
        &self,
        mut session: InsertionSession,
        winner: ComparisonWinner,
    ) -> Result<InsertionOutcome> {
        if session.converged() {
            return Err(RankingError::SessionComplete.into());
        }

        session.choose(winner);
        if !session.converged() {
            return Ok(InsertionOutcome::Comparing(session));
        }

        let target = session
            .target_rank()
            .ok_or_else(|| anyhow::anyhow!("converged session without target rank"))?;

        let mut tx = self.pool.begin().await?;
        let receipt = insert_at(
            &mut tx,
            &session.user_id,
            session.shop_id,
            session.tier,
            target,
        )
        .await?;
        tx.commit().await?;

        tracing::debug!(
            user_id = %session.user_id,
            shop_id = session.shop_id,
            tier = %session.tier,
            rank = receipt.rank,
            "insertion committed"
        );
        Ok(InsertionOutcome::Assigned(receipt))
    }

    /// Atomically replace the user's entire ranking set.
    ///
    /// The payload must cover every shop exactly once with dense 1..N ranks
    /// per tier; anything else is rejected without side effects. Shops
    /// already ranked keep their original `created_at`. This is the second
    /// half of the documented batch-create → reorder protocol.
    pub async fn reorder(&self, user_id: &str, items: &[ReorderItem]) -> Result<()> {
        validate_reorder(items)?;

        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        let created: Vec<(i64, String)> =
            sqlx::query_as("SELECT shop_id, created_at FROM users_ranking WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(&mut *tx)
                .await?;
        let created: BTreeMap<i64, String> = created.into_iter().collect();

        sqlx::query("DELETE FROM users_ranking WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        for item in items {
            let created_at = created.get(&item.shop_id).cloned().unwrap_or_else(|| now.clone());
            sqlx::query(
                "INSERT INTO users_ranking
                     (user_id, shop_id, satisfaction_tier, rank, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(user_id)
            .bind(item.shop_id)
            .bind(item.satisfaction_tier.as_i64())
            .bind(item.rank)
            .bind(created_at)
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::debug!(user_id, count = items.len(), "rankings replaced");
        Ok(())
    }

    /// Create entries for unranked shops with provisional per-tier appended
    /// ranks. Already-ranked shops are skipped. Callers finalize positions
    /// with a follow-up [`RankingEngine::reorder`]. Returns the number of
    /// entries created.
    pub async fn batch_create(&self, user_id: &str, items: &[BatchItem]) -> Result<u64> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        // Good first, then Ok, then Bad, preserving payload order inside a tier.
        let mut sorted: Vec<BatchItem> = items.to_vec();
        sorted.sort_by_key(|item| std::cmp::Reverse(item.satisfaction));

        let mut next_rank: BTreeMap<SatisfactionTier, i64> = BTreeMap::new();
        let mut created = 0u64;

        for item in sorted {
            let existing: Option<(i64,)> = sqlx::query_as(
                "SELECT 1 FROM users_ranking WHERE user_id = $1 AND shop_id = $2",
            )
            .bind(user_id)
            .bind(item.shop_id)
            .fetch_optional(&mut *tx)
            .await?;
            if existing.is_some() {
                tracing::debug!(user_id, shop_id = item.shop_id, "already ranked, skipping");
                continue;
            }

            let rank = match next_rank.get(&item.satisfaction) {
                Some(rank) => *rank,
                None => {
                    let (max_rank,): (i64,) = sqlx::query_as(
                        "SELECT COALESCE(MAX(rank), 0) FROM users_ranking
                         WHERE user_id = $1 AND satisfaction_tier = $2",
                    )
                    .bind(user_id)
                    .bind(item.satisfaction.as_i64())
                    .fetch_one(&mut *tx)
                    .await?;
                    max_rank + 1
                }
            };

            sqlx::query(
                "INSERT INTO users_ranking
                     (user_id, shop_id, satisfaction_tier, rank, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, $5, $5)",
            )
            .bind(user_id)
            .bind(item.shop_id)
            .bind(item.satisfaction.as_i64())
            .bind(rank)
            .bind(&now)
            .execute(&mut *tx)
            .await?;

            next_rank.insert(item.satisfaction, rank + 1);
            created += 1;
        }

        tx.commit().await?;
        tracing::debug!(user_id, created, "batch rankings created");
        Ok(created)
    }

    /// Remove the user's entry for a shop, re-densifying the tier.
    ///
    /// Deleting any associated review content is the surrounding system's
    /// concern, not this engine's.
    pub async fn delete(&self, user_id: &str, shop_id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<(i64, i64)> = sqlx::query_as(
            "SELECT satisfaction_tier, rank FROM users_ranking
             WHERE user_id = $1 AND shop_id = $2",
        )
        .bind(user_id)
        .bind(shop_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((tier, rank)) = existing else {
            return Err(RankingError::EntryNotFound {
                user_id: user_id.to_string(),
                shop_id,
            }
            .into());
        };

        remove_entry(&mut tx, user_id, shop_id, tier, rank).await?;
        tx.commit().await?;
        tracing::debug!(user_id, shop_id, "ranking deleted");
        Ok(())
    }

    /// Full ranking list, tiers descending (Good first), ranks ascending.
    pub async fn list(&self, user_id: &str) -> Result<Vec<RankingEntry>> {
        let rows = sqlx::query(
            "SELECT id, user_id, shop_id, satisfaction_tier, rank, created_at, updated_at
             FROM users_ranking
             WHERE user_id = $1
             ORDER BY satisfaction_tier DESC, rank ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_entry_row).collect()
    }

    /// One tier's entries, ranks ascending.
    pub async fn tier_entries(
        &self,
        user_id: &str,
        tier: SatisfactionTier,
    ) -> Result<Vec<RankingEntry>> {
        let rows = sqlx::query(
            "SELECT id, user_id, shop_id, satisfaction_tier, rank, created_at, updated_at
             FROM users_ranking
             WHERE user_id = $1 AND satisfaction_tier = $2
             ORDER BY rank ASC",
        )
        .bind(user_id)
        .bind(tier.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_entry_row).collect()
    }
}

/// Delete one entry and close the rank gap it leaves, inside the caller's
/// transaction.
async fn remove_entry(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    user_id: &str,
    shop_id: i64,
    tier: i64,
    rank: i64,
) -> Result<()> {
    sqlx::query("DELETE FROM users_ranking WHERE user_id = $1 AND shop_id = $2")
        .bind(user_id)
        .bind(shop_id)
        .execute(&mut **tx)
        .await?;

    sqlx::query(
        "UPDATE users_ranking SET rank = rank - 1, updated_at = $1
         WHERE user_id = $2 AND satisfaction_tier = $3 AND rank > $4",
    )
    .bind(Utc::now().to_rfc3339())
    .bind(user_id)
    .bind(tier)
    .bind(rank)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Shift the displaced suffix up and insert at `target_rank` (clamped to one
/// past the current tier end), inside the caller's transaction.
async fn insert_at(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    user_id: &str,
    shop_id: i64,
    tier: SatisfactionTier,
    target_rank: i64,
) -> Result<InsertionReceipt> {
    let now = Utc::now().to_rfc3339();

    let (max_rank,): (i64,) = sqlx::query_as(
        "SELECT COALESCE(MAX(rank), 0) FROM users_ranking
         WHERE user_id = $1 AND satisfaction_tier = $2",
    )
    .bind(user_id)
    .bind(tier.as_i64())
    .fetch_one(&mut **tx)
    .await?;

    let rank = target_rank.clamp(1, max_rank + 1);

    sqlx::query(
        "UPDATE users_ranking SET rank = rank + 1, updated_at = $1
         WHERE user_id = $2 AND satisfaction_tier = $3 AND rank >= $4",
    )
    .bind(&now)
    .bind(user_id)
    .bind(tier.as_i64())
    .bind(rank)
    .execute(&mut **tx)
    .await?;

    sqlx::query(
        "INSERT INTO users_ranking
             (user_id, shop_id, satisfaction_tier, rank, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $5)",
    )
    .bind(user_id)
    .bind(shop_id)
    .bind(tier.as_i64())
    .bind(rank)
    .bind(&now)
    .execute(&mut **tx)
    .await?;

    let (higher,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM users_ranking
         WHERE user_id = $1 AND satisfaction_tier > $2",
    )
    .bind(user_id)
    .bind(tier.as_i64())
    .fetch_one(&mut **tx)
    .await?;

    let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users_ranking WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&mut **tx)
        .await?;

    let overall_rank = higher + rank;
    Ok(InsertionReceipt {
        rank,
        tier_size: max_rank + 1,
        overall_rank,
        total,
        percentile: display_percentile(overall_rank, total),
    })
}

fn validate_reorder(items: &[ReorderItem]) -> Result<()> {
    let mut shops = BTreeSet::new();
    for item in items {
        if !shops.insert(item.shop_id) {
            return Err(RankingError::InvalidReorder {
                reason: format!("shop {} appears more than once", item.shop_id),
            }
            .into());
        }
    }

    let mut per_tier: BTreeMap<SatisfactionTier, Vec<i64>> = BTreeMap::new();
    for item in items {
        per_tier.entry(item.satisfaction_tier).or_default().push(item.rank);
    }
    for (tier, mut ranks) in per_tier {
        ranks.sort_unstable();
        #[allow(clippy::cast_possible_wrap)]
        let expected: Vec<i64> = (1..=ranks.len() as i64).collect();
        if ranks != expected {
            return Err(RankingError::InvalidReorder {
                reason: format!("ranks in tier {tier} are not a dense 1..{}", expected.len()),
            }
            .into());
        }
    }
    Ok(())
}

fn map_entry_row(row: &SqliteRow) -> Result<RankingEntry> {
    let tier_raw: i64 = row.try_get("satisfaction_tier")?;
    let satisfaction_tier = SatisfactionTier::from_i64(tier_raw)
        .ok_or_else(|| anyhow::anyhow!("unknown satisfaction tier: {tier_raw}"))?;

    Ok(RankingEntry {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        shop_id: row.try_get("shop_id")?,
        satisfaction_tier,
        rank: row.try_get("rank")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
