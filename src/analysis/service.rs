//! The taste-analysis orchestrator.

use super::generator::AnalysisGenerator;
use super::prompt::build_analysis_prompt;
use super::types::{
    AnalysisInput, AnalysisReceipt, GeneratedAnalysis, RankedShopDetail, SharedAnalysis,
};
use crate::directory::{ShopDirectory, UserDirectory};
use crate::error::{AnalysisError, Result};
use crate::ranking::RankingEngine;
use crate::store::SqliteStore;
use crate::taste::{AxisScores, Lang, TypeProfile, compute_taste_type, is_valid_taste_type, taste_type_profile};
use anyhow::Context;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use rand::Rng;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;
use uuid::Uuid;

/// Rows of the ranked-shop snapshot persisted with each analysis.
const SUMMARY_LIMIT: usize = 20;

/// Mint a URL-safe 8-character share code.
///
/// No uniqueness retry: 6 random bytes make collisions negligible for this
/// population, matching the accepted risk of the share-link design.
pub fn mint_share_code() -> String {
    let bytes: [u8; 6] = rand::rng().random();
    let mut code = URL_SAFE_NO_PAD.encode(bytes);
    code.truncate(8);
    code
}

/// Composes classifier output, ranked shops, and the external generator into
/// a persisted, shareable analysis.
pub struct TasteAnalysisService {
    pool: SqlitePool,
    ranking: RankingEngine,
    generator: Arc<dyn AnalysisGenerator>,
    shops: Arc<dyn ShopDirectory>,
    users: Arc<dyn UserDirectory>,
}

impl TasteAnalysisService {
    pub fn new(
        store: &SqliteStore,
        generator: Arc<dyn AnalysisGenerator>,
        shops: Arc<dyn ShopDirectory>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            pool: store.pool().clone(),
            ranking: RankingEngine::new(store),
            generator,
            shops,
            users,
        }
    }

    /// Generate (or regenerate) the user's taste analysis.
    ///
    /// Requires a stored quiz result. Each call overwrites the previous
    /// analysis and mints a fresh share code, invalidating older links.
    /// Generator failures degrade to a deterministic local fallback; the row
    /// is written only once a result (real or fallback) exists.
    pub async fn generate(&self, user_id: &str) -> Result<AnalysisReceipt> {
        let row = sqlx::query("SELECT taste_type, scores FROM taste_results WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Err(AnalysisError::QuizNotCompleted {
                user_id: user_id.to_string(),
            }
            .into());
        };

        let stored_type: String = row.try_get("taste_type")?;
        let scores_json: String = row.try_get("scores")?;
        let scores: AxisScores =
            serde_json::from_str(&scores_json).context("deserialize stored axis scores")?;

        // Prefer the stored type when valid; recompute otherwise.
        let full_type = if is_valid_taste_type(&stored_type) {
            stored_type
        } else {
            compute_taste_type(&scores).full_type
        };
        let (base_code, subtype) = full_type
            .split_once('-')
            .map(|(base, sub)| (base.to_string(), sub.to_string()))
            .unwrap_or((full_type.clone(), String::new()));

        let profile = taste_type_profile(&base_code, Lang::Ko).ok_or_else(|| {
            AnalysisError::UnknownTasteType {
                code: base_code.clone(),
            }
        })?;

        let ranked_shops = self.ranked_shop_details(user_id).await?;

        let input = AnalysisInput {
            full_type: full_type.clone(),
            base_code,
            subtype,
            profile: profile.clone(),
            scores: scores.clone(),
            ranked_shops,
        };
        let prompt = build_analysis_prompt(&input);

        tracing::info!(user_id, taste_type = %full_type, "generating taste analysis");
        let analysis = match self.generator.generate(&prompt).await {
            Ok(analysis) => analysis,
            Err(error) => {
                tracing::warn!(
                    user_id,
                    generator = self.generator.name(),
                    %error,
                    "generation failed, using fallback analysis"
                );
                fallback_analysis(&profile)
            }
        };

        let share_code = mint_share_code();
        self.persist(user_id, &full_type, &scores, &input, &analysis, &share_code)
            .await?;

        tracing::info!(user_id, %share_code, "taste analysis saved");
        Ok(AnalysisReceipt {
            analysis,
            share_code,
            taste_type: full_type,
            taste_profile: profile,
        })
    }

    /// Resolve a share code to the public analysis payload.
    pub async fn shared(&self, code: &str) -> Result<SharedAnalysis> {
        let row = sqlx::query(
            "SELECT user_id, taste_type, taste_scores, ranked_shops_summary, analysis, created_at
             FROM taste_analyses WHERE share_code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Err(AnalysisError::ShareNotFound {
                code: code.to_string(),
            }
            .into());
        };

        let user_id: String = row.try_get("user_id")?;
        let taste_type: String = row.try_get("taste_type")?;
        let taste_scores: AxisScores =
            serde_json::from_str(row.try_get("taste_scores")?)
                .context("deserialize shared taste scores")?;
        let ranked_shops_summary =
            serde_json::from_str(row.try_get("ranked_shops_summary")?)
                .context("deserialize shared shop summary")?;
        let analysis: GeneratedAnalysis =
            serde_json::from_str(row.try_get("analysis")?).context("deserialize shared analysis")?;
        let created_at: String = row.try_get("created_at")?;

        let base_code = taste_type.split('-').next().unwrap_or(&taste_type);
        let taste_profile = taste_type_profile(base_code, Lang::Ko).ok_or_else(|| {
            AnalysisError::UnknownTasteType {
                code: base_code.to_string(),
            }
        })?;
        let taste_profile_en =
            taste_type_profile(base_code, Lang::En).ok_or_else(|| AnalysisError::UnknownTasteType {
                code: base_code.to_string(),
            })?;

        let Some(user) = self.users.user_by_id(&user_id).await? else {
            // the author is gone; the link is dead
            return Err(AnalysisError::ShareNotFound {
                code: code.to_string(),
            }
            .into());
        };

        Ok(SharedAnalysis {
            taste_type,
            taste_scores,
            ranked_shops_summary,
            analysis,
            taste_profile,
            taste_profile_en,
            user,
            created_at,
        })
    }

    async fn ranked_shop_details(&self, user_id: &str) -> Result<Vec<RankedShopDetail>> {
        let entries = self.ranking.list(user_id).await?;
        let ids: Vec<i64> = entries.iter().map(|e| e.shop_id).collect();
        let shops = self.shops.shops_by_ids(&ids).await?;

        // inner-join semantics: entries without a directory record are dropped
        Ok(entries
            .into_iter()
            .filter_map(|entry| {
                shops.get(&entry.shop_id).map(|shop| RankedShopDetail {
                    name: shop.name.clone(),
                    food_kind: shop.food_kind.clone(),
                    description: shop.description.clone(),
                    address_region: shop.address_region.clone(),
                    satisfaction_tier: entry.satisfaction_tier,
                    rank: entry.rank,
                })
            })
            .collect())
    }

    async fn persist(
        &self,
        user_id: &str,
        full_type: &str,
        scores: &AxisScores,
        input: &AnalysisInput,
        analysis: &GeneratedAnalysis,
        share_code: &str,
    ) -> Result<()> {
        let summary: Vec<_> = input
            .ranked_shops
            .iter()
            .take(SUMMARY_LIMIT)
            .map(RankedShopDetail::to_summary)
            .collect();

        let scores_json = serde_json::to_string(scores).context("serialize taste scores")?;
        let summary_json = serde_json::to_string(&summary).context("serialize shop summary")?;
        let analysis_json = serde_json::to_string(analysis).context("serialize analysis")?;
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO taste_analyses
                 (id, user_id, share_code, taste_type, taste_scores,
                  ranked_shops_summary, analysis, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
             ON CONFLICT(user_id) DO UPDATE SET
                 share_code = excluded.share_code,
                 taste_type = excluded.taste_type,
                 taste_scores = excluded.taste_scores,
                 ranked_shops_summary = excluded.ranked_shops_summary,
                 analysis = excluded.analysis,
                 updated_at = excluded.updated_at",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(share_code)
        .bind(full_type)
        .bind(&scores_json)
        .bind(&summary_json)
        .bind(&analysis_json)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Deterministic analysis built only from local profile data, used when the
/// generator fails or returns unparseable output.
fn fallback_analysis(profile: &TypeProfile) -> GeneratedAnalysis {
    GeneratedAnalysis {
        summary: format!("{}: {}", profile.name, profile.tagline),
        ..GeneratedAnalysis::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_codes_are_eight_url_safe_chars() {
        for _ in 0..64 {
            let code = mint_share_code();
            assert_eq!(code.len(), 8);
            assert!(
                code.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            );
        }
    }

    #[test]
    fn share_codes_vary() {
        let a = mint_share_code();
        let b = mint_share_code();
        let c = mint_share_code();
        assert!(!(a == b && b == c));
    }

    #[test]
    fn fallback_uses_only_profile_data() {
        let profile = TypeProfile {
            name: "The Artisan".into(),
            tagline: "Prefers strong, heavy flavors.".into(),
        };
        let fallback = fallback_analysis(&profile);
        assert_eq!(fallback.summary, "The Artisan: Prefers strong, heavy flavors.");
        assert!(fallback.highlights.is_empty());
        assert!(fallback.detailed_analysis.is_empty());
    }
}
