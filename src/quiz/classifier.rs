//! Store-backed quiz classification.

use super::answers::{AnswerSheet, ScoreVector, compute_axis_scores, validate_answers};
use crate::error::Result;
use crate::store::SqliteStore;
use crate::taste::{AxisScores, TasteType, compute_taste_type};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};

/// Legacy fallback cluster for vectors missing from the match table.
pub const DEFAULT_CLUSTER_ID: i64 = 1;

/// Metadata row for one cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRecord {
    pub cluster_id: i64,
    pub name: String,
    pub tagline: String,
    pub medoid_value: String,
}

/// Result of the vector→cluster lookup.
///
/// A missing match row is a data-completeness gap, so it is surfaced as a
/// variant instead of silently becoming the default cluster; callers that
/// want the legacy behavior use [`ClusterAssignment::cluster_id_or_default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClusterAssignment {
    Matched {
        cluster_id: i64,
        /// `None` when the match row points at a cluster with no metadata.
        record: Option<ClusterRecord>,
    },
    Unmatched { vector_key: String },
}

impl ClusterAssignment {
    pub fn cluster_id(&self) -> Option<i64> {
        match self {
            ClusterAssignment::Matched { cluster_id, .. } => Some(*cluster_id),
            ClusterAssignment::Unmatched { .. } => None,
        }
    }

    /// Resolved cluster id, substituting [`DEFAULT_CLUSTER_ID`] for
    /// unmatched vectors.
    pub fn cluster_id_or_default(&self) -> i64 {
        self.cluster_id().unwrap_or(DEFAULT_CLUSTER_ID)
    }
}

/// Full classification result for one submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizOutcome {
    pub vector: ScoreVector,
    pub scores: AxisScores,
    pub assignment: ClusterAssignment,
    pub taste_type: TasteType,
}

/// Classifier reading the seeded reference tables.
///
/// Stateless between calls; the reference data is seeded once at startup by
/// [`crate::quiz::seed_reference_data`].
pub struct QuizClassifier {
    pool: SqlitePool,
}

impl QuizClassifier {
    pub fn new(store: &SqliteStore) -> Self {
        Self {
            pool: store.pool().clone(),
        }
    }

    pub fn with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Classify a raw answer sheet.
    pub async fn classify(&self, answers: &AnswerSheet) -> Result<QuizOutcome> {
        validate_answers(answers)?;

        let vector = compute_axis_scores(answers);
        let key = vector.lookup_key();

        let matched: Option<(i64,)> =
            sqlx::query_as("SELECT cluster_id FROM quiz_matches WHERE vector = $1")
                .bind(&key)
                .fetch_optional(&self.pool)
                .await?;

        let assignment = match matched {
            Some((cluster_id,)) => {
                let record = self.cluster_record(cluster_id).await?;
                if record.is_none() {
                    tracing::warn!(cluster_id, "match row points at missing cluster metadata");
                }
                ClusterAssignment::Matched { cluster_id, record }
            }
            None => {
                tracing::warn!(vector = %key, "no cluster match for score vector");
                ClusterAssignment::Unmatched { vector_key: key }
            }
        };

        let scores = vector.to_axis_scores();
        let taste_type = compute_taste_type(&scores);
        tracing::debug!(
            vector = %vector.lookup_key(),
            cluster = ?assignment.cluster_id(),
            taste_type = %taste_type.full_type,
            "quiz classified"
        );

        Ok(QuizOutcome {
            vector,
            scores,
            assignment,
            taste_type,
        })
    }

    /// Classify and persist the result as the user's current taste result.
    ///
    /// Retakes overwrite; the stored row always reflects the latest
    /// submission.
    pub async fn classify_and_store(
        &self,
        user_id: &str,
        answers: &AnswerSheet,
    ) -> Result<QuizOutcome> {
        let outcome = self.classify(answers).await?;

        let scores_json = serde_json::to_string(&outcome.scores)
            .map_err(|e| anyhow::anyhow!("serialize axis scores: {e}"))?;
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO taste_results (user_id, cluster_id, taste_type, scores, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             ON CONFLICT(user_id) DO UPDATE SET
                 cluster_id = excluded.cluster_id,
                 taste_type = excluded.taste_type,
                 scores = excluded.scores,
                 updated_at = excluded.updated_at",
        )
        .bind(user_id)
        .bind(outcome.assignment.cluster_id_or_default())
        .bind(&outcome.taste_type.full_type)
        .bind(&scores_json)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(outcome)
    }

    async fn cluster_record(&self, cluster_id: i64) -> Result<Option<ClusterRecord>> {
        let row = sqlx::query(
            "SELECT cluster_id, name, tagline, medoid_value
             FROM quiz_clusters WHERE cluster_id = $1",
        )
        .bind(cluster_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| {
            Ok(ClusterRecord {
                cluster_id: r.try_get("cluster_id")?,
                name: r.try_get("name")?,
                tagline: r.try_get("tagline")?,
                medoid_value: r.try_get("medoid_value")?,
            })
        })
        .transpose()
    }
}
