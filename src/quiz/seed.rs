//! Idempotent seeding of the quiz reference tables.
//!
//! Runs as a deploy/startup step, never on the request path. Cluster
//! metadata is upserted; match rows are inserted with conflict-ignore, so
//! concurrent seeders converge on the same final state.

use super::reference::{CLUSTER_SEEDS, MATCH_TABLE_SIZE, derive_match_table};
use crate::error::Result;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

/// Rows per INSERT statement, kept well under SQLite's bind-parameter cap.
const INSERT_BATCH_SIZE: usize = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub clusters_upserted: usize,
    pub matches_inserted: u64,
    pub matches_existing: u64,
}

/// Seed cluster metadata and the vector→cluster match table.
///
/// Calling this twice leaves the same row counts as calling it once.
pub async fn seed_reference_data(pool: &SqlitePool) -> Result<SeedReport> {
    let now = Utc::now().to_rfc3339();
    let mut tx = pool.begin().await?;

    for seed in &CLUSTER_SEEDS {
        sqlx::query(
            "INSERT INTO quiz_clusters (cluster_id, name, tagline, medoid_value, updated_at)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT(cluster_id) DO UPDATE SET
                 name = excluded.name,
                 tagline = excluded.tagline,
                 medoid_value = excluded.medoid_value,
                 updated_at = excluded.updated_at",
        )
        .bind(seed.cluster_id)
        .bind(seed.name)
        .bind(seed.tagline)
        .bind(seed.medoid_value())
        .bind(&now)
        .execute(&mut *tx)
        .await?;
    }

    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM quiz_matches")
        .fetch_one(&mut *tx)
        .await?;

    #[allow(clippy::cast_possible_wrap)]
    let expected = MATCH_TABLE_SIZE as i64;
    let mut inserted: u64 = 0;

    if existing < expected {
        let table = derive_match_table();
        for chunk in table.chunks(INSERT_BATCH_SIZE) {
            let mut builder: QueryBuilder<Sqlite> =
                QueryBuilder::new("INSERT OR IGNORE INTO quiz_matches (vector, cluster_id) ");
            builder.push_values(chunk, |mut row, (vector, cluster_id)| {
                row.push_bind(vector).push_bind(cluster_id);
            });
            inserted += builder.build().execute(&mut *tx).await?.rows_affected();
        }
    }

    tx.commit().await?;

    let report = SeedReport {
        clusters_upserted: CLUSTER_SEEDS.len(),
        matches_inserted: inserted,
        #[allow(clippy::cast_sign_loss)]
        matches_existing: existing as u64,
    };
    tracing::info!(
        clusters = report.clusters_upserted,
        inserted = report.matches_inserted,
        existing = report.matches_existing,
        "quiz reference data seeded"
    );
    Ok(report)
}
