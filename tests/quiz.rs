use std::collections::BTreeMap;
use tastemap::quiz::{
    AnswerSheet, ClusterAssignment, DEFAULT_CLUSTER_ID, MATCH_TABLE_SIZE, QUESTION_COUNT,
    QuizClassifier,
};
use tastemap::store::SqliteStore;
use tastemap::taste::{Axis, Subtype};

async fn seeded_store() -> SqliteStore {
    let store = SqliteStore::in_memory().await.unwrap();
    store.seed_quiz_reference().await.unwrap();
    store
}

fn full_sheet(value: u8) -> AnswerSheet {
    (1..=QUESTION_COUNT).map(|q| (q, value)).collect()
}

async fn match_count(store: &SqliteStore) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM quiz_matches")
        .fetch_one(store.pool())
        .await
        .unwrap();
    count
}

#[tokio::test]
async fn seeding_fills_the_complete_match_table() {
    let store = seeded_store().await;
    assert_eq!(match_count(&store).await, MATCH_TABLE_SIZE as i64);

    let (clusters,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM quiz_clusters")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(clusters, 8);
}

#[tokio::test]
async fn seeding_twice_leaves_row_counts_unchanged() {
    let store = seeded_store().await;
    let first = match_count(&store).await;

    let report = store.seed_quiz_reference().await.unwrap();
    assert_eq!(match_count(&store).await, first);
    assert_eq!(report.matches_inserted, 0);
    assert_eq!(report.matches_existing, MATCH_TABLE_SIZE as u64);
}

#[tokio::test]
async fn all_ones_resolve_to_the_gentle_classic_cluster() {
    let store = seeded_store().await;
    let classifier = QuizClassifier::new(&store);

    let outcome = classifier.classify(&full_sheet(1)).await.unwrap();
    assert_eq!(outcome.vector.lookup_key(), "-2,-2,-2,-2,-2,-2,-2");

    match &outcome.assignment {
        ClusterAssignment::Matched { cluster_id, record } => {
            assert_eq!(*cluster_id, 2);
            assert_eq!(record.as_ref().unwrap().name, "Gentle Classic");
        }
        ClusterAssignment::Unmatched { .. } => panic!("expected a match"),
    }
}

#[tokio::test]
async fn high_boldness_acidity_vector_resolves_to_a_real_cluster() {
    let store = seeded_store().await;
    let classifier = QuizClassifier::new(&store);

    // questions 1-6 (boldness, acidity) at 5, the rest neutral
    let mut answers = full_sheet(3);
    for q in 1..=6 {
        answers.insert(q, 5);
    }

    let outcome = classifier.classify(&answers).await.unwrap();
    assert_eq!(outcome.vector.lookup_key(), "2,2,0,0,0,0,0");

    let ClusterAssignment::Matched { cluster_id, record } = &outcome.assignment else {
        panic!("expected a match, not the fallback");
    };
    assert_ne!(*cluster_id, DEFAULT_CLUSTER_ID);
    assert!(record.is_some());
}

#[tokio::test]
async fn outcome_carries_scores_and_taste_type() {
    let store = seeded_store().await;
    let classifier = QuizClassifier::new(&store);

    let outcome = classifier.classify(&full_sheet(5)).await.unwrap();
    assert_eq!(outcome.scores[&Axis::Boldness], 2.0);
    assert_eq!(outcome.scores.len(), 7);
    // all +2: H, D (acidity == richness), U (sweetness == umami), P; stability 2.0 → A
    assert_eq!(outcome.taste_type.full_type, "HDUP-A");
    assert_eq!(outcome.taste_type.subtype, Subtype::A);
}

#[tokio::test]
async fn classify_and_store_upserts_the_latest_result() {
    let store = seeded_store().await;
    let classifier = QuizClassifier::new(&store);

    classifier.classify_and_store("u1", &full_sheet(1)).await.unwrap();
    let (first_type,): (String,) =
        sqlx::query_as("SELECT taste_type FROM taste_results WHERE user_id = 'u1'")
            .fetch_one(store.pool())
            .await
            .unwrap();
    assert_eq!(first_type, "LDUF-A");

    classifier.classify_and_store("u1", &full_sheet(5)).await.unwrap();
    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT taste_type FROM taste_results WHERE user_id = 'u1'")
            .fetch_all(store.pool())
            .await
            .unwrap();
    assert_eq!(rows.len(), 1, "retake must overwrite, not append");
    assert_eq!(rows[0].0, "HDUP-A");
}

#[tokio::test]
async fn empty_answer_sheet_is_rejected_before_any_lookup() {
    let store = seeded_store().await;
    let classifier = QuizClassifier::new(&store);

    let err = classifier.classify(&BTreeMap::new()).await.unwrap_err();
    assert!(err.to_string().contains("empty answer set"));
}

#[tokio::test]
async fn missing_match_row_surfaces_as_unmatched_with_legacy_default() {
    let store = seeded_store().await;
    sqlx::query("DELETE FROM quiz_matches WHERE vector = '0,0,0,0,0,0,0'")
        .execute(store.pool())
        .await
        .unwrap();

    let classifier = QuizClassifier::new(&store);
    let outcome = classifier.classify(&full_sheet(3)).await.unwrap();

    assert!(matches!(
        outcome.assignment,
        ClusterAssignment::Unmatched { .. }
    ));
    assert_eq!(outcome.assignment.cluster_id(), None);
    assert_eq!(outcome.assignment.cluster_id_or_default(), DEFAULT_CLUSTER_ID);
}
