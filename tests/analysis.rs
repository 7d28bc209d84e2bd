use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tastemap::TastemapError;
use tastemap::analysis::{
    AnalysisGenerator, GeminiGenerator, GeneratedAnalysis, TasteAnalysisService,
};
use tastemap::config::GeneratorConfig;
use tastemap::directory::{ShopDirectory, ShopInfo, UserDirectory, UserInfo};
use tastemap::error::AnalysisError;
use tastemap::quiz::{AnswerSheet, QUESTION_COUNT, QuizClassifier};
use tastemap::ranking::{BatchItem, RankingEngine, SatisfactionTier};
use tastemap::store::SqliteStore;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ─── Test doubles ───────────────────────────────────────────────────────────

struct StubGenerator {
    result: Option<GeneratedAnalysis>,
}

impl AnalysisGenerator for StubGenerator {
    fn name(&self) -> &str {
        "stub"
    }

    fn generate<'a>(
        &'a self,
        _prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<GeneratedAnalysis>> + Send + 'a>> {
        Box::pin(async move {
            self.result
                .clone()
                .ok_or_else(|| anyhow::anyhow!("stubbed generation failure"))
        })
    }
}

struct StubShops {
    shops: HashMap<i64, ShopInfo>,
}

impl StubShops {
    fn with(ids: &[i64]) -> Self {
        let shops = ids
            .iter()
            .map(|id| {
                (
                    *id,
                    ShopInfo {
                        id: *id,
                        name: format!("Shop {id}"),
                        food_kind: Some("korean".into()),
                        description: None,
                        address_region: Some("Seongsu".into()),
                        thumbnail_img: None,
                    },
                )
            })
            .collect();
        Self { shops }
    }
}

impl ShopDirectory for StubShops {
    fn shops_by_ids<'a>(
        &'a self,
        ids: &'a [i64],
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<HashMap<i64, ShopInfo>>> + Send + 'a>> {
        Box::pin(async move {
            Ok(ids
                .iter()
                .filter_map(|id| self.shops.get(id).cloned().map(|s| (*id, s)))
                .collect())
        })
    }
}

struct StubUsers;

impl UserDirectory for StubUsers {
    fn user_by_id<'a>(
        &'a self,
        user_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Option<UserInfo>>> + Send + 'a>> {
        Box::pin(async move {
            Ok(Some(UserInfo {
                nickname: format!("nick-{user_id}"),
                profile_image: None,
            }))
        })
    }
}

fn sample_analysis() -> GeneratedAnalysis {
    GeneratedAnalysis {
        summary: "A decisive, spice-forward palate.".into(),
        highlights: vec!["bold".into(), "spicy".into(), "savory".into(), "loyal".into()],
        personality_traits: vec!["decisive".into(), "curious".into(), "warm".into()],
        food_recommendations: vec![
            "mapo tofu".into(),
            "jjamppong".into(),
            "laksa".into(),
            "dan dan noodles".into(),
        ],
        detailed_analysis: "Ranked shops lean heavily into broth and heat.".into(),
    }
}

fn full_sheet(value: u8) -> AnswerSheet {
    (1..=QUESTION_COUNT).map(|q| (q, value)).collect()
}

async fn service_with(
    generator: StubGenerator,
) -> (SqliteStore, TasteAnalysisService) {
    let store = SqliteStore::in_memory().await.unwrap();
    store.seed_quiz_reference().await.unwrap();
    let service = TasteAnalysisService::new(
        &store,
        Arc::new(generator),
        Arc::new(StubShops::with(&[1, 2, 3])),
        Arc::new(StubUsers),
    );
    (store, service)
}

async fn complete_quiz_and_rank(store: &SqliteStore, user: &str) {
    let classifier = QuizClassifier::new(store);
    classifier.classify_and_store(user, &full_sheet(5)).await.unwrap();

    let engine = RankingEngine::new(store);
    engine
        .batch_create(
            user,
            &[
                BatchItem {
                    shop_id: 1,
                    satisfaction: SatisfactionTier::Good,
                },
                BatchItem {
                    shop_id: 2,
                    satisfaction: SatisfactionTier::Good,
                },
                BatchItem {
                    shop_id: 3,
                    satisfaction: SatisfactionTier::Bad,
                },
            ],
        )
        .await
        .unwrap();
}

// ─── Orchestrator flows ─────────────────────────────────────────────────────

#[tokio::test]
async fn analysis_before_quiz_is_a_precondition_error() {
    let (_store, service) = service_with(StubGenerator {
        result: Some(sample_analysis()),
    })
    .await;

    let err = service.generate("u1").await.unwrap_err();
    assert!(matches!(
        err,
        TastemapError::Analysis(AnalysisError::QuizNotCompleted { .. })
    ));
}

#[tokio::test]
async fn share_code_round_trips_to_consistent_data() {
    let (store, service) = service_with(StubGenerator {
        result: Some(sample_analysis()),
    })
    .await;
    complete_quiz_and_rank(&store, "u1").await;

    let receipt = service.generate("u1").await.unwrap();
    assert_eq!(receipt.share_code.len(), 8);
    assert_eq!(receipt.taste_type, "HDUP-A");
    assert_eq!(receipt.analysis, sample_analysis());

    let shared = service.shared(&receipt.share_code).await.unwrap();
    assert_eq!(shared.taste_type, receipt.taste_type);
    assert_eq!(shared.analysis, receipt.analysis);
    assert_eq!(shared.taste_scores[&tastemap::taste::Axis::Boldness], 2.0);
    assert_eq!(shared.user.nickname, "nick-u1");
    assert_eq!(shared.taste_profile, receipt.taste_profile);
    assert_ne!(shared.taste_profile_en.name, shared.taste_profile.name);
    // snapshot keeps tier-descending order and the joined names
    assert_eq!(shared.ranked_shops_summary.len(), 3);
    assert_eq!(shared.ranked_shops_summary[0].name, "Shop 1");
    assert_eq!(
        shared.ranked_shops_summary[2].satisfaction_tier,
        SatisfactionTier::Bad
    );
}

#[tokio::test]
async fn regeneration_overwrites_and_invalidates_the_old_link() {
    let (store, service) = service_with(StubGenerator {
        result: Some(sample_analysis()),
    })
    .await;
    complete_quiz_and_rank(&store, "u1").await;

    let first = service.generate("u1").await.unwrap();
    let second = service.generate("u1").await.unwrap();
    assert_ne!(first.share_code, second.share_code);

    let err = service.shared(&first.share_code).await.unwrap_err();
    assert!(matches!(
        err,
        TastemapError::Analysis(AnalysisError::ShareNotFound { .. })
    ));
    assert!(service.shared(&second.share_code).await.is_ok());

    let (rows,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM taste_analyses")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(rows, 1, "analyses are overwritten, not versioned");
}

#[tokio::test]
async fn generator_failure_degrades_to_the_profile_fallback() {
    let (store, service) = service_with(StubGenerator { result: None }).await;
    complete_quiz_and_rank(&store, "u1").await;

    let receipt = service.generate("u1").await.unwrap();
    // HDUP → The Pursuer (Korean profile feeds the fallback summary)
    assert!(receipt.analysis.summary.contains("추적자형 미식가"));
    assert!(receipt.analysis.highlights.is_empty());

    // the fallback is what gets persisted and shared
    let shared = service.shared(&receipt.share_code).await.unwrap();
    assert_eq!(shared.analysis.summary, receipt.analysis.summary);
}

#[tokio::test]
async fn unknown_share_code_is_not_found() {
    let (_store, service) = service_with(StubGenerator {
        result: Some(sample_analysis()),
    })
    .await;

    let err = service.shared("nope1234").await.unwrap_err();
    assert!(matches!(
        err,
        TastemapError::Analysis(AnalysisError::ShareNotFound { .. })
    ));
}

#[tokio::test]
async fn analysis_works_with_no_ranked_shops() {
    let (store, service) = service_with(StubGenerator {
        result: Some(sample_analysis()),
    })
    .await;
    let classifier = QuizClassifier::new(&store);
    classifier.classify_and_store("u1", &full_sheet(1)).await.unwrap();

    let receipt = service.generate("u1").await.unwrap();
    let shared = service.shared(&receipt.share_code).await.unwrap();
    assert!(shared.ranked_shops_summary.is_empty());
}

// ─── Gemini generator over the wire ─────────────────────────────────────────

fn gemini_response_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ] } }
        ]
    })
}

fn generator_for(server: &MockServer) -> GeminiGenerator {
    GeminiGenerator::new(&GeneratorConfig {
        api_key: Some("test-key".into()),
        base_url: format!("{}/v1beta", server.uri()),
        ..GeneratorConfig::default()
    })
}

#[tokio::test]
async fn gemini_generator_parses_fenced_json_output() {
    let server = MockServer::start().await;
    let fenced = "```json\n{\"summary\": \"broth person\", \"highlights\": [\"umami\"]}\n```";
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-3.1-pro-preview:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_response_body(fenced)))
        .mount(&server)
        .await;

    let generator = generator_for(&server);
    let analysis = generator.generate("prompt").await.unwrap();
    assert_eq!(analysis.summary, "broth person");
    assert_eq!(analysis.highlights, vec!["umami"]);
    assert!(analysis.personality_traits.is_empty());
}

#[tokio::test]
async fn gemini_generator_rejects_prose_output() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-3.1-pro-preview:generateContent"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gemini_response_body("Sorry, I cannot answer in JSON.")),
        )
        .mount(&server)
        .await;

    let generator = generator_for(&server);
    assert!(generator.generate("prompt").await.is_err());
}

#[tokio::test]
async fn gemini_generator_surfaces_api_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let generator = generator_for(&server);
    let err = generator.generate("prompt").await.unwrap_err();
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn orchestrator_falls_back_when_the_wire_generator_misbehaves() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gemini_response_body("not json at all")),
        )
        .mount(&server)
        .await;

    let store = SqliteStore::in_memory().await.unwrap();
    store.seed_quiz_reference().await.unwrap();
    complete_quiz_and_rank(&store, "u1").await;

    let service = TasteAnalysisService::new(
        &store,
        Arc::new(generator_for(&server)),
        Arc::new(StubShops::with(&[1, 2, 3])),
        Arc::new(StubUsers),
    );

    let receipt = service.generate("u1").await.unwrap();
    assert!(!receipt.analysis.summary.is_empty());
    assert!(receipt.analysis.highlights.is_empty());
}
