use crate::directory::UserInfo;
use crate::ranking::SatisfactionTier;
use crate::taste::{AxisScores, TypeProfile};
use serde::{Deserialize, Serialize};

/// Structured output of the external generator.
///
/// Field names follow the generation contract (camelCase JSON); missing
/// fields normalize to empty rather than failing the parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedAnalysis {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub personality_traits: Vec<String>,
    #[serde(default)]
    pub food_recommendations: Vec<String>,
    #[serde(default)]
    pub detailed_analysis: String,
}

/// Snapshot row stored in `ranked_shops_summary` (top 20 at generation time).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedShopSummary {
    pub name: String,
    #[serde(default)]
    pub food_kind: Option<String>,
    pub satisfaction_tier: SatisfactionTier,
    pub rank: i64,
}

/// Ranked shop with the extra decoration the prompt uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedShopDetail {
    pub name: String,
    #[serde(default)]
    pub food_kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address_region: Option<String>,
    pub satisfaction_tier: SatisfactionTier,
    pub rank: i64,
}

impl RankedShopDetail {
    pub fn to_summary(&self) -> RankedShopSummary {
        RankedShopSummary {
            name: self.name.clone(),
            food_kind: self.food_kind.clone(),
            satisfaction_tier: self.satisfaction_tier,
            rank: self.rank,
        }
    }
}

/// Everything the prompt builder needs.
#[derive(Debug, Clone)]
pub struct AnalysisInput {
    pub full_type: String,
    pub base_code: String,
    pub subtype: String,
    pub profile: TypeProfile,
    pub scores: AxisScores,
    pub ranked_shops: Vec<RankedShopDetail>,
}

/// Returned to the requesting user after a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReceipt {
    pub analysis: GeneratedAnalysis,
    pub share_code: String,
    pub taste_type: String,
    pub taste_profile: TypeProfile,
}

/// Public payload resolved from a share code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedAnalysis {
    pub taste_type: String,
    pub taste_scores: AxisScores,
    pub ranked_shops_summary: Vec<RankedShopSummary>,
    pub analysis: GeneratedAnalysis,
    pub taste_profile: TypeProfile,
    pub taste_profile_en: TypeProfile,
    pub user: UserInfo,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_analysis_parses_camel_case() {
        let json = r#"{
            "summary": "A bold palate.",
            "highlights": ["spice-first"],
            "personalityTraits": ["decisive"],
            "foodRecommendations": ["mapo tofu"],
            "detailedAnalysis": "Clear pattern."
        }"#;
        let analysis: GeneratedAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.personality_traits, vec!["decisive"]);
        assert_eq!(analysis.detailed_analysis, "Clear pattern.");
    }

    #[test]
    fn missing_fields_normalize_to_empty() {
        let analysis: GeneratedAnalysis = serde_json::from_str(r#"{"summary": "ok"}"#).unwrap();
        assert_eq!(analysis.summary, "ok");
        assert!(analysis.highlights.is_empty());
        assert!(analysis.food_recommendations.is_empty());
        assert_eq!(analysis.detailed_analysis, "");
    }

    #[test]
    fn summary_snapshot_drops_prompt_only_fields() {
        let detail = RankedShopDetail {
            name: "Soup Lab".into(),
            food_kind: Some("korean".into()),
            description: Some("long-simmered broths".into()),
            address_region: Some("Mapo".into()),
            satisfaction_tier: SatisfactionTier::Good,
            rank: 1,
        };
        let summary = detail.to_summary();
        assert_eq!(summary.name, "Soup Lab");
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("description").is_none());
    }
}
