//! Prompt construction for the analysis generator.

use super::types::{AnalysisInput, RankedShopDetail};
use crate::ranking::SatisfactionTier;
use crate::taste::{Axis, axis_score};
use std::fmt::Write;

fn shop_line(shop: &RankedShopDetail) -> String {
    let mut line = format!(
        "  #{}. {} ({})",
        shop.rank,
        shop.name,
        shop.food_kind.as_deref().unwrap_or("other")
    );
    if let Some(region) = &shop.address_region {
        let _ = write!(line, " - {region}");
    }
    if let Some(description) = &shop.description {
        let clipped: String = description.chars().take(100).collect();
        let _ = write!(line, "\n      about: {clipped}");
    }
    line
}

fn tier_block(out: &mut String, heading: &str, shops: &[&RankedShopDetail]) {
    if shops.is_empty() {
        return;
    }
    let _ = writeln!(out, "{heading}:");
    for shop in shops {
        let _ = writeln!(out, "{}", shop_line(shop));
    }
}

/// Build the generation prompt: taste type, 7-axis scores, and the user's
/// ranked shops grouped by tier, with a strict JSON response contract.
pub fn build_analysis_prompt(input: &AnalysisInput) -> String {
    let by_tier = |tier: SatisfactionTier| -> Vec<&RankedShopDetail> {
        input
            .ranked_shops
            .iter()
            .filter(|s| s.satisfaction_tier == tier)
            .collect()
    };

    let mut shops_section = String::new();
    tier_block(&mut shops_section, "Loved (Good)", &by_tier(SatisfactionTier::Good));
    tier_block(&mut shops_section, "Fine (OK)", &by_tier(SatisfactionTier::Ok));
    tier_block(&mut shops_section, "Disliked (Bad)", &by_tier(SatisfactionTier::Bad));

    let mut axis_lines = String::new();
    for axis in Axis::ALL {
        let _ = writeln!(axis_lines, "- {axis}: {}", axis_score(&input.scores, axis));
    }

    format!(
        r#"You are an expert in culinary psychology. Write a fun, insightful
analysis of this user's palate from their taste data.

## User data

**Taste type**: {full_type} ({profile_name})
**Type description**: {profile_tagline}

**7-axis scores** (-2 to +2 scale):
{axis_lines}
**Rated restaurants** (by rank):
{shops_section}
## Response format

Respond ONLY with JSON in exactly this shape, no other text:

{{
    "summary": "2-3 sentences summarizing this palate. Fun, relatable tone.",
    "highlights": ["taste keyword 1", "taste keyword 2", "taste keyword 3", "taste keyword 4"],
    "personalityTraits": ["food personality trait 1", "trait 2", "trait 3"],
    "foodRecommendations": ["recommended dish/genre 1", "2", "3", "4"],
    "detailedAnalysis": "3-4 sentences of detailed analysis, referencing the rated restaurants' patterns."
}}

Rules:
- highlights has 4 items, personalityTraits has 3, foodRecommendations has 4
- Tone: friendly and playful, something worth sharing
- If restaurants were rated, weave their patterns (regions, descriptions) into the analysis"#,
        full_type = input.full_type,
        profile_name = input.profile.name,
        profile_tagline = input.profile.tagline,
    )
}
