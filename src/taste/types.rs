use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::Display;

// Axis — taste evaluation axis (EXACTLY 7, declaration order is the wire order)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Axis {
    Boldness,
    Acidity,
    Richness,
    Experimental,
    Spiciness,
    Sweetness,
    Umami,
}

impl Axis {
    /// All axes in canonical order. Quiz questions map onto this order three
    /// at a time, and score vectors are serialized in this order.
    pub const ALL: [Axis; 7] = [
        Axis::Boldness,
        Axis::Acidity,
        Axis::Richness,
        Axis::Experimental,
        Axis::Spiciness,
        Axis::Sweetness,
        Axis::Umami,
    ];
}

// AxisScores — scores per axis (BTreeMap for stable ordering)
pub type AxisScores = BTreeMap<Axis, f64>;

/// Score for one axis; absent axes read as neutral 0.
pub fn axis_score(scores: &AxisScores, axis: Axis) -> f64 {
    scores.get(&axis).copied().unwrap_or(0.0)
}

/// Output language for profile and label lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, Default)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Lang {
    #[default]
    Ko,
    En,
}

// ─── Type-code letters ──────────────────────────────────────────────────────
//
// One enum per code position. `0` always falls to the first variant, so the
// first variant of each pair is the tie-break side.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Intensity {
    L,
    H,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum FlavorDirection {
    D,
    A,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum PleasureBias {
    U,
    S,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Exploration {
    F,
    P,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Subtype {
    A,
    T,
}

impl Intensity {
    pub fn label(self, lang: Lang) -> &'static str {
        match (self, lang) {
            (Intensity::L, Lang::Ko) => "저자극",
            (Intensity::L, Lang::En) => "Mild",
            (Intensity::H, Lang::Ko) => "고자극",
            (Intensity::H, Lang::En) => "Bold",
        }
    }
}

impl FlavorDirection {
    pub fn label(self, lang: Lang) -> &'static str {
        match (self, lang) {
            (FlavorDirection::D, Lang::Ko) => "깊이",
            (FlavorDirection::D, Lang::En) => "Deep",
            (FlavorDirection::A, Lang::Ko) => "산뜻",
            (FlavorDirection::A, Lang::En) => "Fresh",
        }
    }
}

impl PleasureBias {
    pub fn label(self, lang: Lang) -> &'static str {
        match (self, lang) {
            (PleasureBias::U, Lang::Ko) => "감칠",
            (PleasureBias::U, Lang::En) => "Savory",
            (PleasureBias::S, Lang::Ko) => "달콤",
            (PleasureBias::S, Lang::En) => "Sweet",
        }
    }
}

impl Exploration {
    pub fn label(self, lang: Lang) -> &'static str {
        match (self, lang) {
            (Exploration::F, Lang::Ko) => "안정",
            (Exploration::F, Lang::En) => "Familiar",
            (Exploration::P, Lang::Ko) => "탐험",
            (Exploration::P, Lang::En) => "Adventurous",
        }
    }
}

impl Subtype {
    pub fn label(self, lang: Lang) -> &'static str {
        match (self, lang) {
            (Subtype::A, Lang::Ko) => "확신형",
            (Subtype::A, Lang::En) => "Assertive",
            (Subtype::T, Lang::Ko) => "탐구형",
            (Subtype::T, Lang::En) => "Turbulent",
        }
    }
}

// TasteTypeAxes — the four letter choices making up a base code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasteTypeAxes {
    pub intensity: Intensity,
    pub flavor: FlavorDirection,
    pub pleasure: PleasureBias,
    pub exploration: Exploration,
}

/// Derived taste type. `base_code` is the 4-letter axis code ("HASP"),
/// `full_type` appends the stability subtype ("HASP-A").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TasteType {
    pub base_code: String,
    pub subtype: Subtype,
    pub full_type: String,
    pub axes: TasteTypeAxes,
    /// Mean of |all 7 scores|, rounded to 2 decimals.
    pub stability_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_serializes_snake_case() {
        let json = serde_json::to_string(&Axis::Experimental).unwrap();
        assert_eq!(json, "\"experimental\"");
        assert_eq!(Axis::Umami.to_string(), "umami");
    }

    #[test]
    fn axis_all_matches_declaration_order() {
        assert_eq!(Axis::ALL.len(), 7);
        assert_eq!(Axis::ALL[0], Axis::Boldness);
        assert_eq!(Axis::ALL[6], Axis::Umami);
        // BTreeMap iteration order must equal canonical order
        let mut scores: AxisScores = BTreeMap::new();
        for (i, axis) in Axis::ALL.iter().enumerate() {
            scores.insert(*axis, i as f64);
        }
        let keys: Vec<Axis> = scores.keys().copied().collect();
        assert_eq!(keys, Axis::ALL.to_vec());
    }

    #[test]
    fn absent_axis_reads_neutral() {
        let scores: AxisScores = BTreeMap::new();
        assert_eq!(axis_score(&scores, Axis::Spiciness), 0.0);
    }

    #[test]
    fn letters_display_as_single_characters() {
        assert_eq!(Intensity::H.to_string(), "H");
        assert_eq!(FlavorDirection::D.to_string(), "D");
        assert_eq!(PleasureBias::S.to_string(), "S");
        assert_eq!(Exploration::P.to_string(), "P");
        assert_eq!(Subtype::T.to_string(), "T");
    }

    #[test]
    fn labels_localize() {
        assert_eq!(Intensity::H.label(Lang::En), "Bold");
        assert_eq!(Intensity::H.label(Lang::Ko), "고자극");
        assert_eq!(Subtype::A.label(Lang::En), "Assertive");
    }

    #[test]
    fn axis_scores_map_serializes_by_axis_name() {
        let mut scores: AxisScores = BTreeMap::new();
        scores.insert(Axis::Boldness, 2.0);
        scores.insert(Axis::Umami, -1.0);
        let json = serde_json::to_value(&scores).unwrap();
        assert_eq!(json["boldness"], 2.0);
        assert_eq!(json["umami"], -1.0);
    }
}
