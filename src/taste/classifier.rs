//! Pure derivation of the 32-type taste code from 7-axis scores.
//!
//! Type code structure: `[Intensity][Flavor][Pleasure][Exploration]-[Subtype]`,
//! e.g. `HASP-A`.

use super::types::{
    Axis, AxisScores, Exploration, FlavorDirection, Intensity, Lang, PleasureBias, Subtype,
    TasteType, TasteTypeAxes, axis_score,
};

/// Threshold for the Assertive vs Turbulent subtype.
pub const STABILITY_THRESHOLD: f64 = 1.2;

/// Convert 7-axis taste scores (nominally -2..=2) to a taste type.
///
/// Axis derivations:
/// - Intensity (L/H): `mean(boldness, spiciness) > 0` → H
/// - Flavor direction (D/A): `acidity - richness > 0` → A
/// - Pleasure bias (U/S): `sweetness - umami > 0` → S
/// - Exploration (F/P): `experimental > 0` → P
///
/// A derived value of exactly 0 always falls to the first letter (L/D/U/F);
/// `> 0` is the only positive test. The subtype compares the *unrounded*
/// stability (mean of absolute scores) against [`STABILITY_THRESHOLD`] with
/// `>=`, while the reported `stability_score` is rounded to 2 decimals.
pub fn compute_taste_type(scores: &AxisScores) -> TasteType {
    let boldness = axis_score(scores, Axis::Boldness);
    let acidity = axis_score(scores, Axis::Acidity);
    let richness = axis_score(scores, Axis::Richness);
    let experimental = axis_score(scores, Axis::Experimental);
    let spiciness = axis_score(scores, Axis::Spiciness);
    let sweetness = axis_score(scores, Axis::Sweetness);
    let umami = axis_score(scores, Axis::Umami);

    let intensity_value = (boldness + spiciness) / 2.0;
    let flavor_value = acidity - richness;
    let pleasure_value = sweetness - umami;
    let exploration_value = experimental;

    let axes = TasteTypeAxes {
        intensity: if intensity_value > 0.0 {
            Intensity::H
        } else {
            Intensity::L
        },
        flavor: if flavor_value > 0.0 {
            FlavorDirection::A
        } else {
            FlavorDirection::D
        },
        pleasure: if pleasure_value > 0.0 {
            PleasureBias::S
        } else {
            PleasureBias::U
        },
        exploration: if exploration_value > 0.0 {
            Exploration::P
        } else {
            Exploration::F
        },
    };

    let all = [
        boldness,
        acidity,
        richness,
        experimental,
        spiciness,
        sweetness,
        umami,
    ];
    let stability: f64 = all.iter().map(|v| v.abs()).sum::<f64>() / 7.0;
    let rounded_stability = (stability * 100.0).round() / 100.0;

    let subtype = if stability >= STABILITY_THRESHOLD {
        Subtype::A
    } else {
        Subtype::T
    };

    let base_code = format!(
        "{}{}{}{}",
        axes.intensity, axes.flavor, axes.pleasure, axes.exploration
    );
    let full_type = format!("{base_code}-{subtype}");

    TasteType {
        base_code,
        subtype,
        full_type,
        axes,
        stability_score: rounded_stability,
    }
}

/// Enumerate all 32 possible full type codes, for validation and reference.
pub fn all_taste_types() -> Vec<String> {
    let mut types = Vec::with_capacity(32);
    for i in [Intensity::L, Intensity::H] {
        for f in [FlavorDirection::D, FlavorDirection::A] {
            for p in [PleasureBias::U, PleasureBias::S] {
                for e in [Exploration::F, Exploration::P] {
                    for s in [Subtype::A, Subtype::T] {
                        types.push(format!("{i}{f}{p}{e}-{s}"));
                    }
                }
            }
        }
    }
    types
}

/// Whether a full type code is one of the 32 valid codes.
pub fn is_valid_taste_type(type_code: &str) -> bool {
    all_taste_types().iter().any(|t| t == type_code)
}

/// Human-readable description line, e.g. "Bold Fresh Sweet Adventurous Assertive".
pub fn taste_type_description(taste_type: &TasteType, lang: Lang) -> String {
    [
        taste_type.axes.intensity.label(lang),
        taste_type.axes.flavor.label(lang),
        taste_type.axes.pleasure.label(lang),
        taste_type.axes.exploration.label(lang),
        taste_type.subtype.label(lang),
    ]
    .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn scores_from(values: [f64; 7]) -> AxisScores {
        let mut scores = BTreeMap::new();
        for (axis, value) in Axis::ALL.iter().zip(values) {
            scores.insert(*axis, value);
        }
        scores
    }

    #[test]
    fn all_zero_scores_fall_to_lduf_turbulent() {
        let t = compute_taste_type(&scores_from([0.0; 7]));
        assert_eq!(t.base_code, "LDUF");
        assert_eq!(t.subtype, Subtype::T);
        assert_eq!(t.full_type, "LDUF-T");
        assert_eq!(t.stability_score, 0.0);
    }

    #[test]
    fn strong_positive_scores_produce_hasp() {
        // boldness, acidity, richness, experimental, spiciness, sweetness, umami
        let t = compute_taste_type(&scores_from([2.0, 2.0, -1.0, 2.0, 2.0, 2.0, -1.0]));
        assert_eq!(t.base_code, "HASP");
        assert_eq!(t.subtype, Subtype::A);
    }

    #[test]
    fn ties_resolve_to_low_branch_on_every_axis() {
        // intensity: boldness + spiciness = 0; flavor: acidity == richness;
        // pleasure: sweetness == umami; exploration: 0
        let t = compute_taste_type(&scores_from([2.0, 1.0, 1.0, 0.0, -2.0, 1.0, 1.0]));
        assert_eq!(t.base_code, "LDUF");
    }

    #[test]
    fn stability_boundary_goes_assertive_at_threshold() {
        // mean(|scores|) exactly at the 1.2 threshold → Assertive
        let t = compute_taste_type(&scores_from([1.2; 7]));
        assert_eq!(t.subtype, Subtype::A);

        // just below → Turbulent
        let t = compute_taste_type(&scores_from([1.19999; 7]));
        assert_eq!(t.subtype, Subtype::T);
    }

    #[test]
    fn stability_score_rounds_to_two_decimals() {
        let t = compute_taste_type(&scores_from([1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]));
        // 1/7 = 0.142857... → 0.14
        assert_eq!(t.stability_score, 0.14);
    }

    #[test]
    fn missing_axes_default_to_zero() {
        let mut scores = AxisScores::new();
        scores.insert(Axis::Experimental, 2.0);
        let t = compute_taste_type(&scores);
        assert_eq!(t.base_code, "LDUP");
    }

    #[test]
    fn all_taste_types_is_total_and_unique() {
        let types = all_taste_types();
        assert_eq!(types.len(), 32);
        let unique: std::collections::BTreeSet<&String> = types.iter().collect();
        assert_eq!(unique.len(), 32);
        for code in &types {
            assert_eq!(code.len(), 6);
            assert!(is_valid_taste_type(code));
        }
    }

    #[test]
    fn computed_type_is_always_one_of_the_32() {
        let valid = all_taste_types();
        for boldness in -2..=2 {
            for experimental in -2..=2 {
                let t = compute_taste_type(&scores_from([
                    f64::from(boldness),
                    1.5,
                    -0.5,
                    f64::from(experimental),
                    -1.0,
                    0.0,
                    2.0,
                ]));
                assert!(valid.contains(&t.full_type));
            }
        }
    }

    #[test]
    fn invalid_codes_rejected() {
        assert!(!is_valid_taste_type("XXXX-A"));
        assert!(!is_valid_taste_type("LDUF"));
        assert!(!is_valid_taste_type(""));
    }

    #[test]
    fn description_joins_localized_labels() {
        let t = compute_taste_type(&scores_from([2.0, 2.0, -1.0, 2.0, 2.0, 2.0, -1.0]));
        assert_eq!(
            taste_type_description(&t, Lang::En),
            "Bold Fresh Sweet Adventurous Assertive"
        );
        assert_eq!(
            taste_type_description(&t, Lang::Ko),
            "고자극 산뜻 달콤 탐험 확신형"
        );
    }
}
