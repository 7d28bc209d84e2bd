//! Taste-type classification: 7 axis scores to a 32-type code.

mod classifier;
mod profiles;
mod types;

pub use classifier::{
    STABILITY_THRESHOLD, all_taste_types, compute_taste_type, is_valid_taste_type,
    taste_type_description,
};
pub use profiles::{TypeProfile, taste_type_profile};
pub use types::{
    Axis, AxisScores, Exploration, FlavorDirection, Intensity, Lang, PleasureBias, Subtype,
    TasteType, TasteTypeAxes, axis_score,
};
