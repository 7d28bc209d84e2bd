//! Quiz classification: 21 Likert answers → axis scores → cluster assignment.

mod answers;
mod classifier;
mod reference;
mod seed;

pub use answers::{
    AnswerSheet, NEUTRAL_RAW, QUESTION_COUNT, QUESTIONS_PER_AXIS, ScoreVector,
    compute_axis_scores, validate_answers,
};
pub use classifier::{
    ClusterAssignment, ClusterRecord, DEFAULT_CLUSTER_ID, QuizClassifier, QuizOutcome,
};
pub use reference::{CLUSTER_SEEDS, ClusterSeed, MATCH_TABLE_SIZE, derive_match_table, nearest_cluster};
pub use seed::{SeedReport, seed_reference_data};
