//! Taste-analysis orchestration: classifier output + ranked shops →
//! generated prose, persisted under a shareable code.

mod generator;
mod prompt;
mod service;
mod types;

pub use generator::{AnalysisGenerator, GeminiGenerator};
pub use prompt::build_analysis_prompt;
pub use service::{TasteAnalysisService, mint_share_code};
pub use types::{
    AnalysisInput, AnalysisReceipt, GeneratedAnalysis, RankedShopDetail, RankedShopSummary,
    SharedAnalysis,
};
