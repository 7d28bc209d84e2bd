use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `tastemap`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum TastemapError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Quiz / classification ───────────────────────────────────────────
    #[error("classify: {0}")]
    Classify(#[from] ClassifyError),

    // ── Ranking ─────────────────────────────────────────────────────────
    #[error("ranking: {0}")]
    Ranking(#[from] RankingError),

    // ── Taste analysis ──────────────────────────────────────────────────
    #[error("analysis: {0}")]
    Analysis(#[from] AnalysisError),

    // ── Persistence ─────────────────────────────────────────────────────
    #[error("store: {0}")]
    Store(#[from] StoreError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<sqlx::Error> for TastemapError {
    fn from(err: sqlx::Error) -> Self {
        TastemapError::Store(StoreError::Sqlx(err))
    }
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Quiz / classification errors ───────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("empty answer set")]
    EmptyAnswers,

    #[error("question {question} has answer {value} outside 1..=5")]
    AnswerOutOfRange { question: u8, value: u8 },
}

// ─── Ranking errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("no ranking entry for user {user_id}, shop {shop_id}")]
    EntryNotFound { user_id: String, shop_id: i64 },

    #[error("invalid reorder payload: {reason}")]
    InvalidReorder { reason: String },

    #[error("comparison session is already complete")]
    SessionComplete,
}

// ─── Taste analysis errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("user {user_id} has no taste result; the quiz must be completed first")]
    QuizNotCompleted { user_id: String },

    #[error("taste type {code} maps to no known profile")]
    UnknownTasteType { code: String },

    #[error("share code {code} not found")]
    ShareNotFound { code: String },
}

// ─── Persistence errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open database: {0}")]
    Open(String),

    #[error("schema migration failed: {0}")]
    Migration(String),

    #[error("sqlx: {0}")]
    Sqlx(#[from] sqlx::Error),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, TastemapError>;
