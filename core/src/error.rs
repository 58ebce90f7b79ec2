use thiserror::Error;

#[derive(Error, Debug)]
pub enum SegError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Line item {row}: required field '{field}' is missing")]
    MissingField { row: usize, field: &'static str },

    #[error("Line item {row}: cannot parse transaction date '{value}'")]
    InvalidDate { row: usize, value: String },

    #[error("Line item {row}: column '{field}' holds an unusable value: {detail}")]
    InvalidColumn { row: usize, field: &'static str, detail: String },

    #[error("Score {score} is outside 1..=5")]
    ScoreOutOfRange { score: u8 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SegResult<T> = Result<T, SegError>;
