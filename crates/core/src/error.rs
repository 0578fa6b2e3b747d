use crate::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid UTC offset: {0}")]
    InvalidUtcOffset(String),
    #[error("unparsable date/time: {0}")]
    InvalidDatetime(String),
    #[error("failed to serialize document: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize checkin: {0}")]
    Deserialization(serde_json::Error),
    #[error("document failed validation: {0}")]
    Validation(#[from] ValidationError),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
