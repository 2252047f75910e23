use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
#[non_exhaustive]
pub enum GymbookError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("could not parse {0:?}")]
    Parse(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = GymbookError> = std::result::Result<T, E>;

impl From<anyhow::Error> for GymbookError {
    fn from(e: anyhow::Error) -> Self {
        GymbookError::Storage(e.to_string())
    }
}

impl GymbookError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        GymbookError::NotFound {
            kind,
            id: id.into(),
        }
    }
}
