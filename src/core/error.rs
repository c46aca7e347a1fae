use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Malformed record: missing required field '{field}'")]
    MalformedRecord { field: &'static str },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Snapshot error: {0}")]
    SnapshotError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, DeckError>;

impl DeckError {
    pub fn missing(field: &'static str) -> Self {
        Self::MalformedRecord { field }
    }
}
