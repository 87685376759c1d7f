use thiserror::Error;

pub type Result<T> = std::result::Result<T, EtlError>;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Upstream source unavailable: {0}")]
    SourceUnavailable(#[source] sqlx::Error),

    #[error("Upstream query failed: {0}")]
    SourceQuery(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::error::StorageError),

    #[error("Snapshot file error: {0}")]
    Snapshot(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Generation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Configuration error: {0}")]
    Config(String),
}
