use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("backup file is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("backup file must contain a JSON array of profiles")]
    NotAnArray,

    #[error("serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
}
