use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

#[derive(Error, Debug)]
pub enum TableError {
    #[error("No game in progress")]
    NoSession,
    #[error("No player at seat {idx}")]
    NoSuchPlayer { idx: usize },
}
