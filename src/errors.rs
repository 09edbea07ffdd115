use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] confy::ConfyError),
    #[error("Unable to read archive {}: {source}", path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("Nothing to analyse")]
    NothingToAnalyse,
    #[error(transparent)]
    UTF8(#[from] std::string::FromUtf8Error),
    #[error(transparent)]
    Rusqlite(#[from] rusqlite::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unable to record {from} -> {to}: {reason}")]
    Upsert {
        from: String,
        to: String,
        reason: String,
    },
    #[error("Query failed: {0}")]
    Query(String),
    #[error("Transaction failed: {0}")]
    Transaction(String),
}

impl StoreError {
    pub fn query(error: impl std::fmt::Display) -> Self {
        Self::Query(error.to_string())
    }

    pub fn transaction(error: impl std::fmt::Display) -> Self {
        Self::Transaction(error.to_string())
    }
}
