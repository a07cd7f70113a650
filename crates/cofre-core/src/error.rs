//! Error types for Cofre

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// True when the transaction store could not be reached or queried.
    ///
    /// Analytics operations fail with one of these and never return a
    /// partial result.
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(
            self,
            Error::Database(_) | Error::Pool(_) | Error::StorageUnavailable(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
