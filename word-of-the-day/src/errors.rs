//! Error types surfaced by the word-of-the-day core.

use dictionary::{DictionaryError, NotFoundError};
use thiserror::Error;

/// Failures of the persistence substrate.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("could not encode record: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("write to '{0}' did not commit")]
    WriteRejected(String),
}

/// The four failure kinds the presentation layer is expected to handle.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unable to fetch a word right now. Please try again later. ({0})")]
    SourceUnavailable(#[source] DictionaryError),
    #[error("{0}")]
    WordNotFound(#[source] NotFoundError),
    #[error("Failed to save local data: {0}")]
    Persistence(#[from] StorageError),
    #[error("Notification permissions not granted")]
    PermissionDenied,
}

impl From<DictionaryError> for AppError {
    fn from(error: DictionaryError) -> Self {
        match error {
            DictionaryError::NotFound(not_found) => AppError::WordNotFound(not_found),
            other => AppError::SourceUnavailable(other),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
