//! Error types for tenantweb

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for WebError {
    fn from(err: serde_json::Error) -> Self {
        WebError::Serialization(err.to_string())
    }
}

pub type WebResult<T> = Result<T, WebError>;
