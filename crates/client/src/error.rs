//! Client error types

use tenantweb_shared::WebError;

use crate::config::ConfigError;

/// Error type for the collaborator-facing parts of the client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    // Input errors
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    // Collaborator errors
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("{method} {path} failed with status {status}")]
    Status {
        method: &'static str,
        path: String,
        status: u16,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Shared(#[from] WebError),
}

impl ClientError {
    /// Stable machine-readable code, used as a log field
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::InvalidUrl(_) => "INVALID_URL",
            ClientError::Transport(_) => "TRANSPORT_ERROR",
            ClientError::Status { .. } => "HTTP_STATUS",
            ClientError::Config(_) => "CONFIG_ERROR",
            ClientError::Shared(WebError::Storage(_)) => "STORAGE_ERROR",
            ClientError::Shared(WebError::Serialization(_)) => "SERIALIZATION_ERROR",
            ClientError::Shared(WebError::Internal(_)) => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Shared(err.into())
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
