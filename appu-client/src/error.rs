//! Client error types

use shared::ValidationError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Local validation failed; nothing was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend rejected the request with a message
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Token missing, expired or rejected
    #[error("Session expired, please log in again")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Login did not yield a token, whatever the cause
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No stored session
    #[error("Not logged in")]
    NotLoggedIn,

    /// Session storage failed
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Errors that should send the operator back to the login screen
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ClientError::Unauthorized | ClientError::NotLoggedIn)
    }

    /// True when the request never left the machine
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
