use georef_params::ParamsError;
use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid parameters")]
    InvalidParams(#[from] ParamsError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Failures reported by the search and spatial backends.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("connection to {backend} failed: {message}")]
    Connection { backend: String, message: String },

    #[error("unexpected response from {backend}: {message}")]
    Malformed { backend: String, message: String },
}

impl BackendError {
    pub fn connection(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Connection {
            backend: backend.into(),
            message: message.into(),
        }
    }

    pub fn malformed(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            backend: backend.into(),
            message: message.into(),
        }
    }

    /// Short failure class for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            BackendError::Connection { .. } => "connection",
            BackendError::Malformed { .. } => "malformed",
        }
    }
}
