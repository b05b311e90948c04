use georef_params::ParamsError;
use thiserror::Error;

/// Errors that are safe to expose to callers. Callers tell "fix your input"
/// (`Validation`) apart from "retry later" (`Internal`).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeorefError {
    #[error("Validation error: {0}")]
    Validation(ParamsError),

    #[error("Internal error")]
    Internal,
}

impl GeorefError {
    pub fn validation(errors: ParamsError) -> Self {
        Self::Validation(errors)
    }

    pub fn internal() -> Self {
        Self::Internal
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<crate::domain::error::DomainError> for GeorefError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            InvalidParams(errors) => Self::validation(errors),
            Backend(e) => {
                tracing::error!(kind = e.kind(), error = %e, "Backend failure");
                Self::internal()
            }
            Internal { message } => {
                tracing::error!(error = %message, "Internal failure");
                Self::internal()
            }
        }
    }
}
