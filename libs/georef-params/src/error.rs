use crate::messages;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Kind of parameter error. Codes are part of the public API: never reuse
/// or renumber an existing one, add a new variant instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParamErrorType {
    UnknownParam,
    ValueError,
    InvalidChoice,
    ParamRequired,
    InvalidBulk,
    InvalidLocation,
    Repeated,
    InvalidBulkEntry,
    InvalidBulkLen,
    InvalidSet,
}

impl ParamErrorType {
    pub const fn code(self) -> u16 {
        match self {
            ParamErrorType::UnknownParam => 1000,
            ParamErrorType::ValueError => 1001,
            ParamErrorType::InvalidChoice => 1002,
            ParamErrorType::ParamRequired => 1003,
            ParamErrorType::InvalidBulk => 1004,
            ParamErrorType::InvalidLocation => 1005,
            ParamErrorType::Repeated => 1006,
            ParamErrorType::InvalidBulkEntry => 1007,
            ParamErrorType::InvalidBulkLen => 1008,
            ParamErrorType::InvalidSet => 1009,
        }
    }
}

/// Where in the request a parameter was received.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamSource {
    Querystring,
    Body,
}

impl ParamSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            ParamSource::Querystring => "querystring",
            ParamSource::Body => "body",
        }
    }
}

impl fmt::Display for ParamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exactly one problem for exactly one field (or one bulk entry).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParamError {
    pub error_type: ParamErrorType,
    pub message: String,
    pub source: ParamSource,
}

impl ParamError {
    pub fn new(error_type: ParamErrorType, message: impl Into<String>, source: ParamSource) -> Self {
        Self {
            error_type,
            message: message.into(),
            source,
        }
    }

    pub fn code(&self) -> u16 {
        self.error_type.code()
    }
}

/// Field name → error, for one logical request.
pub type FieldErrors = BTreeMap<String, ParamError>;

/// Outcome of a failed parse: every error found, never just the first.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
#[serde(untagged)]
pub enum ParamsError {
    /// Errors of a single (querystring) request, keyed by field name.
    #[error("{} invalid parameter(s)", .0.len())]
    Single(FieldErrors),
    /// Index-aligned errors of a bulk request; entries without problems are
    /// empty maps. Structural failures (bad location, not a list, too long)
    /// are reported as a one-element list.
    #[error("{} bulk entr(ies) with invalid parameters", .0.iter().filter(|e| !e.is_empty()).count())]
    Bulk(Vec<FieldErrors>),
}

impl ParamsError {
    pub(crate) fn structural(key: &str, error: ParamError) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(key.to_string(), error);
        ParamsError::Bulk(vec![errors])
    }
}

/// Failure of a single value, before it is attributed to a field.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParamFailure {
    #[error("{}", messages::MISSING_ERROR)]
    Required,
    #[error("{0}")]
    Value(String),
    #[error("{0}")]
    InvalidChoice(String),
}

impl ParamFailure {
    pub fn value(message: impl Into<String>) -> Self {
        ParamFailure::Value(message.into())
    }

    pub fn error_type(&self) -> ParamErrorType {
        match self {
            ParamFailure::Required => ParamErrorType::ParamRequired,
            ParamFailure::Value(_) => ParamErrorType::ValueError,
            ParamFailure::InvalidChoice(_) => ParamErrorType::InvalidChoice,
        }
    }

    pub fn into_param_error(self, source: ParamSource) -> ParamError {
        ParamError::new(self.error_type(), self.to_string(), source)
    }
}

/// A statically declared parameter set is inconsistent.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParamConfigError {
    #[error("parameter '{name}' is required and cannot declare a default value")]
    RequiredWithDefault { name: String },

    #[error("default value of parameter '{name}' is not one of its choices")]
    DefaultNotInChoices { name: String },
}
