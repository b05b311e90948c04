//! Typed request parameters for georef endpoints.
//!
//! Raw querystring or JSON body values go in, typed [`ParsedRecord`]s or a
//! complete set of per-field [`ParamError`]s come out. Nothing here knows about
//! HTTP or about the search backend.

pub mod address;
pub mod endpoint;
pub mod error;
pub mod messages;
pub mod param;
pub mod raw;
pub mod value;

pub use address::parse_address;
pub use endpoint::{EndpointParameters, EndpointParametersBuilder};
pub use error::{
    FieldErrors, ParamConfigError, ParamError, ParamErrorType, ParamFailure, ParamSource,
    ParamsError,
};
pub use param::{IdSpec, ParamKind, Parameter};
pub use raw::{RawParams, RawValue};
pub use value::{ParamValue, ParsedRecord, StreetAddress};

/// Maximum number of entries accepted in one bulk request.
pub const MAX_BULK_LEN: usize = 5000;

/// Upper limit for the per-record result size parameter, and for the sum of
/// that parameter across a bulk request.
pub const MAX_SIZE_LEN: i64 = MAX_BULK_LEN as i64;
