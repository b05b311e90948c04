pub mod client;
pub mod error;
pub mod model;

pub use client::GeorefApi;
pub use error::GeorefError;
pub use model::{
    CsvColumn, FormatDescriptor, Location, Matches, QueryDescriptor, Record, RequestPlan,
    Resource, ResultSet,
};
