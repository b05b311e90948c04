use async_trait::async_trait;
use georef_params::RawParams;
use serde_json::Value;

use crate::contract::{error::GeorefError, model::Resource, model::ResultSet};

/// Public API for looking up georef entities.
#[async_trait]
pub trait GeorefApi: Send + Sync {
    /// Single lookup from querystring parameters.
    async fn lookup(&self, resource: Resource, query: &RawParams)
        -> Result<ResultSet, GeorefError>;

    /// Bulk lookup. `body` is the whole request body; the batch is read from
    /// the key named after the resource. Results are index-aligned with the
    /// batch.
    async fn lookup_bulk(
        &self,
        resource: Resource,
        query: &RawParams,
        body: Option<&Value>,
    ) -> Result<Vec<ResultSet>, GeorefError>;
}
