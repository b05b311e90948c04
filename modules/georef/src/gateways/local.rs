use async_trait::async_trait;
use georef_params::RawParams;
use serde_json::Value;
use std::sync::Arc;

use crate::contract::{
    client::GeorefApi,
    error::GeorefError,
    model::{Resource, ResultSet},
};
use crate::domain::service::Service;

/// Local implementation of the GeorefApi trait that delegates to the domain service
pub struct GeorefLocalClient {
    service: Arc<Service>,
}

impl GeorefLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl GeorefApi for GeorefLocalClient {
    async fn lookup(
        &self,
        resource: Resource,
        query: &RawParams,
    ) -> Result<ResultSet, GeorefError> {
        self.service
            .process_single(resource, query)
            .await
            .map_err(GeorefError::from)
    }

    async fn lookup_bulk(
        &self,
        resource: Resource,
        query: &RawParams,
        body: Option<&Value>,
    ) -> Result<Vec<ResultSet>, GeorefError> {
        self.service
            .process_bulk(resource, query, body)
            .await
            .map_err(GeorefError::from)
    }
}
