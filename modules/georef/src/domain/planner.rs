use std::sync::Arc;

use georef_params::RawParams;
use serde_json::Value;
use tracing::debug;

use crate::contract::model::{RequestPlan, Resource};
use crate::domain::catalog::ResourceCatalog;
use crate::domain::error::DomainError;
use crate::domain::query::plan;

/// Validates requests against the catalog and builds their plans. Needs no
/// backend, so it can run on its own (e.g. to dry-run a request).
#[derive(Debug, Clone)]
pub struct Planner {
    catalog: Arc<ResourceCatalog>,
}

impl Planner {
    pub fn new(catalog: Arc<ResourceCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    /// Validate a single request and build its query and format.
    pub fn plan_single(
        &self,
        resource: Resource,
        query: &RawParams,
    ) -> Result<RequestPlan, DomainError> {
        let record = self.catalog.params(resource).parse_get(query)?;
        Ok(plan(resource, &record))
    }

    /// Validate a bulk request. The batch is the list stored under the
    /// resource name in `body`; plans are index-aligned with it.
    ///
    /// CPU-bound and parallelized on the rayon pool; async callers should
    /// run it under `spawn_blocking`.
    pub fn plan_bulk(
        &self,
        resource: Resource,
        query: &RawParams,
        body: Option<&Value>,
    ) -> Result<Vec<RequestPlan>, DomainError> {
        let entries = body.and_then(|b| b.get(resource.name()));
        let records = self.catalog.params(resource).parse_post(query, entries)?;
        debug!(entries = records.len(), "Bulk request parsed");
        Ok(records.iter().map(|record| plan(resource, record)).collect())
    }
}
