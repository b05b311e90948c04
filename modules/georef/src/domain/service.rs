use std::sync::Arc;

use georef_params::RawParams;
use serde_json::Value;
use tracing::{debug, info, instrument, Span};

use crate::contract::model::{
    FormatDescriptor, Matches, QueryDescriptor, Record, RequestPlan, Resource, ResultSet,
};
use crate::domain::address::build_addresses_result;
use crate::domain::catalog::ResourceCatalog;
use crate::domain::error::{BackendError, DomainError};
use crate::domain::place::{build_place_result, department_queries, municipality_queries};
use crate::domain::ports::{SearchBackend, StreetLocator};
use crate::domain::planner::Planner;
use crate::names as N;

/// Domain service: validates requests, builds the backend queries and
/// assembles results. Depends only on the backend ports.
#[derive(Clone)]
pub struct Service {
    planner: Planner,
    search: Arc<dyn SearchBackend>,
    locator: Arc<dyn StreetLocator>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Concurrent street-locator calls while enriching one address result.
    pub enrichment_concurrency: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            enrichment_concurrency: 8,
        }
    }
}

fn check_aligned<T>(backend: &str, results: &[T], expected: usize) -> Result<(), BackendError> {
    if results.len() != expected {
        return Err(BackendError::malformed(
            backend,
            format!("{} results for {} queries", results.len(), expected),
        ));
    }
    Ok(())
}

impl Service {
    pub fn new(
        catalog: Arc<ResourceCatalog>,
        search: Arc<dyn SearchBackend>,
        locator: Arc<dyn StreetLocator>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            planner: Planner::new(catalog),
            search,
            locator,
            config,
        }
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    #[instrument(name = "georef.service.process_single", skip(self, resource, query), fields(resource = %resource))]
    pub async fn process_single(
        &self,
        resource: Resource,
        query: &RawParams,
    ) -> Result<ResultSet, DomainError> {
        debug!("Processing single request");

        let plan = self.planner.plan_single(resource, query)?;
        let mut results = self.execute(resource, vec![plan]).await?;
        results
            .pop()
            .ok_or_else(|| DomainError::internal("empty result for single request"))
    }

    #[instrument(name = "georef.service.process_bulk", skip(self, resource, query, body), fields(resource = %resource))]
    pub async fn process_bulk(
        &self,
        resource: Resource,
        query: &RawParams,
        body: Option<&Value>,
    ) -> Result<Vec<ResultSet>, DomainError> {
        debug!("Processing bulk request");

        // Bulk parsing fans out on rayon; keep it off the async workers.
        let planner = self.planner.clone();
        let query = query.clone();
        let body = body.cloned();
        let span = Span::current();
        let plans = tokio::task::spawn_blocking(move || {
            span.in_scope(|| planner.plan_bulk(resource, &query, body.as_ref()))
        })
        .await
        .map_err(|e| DomainError::internal(format!("bulk validation task failed: {}", e)))??;
        info!(entries = plans.len(), "Bulk request validated");
        self.execute(resource, plans).await
    }

    /// Run validated plans against the backends. Any backend failure aborts
    /// the whole batch.
    async fn execute(
        &self,
        resource: Resource,
        plans: Vec<RequestPlan>,
    ) -> Result<Vec<ResultSet>, DomainError> {
        let (queries, formats): (Vec<QueryDescriptor>, Vec<FormatDescriptor>) =
            plans.into_iter().map(|p| (p.query, p.format)).unzip();

        let matches = match resource {
            Resource::Places => self.search_places(&queries).await?,
            Resource::Addresses => self.search_addresses(&queries).await?,
            Resource::Streets => {
                let results = self.search.search_streets(&queries).await?;
                check_aligned("search", &results, queries.len())?;
                Self::attributed(resource, results)
            }
            _ => {
                let results = self.search.search_entities(resource, &queries).await?;
                check_aligned("search", &results, queries.len())?;
                Self::attributed(resource, results)
            }
        };

        debug!("Retrieved results for {} queries", queries.len());

        Ok(matches
            .into_iter()
            .zip(formats)
            .map(|(matches, format)| ResultSet { matches, format })
            .collect())
    }

    fn attributed(resource: Resource, results: Vec<Vec<Record>>) -> Vec<Matches> {
        let source = Value::from(resource.source());
        results
            .into_iter()
            .map(|mut records| {
                for record in records.iter_mut() {
                    record.insert(N::SOURCE.to_string(), source.clone());
                }
                Matches::List(records)
            })
            .collect()
    }

    async fn search_addresses(&self, queries: &[QueryDescriptor]) -> Result<Vec<Matches>, DomainError> {
        let mut results = self.search.search_streets(queries).await?;
        check_aligned("search", &results, queries.len())?;

        for (records, query) in results.iter_mut().zip(queries) {
            build_addresses_result(
                self.locator.as_ref(),
                records,
                query,
                self.config.enrichment_concurrency,
            )
            .await?;
        }

        Ok(results.into_iter().map(Matches::List).collect())
    }

    async fn search_places(&self, queries: &[QueryDescriptor]) -> Result<Vec<Matches>, DomainError> {
        let departments = self
            .search
            .search_places(Resource::Departments, &department_queries(queries))
            .await?;
        check_aligned("search", &departments, queries.len())?;

        let municipalities = self
            .search
            .search_places(Resource::Municipalities, &municipality_queries(queries))
            .await?;
        check_aligned("search", &municipalities, queries.len())?;

        Ok(queries
            .iter()
            .zip(departments)
            .zip(municipalities)
            .map(|((query, dept), muni)| Matches::Single(build_place_result(query, dept, muni)))
            .collect())
    }
}
