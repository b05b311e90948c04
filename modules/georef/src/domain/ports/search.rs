use async_trait::async_trait;

use crate::contract::model::{QueryDescriptor, Record, Resource};
use crate::domain::error::BackendError;

/// Search backend port. Every call carries a whole batch of queries and
/// returns results index-aligned with it, so one bulk request costs one
/// round-trip per index.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Search one of the entity indexes (states, departments,
    /// municipalities, localities).
    async fn search_entities(
        &self,
        index: Resource,
        queries: &[QueryDescriptor],
    ) -> Result<Vec<Vec<Record>>, BackendError>;

    /// Search the streets index. Address queries go through here too.
    async fn search_streets(
        &self,
        queries: &[QueryDescriptor],
    ) -> Result<Vec<Vec<Record>>, BackendError>;

    /// Find the entity of `index` whose polygon contains each point.
    async fn search_places(
        &self,
        index: Resource,
        queries: &[QueryDescriptor],
    ) -> Result<Vec<Option<Record>>, BackendError>;
}
